//! Filtered property search
//!
//! Each present filter becomes a typed [`Predicate`] pushed onto an ordered
//! list. The list is then folded into one parameterized statement, numbering
//! placeholders in push order, so `$N` always binds the Nth entry of
//! [`PropertyQuery::params`].
//!
//! Filter order is fixed: city, owner, minimum price, maximum price,
//! minimum rating. The limit is always the last parameter.

use serde::Deserialize;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;

use crate::models::Cents;

/// Rows returned when the caller does not say otherwise
pub const DEFAULT_LIMIT: u32 = 10;

const BASE_SELECT: &str = "SELECT properties.*, AVG(property_reviews.rating)::FLOAT8 AS average_rating \
FROM properties \
LEFT JOIN property_reviews ON property_reviews.property_id = properties.id";

const GROUP_BY: &str = "GROUP BY properties.id";

const ORDER_BY: &str = "ORDER BY properties.cost_per_night ASC";

/// Optional search predicates for listings
///
/// Prices are in whole currency units; they are converted to cents when the
/// query is built.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PropertyFilter {
    /// Case-sensitive substring of the city name
    pub city: Option<String>,
    pub owner_id: Option<i32>,
    pub minimum_price_per_night: Option<f64>,
    pub maximum_price_per_night: Option<f64>,
    pub minimum_rating: Option<f64>,
}

impl PropertyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn owner_id(mut self, owner_id: i32) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn minimum_price(mut self, dollars: f64) -> Self {
        self.minimum_price_per_night = Some(dollars);
        self
    }

    pub fn maximum_price(mut self, dollars: f64) -> Self {
        self.maximum_price_per_night = Some(dollars);
        self
    }

    pub fn minimum_rating(mut self, rating: f64) -> Self {
        self.minimum_rating = Some(rating);
        self
    }

    /// Number of filters present
    pub fn len(&self) -> usize {
        self.predicates().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Present filters as predicates, in fixed order.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::with_capacity(5);

        if let Some(city) = &self.city {
            predicates.push(Predicate::row(
                "properties.city",
                Op::Like,
                SqlParam::Text(contains_pattern(city)),
            ));
        }

        if let Some(owner_id) = self.owner_id {
            predicates.push(Predicate::row(
                "properties.owner_id",
                Op::Eq,
                SqlParam::Int(i64::from(owner_id)),
            ));
        }

        if let Some(min) = self.minimum_price_per_night {
            predicates.push(Predicate::row(
                "properties.cost_per_night",
                Op::Ge,
                SqlParam::Int(Cents::from_dollars(min).get()),
            ));
        }

        if let Some(max) = self.maximum_price_per_night {
            predicates.push(Predicate::row(
                "properties.cost_per_night",
                Op::Le,
                SqlParam::Int(Cents::from_dollars(max).get()),
            ));
        }

        if let Some(rating) = self.minimum_rating {
            predicates.push(Predicate::aggregate(
                "AVG(property_reviews.rating)::FLOAT8",
                Op::Ge,
                SqlParam::Float(rating),
            ));
        }

        predicates
    }
}

/// Bound value for a positional parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Int(i64),
    Float(f64),
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ge,
    Le,
    Like,
}

impl Op {
    pub fn as_sql(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ge => ">=",
            Op::Le => "<=",
            Op::Like => "LIKE",
        }
    }
}

/// Where a predicate is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Per joined row, before grouping
    Row,
    /// Per group, on an aggregate
    Group,
}

/// One filter condition: `column op $n`
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: &'static str,
    pub op: Op,
    pub value: SqlParam,
    pub scope: Scope,
}

impl Predicate {
    fn row(column: &'static str, op: Op, value: SqlParam) -> Self {
        Self {
            column,
            op,
            value,
            scope: Scope::Row,
        }
    }

    fn aggregate(column: &'static str, op: Op, value: SqlParam) -> Self {
        Self {
            column,
            op,
            value,
            scope: Scope::Group,
        }
    }

    fn render(&self, placeholder: usize) -> String {
        format!("{} {} ${}", self.column, self.op.as_sql(), placeholder)
    }
}

/// Parameterized search statement and its arguments
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyQuery {
    sql: String,
    params: Vec<SqlParam>,
}

impl PropertyQuery {
    /// Build the search statement for `filter`, capped at `limit` rows.
    ///
    /// # Example
    /// ```
    /// use lightbnb_db::{PropertyFilter, PropertyQuery};
    ///
    /// let query = PropertyQuery::build(&PropertyFilter::new().city("Vancouver"), 10);
    /// assert!(query.sql().contains("WHERE properties.city LIKE $1"));
    /// assert_eq!(query.params().len(), 2);
    /// ```
    pub fn build(filter: &PropertyFilter, limit: u32) -> Self {
        let mut params = Vec::new();
        let mut row_clauses = Vec::new();
        let mut group_clauses = Vec::new();

        for predicate in filter.predicates() {
            params.push(predicate.value.clone());
            let rendered = predicate.render(params.len());
            match predicate.scope {
                Scope::Row => row_clauses.push(rendered),
                Scope::Group => group_clauses.push(rendered),
            }
        }

        let mut sql = String::from(BASE_SELECT);
        if !row_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&row_clauses.join(" AND "));
        }
        sql.push(' ');
        sql.push_str(GROUP_BY);
        if !group_clauses.is_empty() {
            sql.push_str(" HAVING ");
            sql.push_str(&group_clauses.join(" AND "));
        }
        sql.push(' ');
        sql.push_str(ORDER_BY);

        params.push(SqlParam::Int(i64::from(limit)));
        sql.push_str(&format!(" LIMIT ${}", params.len()));

        Self { sql, params }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// Attach the parameters to a sqlx query built from [`Self::sql`].
    pub fn bind<'q, O>(
        &'q self,
        mut query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for param in &self.params {
            query = match param {
                SqlParam::Text(s) => query.bind(s.as_str()),
                SqlParam::Int(i) => query.bind(*i),
                SqlParam::Float(f) => query.bind(*f),
            };
        }
        query
    }
}

/// `%value%` with LIKE metacharacters escaped, so the value matches literally.
fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
