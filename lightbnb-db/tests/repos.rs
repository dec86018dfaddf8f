//! Repository tests against a live PostgreSQL
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p lightbnb-db -- --ignored

mod common;

use std::collections::HashSet;

use chrono::NaiveDate;
use lightbnb_db::{
    DbError, ListingStore, PropertyFilter, PropertyRepo, ReservationRepo, UserRepo,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
#[ignore = "requires database"]
async fn user_round_trip_by_id_and_email() {
    let pool = common::pool().await;
    let repo = UserRepo::new(&pool);

    let new_user = common::new_user();
    let user = repo.add(&new_user).await.unwrap();
    assert_eq!(user.email, new_user.email());

    let by_id = repo.get_with_id(user.id).await.unwrap();
    assert_eq!(by_id, user);

    let by_email = repo.get_with_email(new_user.email()).await.unwrap();
    assert_eq!(by_email, user);
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_email_is_conflict() {
    let pool = common::pool().await;
    let repo = UserRepo::new(&pool);

    let new_user = common::new_user();
    repo.add(&new_user).await.unwrap();

    let err = repo.add(&new_user).await.unwrap_err();
    assert!(err.is_conflict(), "expected conflict, got {err}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires database"]
async fn concurrent_adds_with_one_email_insert_once() {
    let pool = common::pool().await;

    for _ in 0..10 {
        let new_user = common::new_user();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = pool.clone();
                let new_user = new_user.clone();
                tokio::spawn(async move { UserRepo::new(&pool).add(&new_user).await })
            })
            .collect();

        let mut inserted = 0;
        for handle in handles {
            match handle.await.expect("task panicked") {
                Ok(_) => inserted += 1,
                Err(e) => assert!(e.is_conflict(), "expected conflict, got {e}"),
            }
        }
        assert_eq!(inserted, 1);

        let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(new_user.email())
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn missing_user_is_not_found() {
    let pool = common::pool().await;
    let repo = UserRepo::new(&pool);

    let err = repo.get_with_id(-1).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "user", .. }));

    let err = repo
        .get_with_email(&format!("nobody-{}@example.com", common::unique()))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore = "requires database"]
async fn inserted_property_found_by_owner() {
    let pool = common::pool().await;
    let owner = common::insert_user(&pool).await;
    let repo = PropertyRepo::new(&pool);

    let new_property = common::new_property(owner.id, "Denver", 12_500);
    let stored = repo.add(&new_property).await.unwrap();
    assert!(stored.active);

    let rows = repo
        .search(&PropertyFilter::new().owner_id(owner.id), 10)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);

    let found = &rows[0].property;
    assert_eq!(found, &stored);
    assert_eq!(found.title, new_property.title);
    assert_eq!(found.cost_per_night, new_property.cost_per_night);
    assert_eq!(found.city, new_property.city);
    assert_eq!(rows[0].average_rating, None);
}

#[tokio::test]
#[ignore = "requires database"]
async fn property_with_unknown_owner_is_storage_error() {
    let pool = common::pool().await;
    let repo = PropertyRepo::new(&pool);

    let err = repo
        .add(&common::new_property(-1, "Nowhere", 100))
        .await
        .unwrap_err();
    assert!(err.is_storage(), "expected foreign key failure, got {err}");
}

#[tokio::test]
#[ignore = "requires database"]
async fn invalid_property_rejected_before_query() {
    let pool = common::pool().await;
    let repo = PropertyRepo::new(&pool);

    let mut property = common::new_property(1, "Denver", 100);
    property.title.clear();
    let err = repo.add(&property).await.unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));
}

#[tokio::test]
#[ignore = "requires database"]
async fn unfiltered_search_respects_limit_and_dedupes() {
    let pool = common::pool().await;
    let owner = common::insert_user(&pool).await;
    let guest = common::insert_user(&pool).await;
    let repo = PropertyRepo::new(&pool);

    // Several reviews on one property must still yield one row
    let property = repo
        .add(&common::new_property(owner.id, "Dedupe", 1))
        .await
        .unwrap();
    for day in 1..=3 {
        common::reserve_and_review(&pool, &guest, &property, date(2024, 1, day * 5), 5).await;
    }

    let rows = repo.search(&PropertyFilter::default(), 50).await.unwrap();
    assert!(rows.len() <= 50);

    let ids: HashSet<_> = rows.iter().map(|r| r.property.id).collect();
    assert_eq!(ids.len(), rows.len(), "duplicate property rows");

    let costs: Vec<_> = rows.iter().map(|r| r.property.cost_per_night).collect();
    let mut sorted = costs.clone();
    sorted.sort();
    assert_eq!(costs, sorted, "not ordered by ascending cost");
}

#[tokio::test]
#[ignore = "requires database"]
async fn city_filter_is_substring_match() {
    let pool = common::pool().await;
    let owner = common::insert_user(&pool).await;
    let repo = PropertyRepo::new(&pool);

    repo.add(&common::new_property(owner.id, "Ogden", 100)).await.unwrap();
    repo.add(&common::new_property(owner.id, "Boston", 100)).await.unwrap();

    let rows = repo
        .search(&PropertyFilter::new().city("den").owner_id(owner.id), 10)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows.iter().all(|r| r.property.city.contains("den")));

    // Case-sensitive
    let rows = repo
        .search(&PropertyFilter::new().city("DEN").owner_id(owner.id), 10)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn price_filter_bounds_in_cents() {
    let pool = common::pool().await;
    let owner = common::insert_user(&pool).await;
    let repo = PropertyRepo::new(&pool);

    for cost in [4_999, 5_000, 10_000, 15_000, 15_001] {
        repo.add(&common::new_property(owner.id, "Priceville", cost))
            .await
            .unwrap();
    }

    let filter = PropertyFilter::new()
        .owner_id(owner.id)
        .minimum_price(50.0)
        .maximum_price(150.0);
    let rows = repo.search(&filter, 10).await.unwrap();

    let costs: Vec<_> = rows.iter().map(|r| r.property.cost_per_night).collect();
    assert_eq!(costs, vec![5_000, 10_000, 15_000]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn minimum_rating_filters_on_average() {
    let pool = common::pool().await;
    let owner = common::insert_user(&pool).await;
    let guest = common::insert_user(&pool).await;
    let repo = PropertyRepo::new(&pool);

    let good = repo.add(&common::new_property(owner.id, "Rated", 100)).await.unwrap();
    let poor = repo.add(&common::new_property(owner.id, "Rated", 200)).await.unwrap();
    common::reserve_and_review(&pool, &guest, &good, date(2024, 2, 1), 5).await;
    common::reserve_and_review(&pool, &guest, &good, date(2024, 3, 1), 4).await;
    common::reserve_and_review(&pool, &guest, &poor, date(2024, 4, 1), 2).await;

    let filter = PropertyFilter::new().owner_id(owner.id).minimum_rating(4.0);
    let rows = repo.search(&filter, 10).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].property.id, good.id);
    assert!(rows.iter().all(|r| r.average_rating.unwrap_or(0.0) >= 4.0));
    assert_eq!(rows[0].average_rating, Some(4.5));
}

#[tokio::test]
#[ignore = "requires database"]
async fn listing_store_trait_object() {
    let pool = common::pool().await;
    let owner = common::insert_user(&pool).await;
    let repo = PropertyRepo::new(&pool);
    let store: &dyn ListingStore = &repo;

    let stored = store
        .add_property(&common::new_property(owner.id, "Traitville", 300))
        .await
        .unwrap();
    let rows = store
        .search(&PropertyFilter::new().owner_id(owner.id), 10)
        .await
        .unwrap();
    assert_eq!(rows[0].property.id, stored.id);
}

#[tokio::test]
#[ignore = "requires database"]
async fn reservations_for_guest_in_start_order() {
    let pool = common::pool().await;
    let owner = common::insert_user(&pool).await;
    let guest = common::insert_user(&pool).await;
    let properties = PropertyRepo::new(&pool);

    let a = properties.add(&common::new_property(owner.id, "A", 100)).await.unwrap();
    let b = properties.add(&common::new_property(owner.id, "B", 200)).await.unwrap();
    common::reserve_and_review(&pool, &guest, &b, date(2024, 6, 1), 3).await;
    common::reserve_and_review(&pool, &guest, &a, date(2024, 5, 1), 5).await;

    let repo = ReservationRepo::new(&pool);
    let reservations = repo.list_for_guest(guest.id, 10).await.unwrap();

    assert_eq!(reservations.len(), 2);
    assert_eq!(reservations[0].property.id, a.id);
    assert_eq!(reservations[0].start_date, date(2024, 5, 1));
    assert_eq!(reservations[0].nights(), 3);
    assert_eq!(reservations[1].property.id, b.id);
    assert_eq!(reservations[1].average_rating, Some(3.0));

    let limited = repo.list_for_guest(guest.id, 1).await.unwrap();
    assert_eq!(limited.len(), 1);

    let none = repo.list_for_guest(owner.id, 10).await.unwrap();
    assert!(none.is_empty());
}
