use std::{sync::Arc, time::Duration};

use diesel::{Connection, PgConnection};
use diesel_migrations::MigrationHarness;
use subscription_ledger::{
    config::config_model::Database,
    domain::{
        entities::subscriptions::InsertSubscriptionEntity,
        repositories::subscriptions::SubscriptionRepository,
        value_objects::{
            month_year::MonthYear, subscription_filter::SubscriptionFilter,
            subscriptions::SubscriptionModel,
        },
    },
    infrastructure::postgres::{
        migrations::MIGRATIONS, postgres_connection,
        repositories::subscriptions::SubscriptionPostgres,
    },
};
use uuid::Uuid;

fn database() -> Database {
    dotenvy::dotenv().ok();

    Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is required"),
        max_connections: 2,
        call_timeout: 3,
    }
}

fn repository(database: &Database) -> SubscriptionPostgres {
    let mut conn = PgConnection::establish(&database.url).expect("database should be reachable");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("migrations should apply");

    let pool = postgres_connection::establish_connection(database).expect("pool should build");
    SubscriptionPostgres::new(Arc::new(pool), Duration::from_secs(database.call_timeout))
}

fn month(raw: &str) -> MonthYear {
    raw.parse().unwrap()
}

// cargo test --test subscription_round_trip -- --ignored --nocapture
#[tokio::test]
#[ignore = "needs a running Postgres reachable through DATABASE_URL"]
async fn insert_then_fetch_returns_equal_record() {
    let repository = repository(&database());
    let user_id = Uuid::new_v4();

    let created = repository
        .insert(InsertSubscriptionEntity {
            service_name: "Yandex Plus".to_string(),
            price: 400,
            user_id,
            start_date: month("07-2025").as_date(),
            end_date: Some(month("12-2025").as_date()),
        })
        .await
        .unwrap();

    let fetched = repository
        .find_by_id(created.id)
        .await
        .unwrap()
        .expect("inserted row should be found");

    assert_eq!(fetched, created);
    let model = SubscriptionModel::from(fetched);
    assert_eq!(model.user_id, user_id);
    assert_eq!(model.start_date, month("07-2025"));
    assert_eq!(model.end_date, Some(month("12-2025")));

    assert_eq!(repository.delete_by_user_id(user_id).await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "needs a running Postgres reachable through DATABASE_URL"]
async fn update_replaces_all_fields_and_clears_end_date() {
    let repository = repository(&database());
    let user_id = Uuid::new_v4();

    let created = repository
        .insert(InsertSubscriptionEntity {
            service_name: "Netflix".to_string(),
            price: 500,
            user_id,
            start_date: month("05-2025").as_date(),
            end_date: Some(month("06-2025").as_date()),
        })
        .await
        .unwrap();

    let updated = repository
        .update(
            created.id,
            InsertSubscriptionEntity {
                service_name: "Netflix Premium".to_string(),
                price: 900,
                user_id,
                start_date: month("06-2025").as_date(),
                end_date: None,
            },
        )
        .await
        .unwrap()
        .expect("row should exist");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.service_name, "Netflix Premium");
    assert_eq!(updated.price, 900);
    assert_eq!(updated.end_date, None);

    let listed = repository
        .list(SubscriptionFilter::ByUser(user_id))
        .await
        .unwrap();
    assert_eq!(listed, vec![updated]);

    repository.delete_by_user_id(user_id).await.unwrap();
    let missing = repository
        .update(
            created.id,
            InsertSubscriptionEntity {
                service_name: "gone".to_string(),
                price: 1,
                user_id,
                start_date: month("01-2025").as_date(),
                end_date: None,
            },
        )
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
#[ignore = "needs a running Postgres reachable through DATABASE_URL"]
async fn list_orders_by_user_then_service() {
    let repository = repository(&database());
    let first_user = Uuid::from_u128(1);
    let second_user = Uuid::from_u128(2);
    repository.delete_by_user_id(first_user).await.unwrap();
    repository.delete_by_user_id(second_user).await.unwrap();

    for (user_id, service_name) in [
        (second_user, "Apple Music"),
        (first_user, "Spotify Premium"),
        (first_user, "Amazon Prime"),
    ] {
        repository
            .insert(InsertSubscriptionEntity {
                service_name: service_name.to_string(),
                price: 100,
                user_id,
                start_date: month("01-2025").as_date(),
                end_date: None,
            })
            .await
            .unwrap();
    }

    let rows = repository.list(SubscriptionFilter::All).await.unwrap();
    let ours: Vec<(Uuid, String)> = rows
        .into_iter()
        .filter(|row| row.user_id == first_user || row.user_id == second_user)
        .map(|row| (row.user_id, row.service_name))
        .collect();

    assert_eq!(
        ours,
        vec![
            (first_user, "Amazon Prime".to_string()),
            (first_user, "Spotify Premium".to_string()),
            (second_user, "Apple Music".to_string()),
        ]
    );

    repository.delete_by_user_id(first_user).await.unwrap();
    repository.delete_by_user_id(second_user).await.unwrap();
}
