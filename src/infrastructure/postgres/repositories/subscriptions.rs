use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use diesel::{PgConnection, RunQueryDsl, delete, insert_into, prelude::*, update};
use std::{sync::Arc, time::Duration};
use tokio::{task, time::timeout};
use uuid::Uuid;

use crate::{
    domain::{
        entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
        repositories::subscriptions::SubscriptionRepository,
        value_objects::subscription_filter::SubscriptionFilter,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::subscriptions},
};

pub struct SubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
    call_timeout: Duration,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>, call_timeout: Duration) -> Self {
        Self {
            db_pool,
            call_timeout,
        }
    }

    /// Runs `query` on the blocking pool with a pooled connection, bounded by `call_timeout`.
    async fn run<R, F>(&self, operation: &'static str, query: F) -> Result<R>
    where
        F: FnOnce(&mut PgConnection) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        // Diesel is synchronous; keep it off the async workers.
        let db_pool = Arc::clone(&self.db_pool);
        let handle = task::spawn_blocking(move || -> Result<R> {
            let mut conn = db_pool.get()?;
            query(&mut conn)
        });

        match timeout(self.call_timeout, handle).await {
            Ok(joined) => joined.with_context(|| format!("{operation}: storage task aborted"))?,
            Err(_) => bail!(
                "{operation}: storage call timed out after {:?}",
                self.call_timeout
            ),
        }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn list(&self, filter: SubscriptionFilter) -> Result<Vec<SubscriptionEntity>> {
        self.run("list subscriptions", move |conn| {
            let mut query = subscriptions::table
                .select(SubscriptionEntity::as_select())
                .into_boxed();

            query = match filter {
                SubscriptionFilter::All => query,
                SubscriptionFilter::ByUser(user_id) => {
                    query.filter(subscriptions::user_id.eq(user_id))
                }
                SubscriptionFilter::ByService(service_name) => {
                    query.filter(subscriptions::service_name.eq(service_name))
                }
                SubscriptionFilter::ByUserAndService {
                    user_id,
                    service_name,
                } => query
                    .filter(subscriptions::user_id.eq(user_id))
                    .filter(subscriptions::service_name.eq(service_name)),
            };

            let results = query
                .order((
                    subscriptions::user_id.asc(),
                    subscriptions::service_name.asc(),
                    subscriptions::id.asc(),
                ))
                .load::<SubscriptionEntity>(conn)?;

            Ok(results)
        })
        .await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<SubscriptionEntity>> {
        self.run("find subscription", move |conn| {
            let result = subscriptions::table
                .find(id)
                .select(SubscriptionEntity::as_select())
                .first::<SubscriptionEntity>(conn)
                .optional()?;

            Ok(result)
        })
        .await
    }

    async fn insert(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity> {
        self.run("insert subscription", move |conn| {
            let result = insert_into(subscriptions::table)
                .values(&insert_subscription_entity)
                .returning(SubscriptionEntity::as_returning())
                .get_result::<SubscriptionEntity>(conn)?;

            Ok(result)
        })
        .await
    }

    async fn update(
        &self,
        id: i32,
        update_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<Option<SubscriptionEntity>> {
        self.run("update subscription", move |conn| {
            let result = update(subscriptions::table.find(id))
                .set(&update_subscription_entity)
                .returning(SubscriptionEntity::as_returning())
                .get_result::<SubscriptionEntity>(conn)
                .optional()?;

            Ok(result)
        })
        .await
    }

    async fn delete_by_id(&self, id: i32) -> Result<usize> {
        self.run("delete subscription", move |conn| {
            let deleted = delete(subscriptions::table.find(id)).execute(conn)?;
            Ok(deleted)
        })
        .await
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<usize> {
        self.run("delete subscriptions by user", move |conn| {
            let deleted = delete(subscriptions::table.filter(subscriptions::user_id.eq(user_id)))
                .execute(conn)?;
            Ok(deleted)
        })
        .await
    }

    async fn delete_by_service_name(&self, service_name: String) -> Result<usize> {
        self.run("delete subscriptions by service", move |conn| {
            let deleted = delete(
                subscriptions::table.filter(subscriptions::service_name.eq(service_name)),
            )
            .execute(conn)?;
            Ok(deleted)
        })
        .await
    }
}
