use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    value_objects::subscription_filter::SubscriptionFilter,
};

#[automock]
#[async_trait]
pub trait SubscriptionRepository {
    /// Rows matching `filter`, ordered by `(user_id, service_name)`.
    async fn list(&self, filter: SubscriptionFilter) -> Result<Vec<SubscriptionEntity>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<SubscriptionEntity>>;

    async fn insert(&self, insert_subscription_entity: InsertSubscriptionEntity)
    -> Result<SubscriptionEntity>;

    /// Replaces every column of row `id`. `None` when no such row exists.
    async fn update(
        &self,
        id: i32,
        update_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<Option<SubscriptionEntity>>;

    async fn delete_by_id(&self, id: i32) -> Result<usize>;

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<usize>;

    async fn delete_by_service_name(&self, service_name: String) -> Result<usize>;
}
