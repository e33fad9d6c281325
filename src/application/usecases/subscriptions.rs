use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::application::usecases::cost_summary;
use crate::domain::{
    repositories::subscriptions::SubscriptionRepository,
    value_objects::{
        month_year::{MonthYear, MonthYearParseError},
        subscription_filter::{InvalidFilterError, SubscriptionFilter, parse_user_id},
        subscriptions::{InsertSubscriptionModel, SubscriptionModel},
        summary::{ReportWindow, SubscriptionSummaryModel, SummaryQuery},
    },
};

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error(transparent)]
    InvalidFilter(#[from] InvalidFilterError),
    #[error("{0}")]
    InvalidDateFormat(String),
    #[error("invalid subscription: {0}")]
    InvalidPayload(String),
    #[error("subscription not found")]
    NotFound,
    #[error("storage failure")]
    StorageFailure(#[from] anyhow::Error),
}

impl From<MonthYearParseError> for SubscriptionError {
    fn from(value: MonthYearParseError) -> Self {
        SubscriptionError::InvalidDateFormat(value.to_string())
    }
}

impl SubscriptionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SubscriptionError::InvalidFilter(_)
            | SubscriptionError::InvalidDateFormat(_)
            | SubscriptionError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            SubscriptionError::NotFound => StatusCode::NOT_FOUND,
            SubscriptionError::StorageFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionError>;

pub struct SubscriptionUseCase<T>
where
    T: SubscriptionRepository + Send + Sync,
{
    subscription_repository: Arc<T>,
}

impl<T> SubscriptionUseCase<T>
where
    T: SubscriptionRepository + Send + Sync,
{
    pub fn new(subscription_repository: Arc<T>) -> Self {
        Self {
            subscription_repository,
        }
    }

    pub async fn list_all(&self) -> UseCaseResult<Vec<SubscriptionModel>> {
        info!("subscriptions: listing all records");
        self.load(SubscriptionFilter::All).await
    }

    pub async fn get_by_id(&self, id: i32) -> UseCaseResult<SubscriptionModel> {
        info!(id, "subscriptions: loading record");

        let entity = self
            .subscription_repository
            .find_by_id(id)
            .await
            .map_err(|err| storage_failure(err, "failed to load record"))?;

        match entity {
            Some(entity) => Ok(entity.into()),
            None => {
                warn!(id, "subscriptions: record not found");
                Err(SubscriptionError::NotFound)
            }
        }
    }

    pub async fn list_by_user(&self, user_id: &str) -> UseCaseResult<Vec<SubscriptionModel>> {
        let user_id = parse_user_id(user_id).inspect_err(|err| {
            warn!(error = %err, "subscriptions: rejected user id");
        })?;
        info!(%user_id, "subscriptions: listing records for user");

        non_empty(self.load(SubscriptionFilter::ByUser(user_id)).await?)
    }

    pub async fn list_by_service(
        &self,
        service_name: &str,
    ) -> UseCaseResult<Vec<SubscriptionModel>> {
        info!(service_name, "subscriptions: listing records for service");

        non_empty(
            self.load(SubscriptionFilter::ByService(service_name.to_string()))
                .await?,
        )
    }

    pub async fn create(
        &self,
        insert_subscription_model: InsertSubscriptionModel,
    ) -> UseCaseResult<SubscriptionModel> {
        validate_payload(&insert_subscription_model)?;
        let insert_subscription_entity = insert_subscription_model.to_entity()?;

        let created = self
            .subscription_repository
            .insert(insert_subscription_entity)
            .await
            .map_err(|err| storage_failure(err, "failed to insert record"))?;
        let created = SubscriptionModel::from(created);

        info!(
            id = created.id,
            user_id = %created.user_id,
            service_name = created.service_name.as_str(),
            "subscriptions: record created"
        );
        Ok(created)
    }

    pub async fn update(
        &self,
        id: i32,
        update_subscription_model: InsertSubscriptionModel,
    ) -> UseCaseResult<SubscriptionModel> {
        validate_payload(&update_subscription_model)?;
        let update_subscription_entity = update_subscription_model.to_entity()?;

        let updated = self
            .subscription_repository
            .update(id, update_subscription_entity)
            .await
            .map_err(|err| storage_failure(err, "failed to update record"))?;

        match updated {
            Some(entity) => {
                info!(id, "subscriptions: record updated");
                Ok(entity.into())
            }
            None => {
                warn!(id, "subscriptions: update target not found");
                Err(SubscriptionError::NotFound)
            }
        }
    }

    pub async fn delete_by_id(&self, id: i32) -> UseCaseResult<()> {
        let deleted = self
            .subscription_repository
            .delete_by_id(id)
            .await
            .map_err(|err| storage_failure(err, "failed to delete record"))?;

        ensure_deleted(deleted)?;
        info!(id, "subscriptions: record deleted");
        Ok(())
    }

    pub async fn delete_by_user(&self, user_id: &str) -> UseCaseResult<usize> {
        let user_id = parse_user_id(user_id)?;

        let deleted = self
            .subscription_repository
            .delete_by_user_id(user_id)
            .await
            .map_err(|err| storage_failure(err, "failed to delete records for user"))?;

        ensure_deleted(deleted)?;
        info!(%user_id, deleted, "subscriptions: user records deleted");
        Ok(deleted)
    }

    pub async fn delete_by_service(&self, service_name: &str) -> UseCaseResult<usize> {
        let deleted = self
            .subscription_repository
            .delete_by_service_name(service_name.to_string())
            .await
            .map_err(|err| storage_failure(err, "failed to delete records for service"))?;

        ensure_deleted(deleted)?;
        info!(service_name, deleted, "subscriptions: service records deleted");
        Ok(deleted)
    }

    pub async fn summary(&self, query: SummaryQuery) -> UseCaseResult<SubscriptionSummaryModel> {
        let window = parse_window(&query).inspect_err(|err| {
            warn!(error = %err, "subscriptions: rejected summary window");
        })?;

        let filter = SubscriptionFilter::build(
            query.user_id.as_deref().unwrap_or_default(),
            query.service_name.as_deref().unwrap_or_default(),
        )
        .inspect_err(|err| {
            warn!(error = %err, "subscriptions: rejected summary filter");
        })?;

        info!(
            from = %window.from,
            to = %window.to,
            filter = ?filter,
            "subscriptions: computing summary"
        );

        let subscriptions = self.load(filter).await?;
        let summary = cost_summary::summarize(window, &subscriptions);

        info!(
            records = summary.subscriptions.len(),
            total_cost = summary.total_cost,
            "subscriptions: summary computed"
        );
        Ok(summary)
    }

    async fn load(&self, filter: SubscriptionFilter) -> UseCaseResult<Vec<SubscriptionModel>> {
        let entities = self
            .subscription_repository
            .list(filter)
            .await
            .map_err(|err| storage_failure(err, "failed to list records"))?;

        Ok(entities.into_iter().map(SubscriptionModel::from).collect())
    }
}

fn parse_window(query: &SummaryQuery) -> UseCaseResult<ReportWindow> {
    let (Some(from), Some(to)) = (
        query.from.as_deref().filter(|raw| !raw.is_empty()),
        query.to.as_deref().filter(|raw| !raw.is_empty()),
    ) else {
        return Err(SubscriptionError::InvalidDateFormat(
            "from and to parameters are required".to_string(),
        ));
    };

    let from: MonthYear = from.parse()?;
    let to: MonthYear = to.parse()?;
    Ok(ReportWindow { from, to })
}

fn validate_payload(model: &InsertSubscriptionModel) -> UseCaseResult<()> {
    if model.service_name.trim().is_empty() {
        return Err(SubscriptionError::InvalidPayload(
            "service_name must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn non_empty(subscriptions: Vec<SubscriptionModel>) -> UseCaseResult<Vec<SubscriptionModel>> {
    if subscriptions.is_empty() {
        warn!("subscriptions: lookup matched no records");
        return Err(SubscriptionError::NotFound);
    }
    Ok(subscriptions)
}

fn ensure_deleted(deleted: usize) -> UseCaseResult<()> {
    if deleted == 0 {
        return Err(SubscriptionError::NotFound);
    }
    Ok(())
}

fn storage_failure(err: anyhow::Error, context: &'static str) -> SubscriptionError {
    error!(db_error = ?err, "subscriptions: {context}");
    SubscriptionError::StorageFailure(err)
}
