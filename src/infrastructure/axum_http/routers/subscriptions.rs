use std::{sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tracing::info;

use crate::{
    application::usecases::subscriptions::SubscriptionUseCase,
    config::config_model::DotEnvyConfig,
    domain::{
        repositories::subscriptions::SubscriptionRepository,
        value_objects::{subscriptions::InsertSubscriptionModel, summary::SummaryQuery},
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad, repositories::subscriptions::SubscriptionPostgres,
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let subscriptions_repository = SubscriptionPostgres::new(
        Arc::clone(&db_pool),
        Duration::from_secs(config.database.call_timeout),
    );
    let subscriptions_usecase = SubscriptionUseCase::new(Arc::new(subscriptions_repository));

    router(Arc::new(subscriptions_usecase))
}

pub fn router<T>(subscriptions_usecase: Arc<SubscriptionUseCase<T>>) -> Router
where
    T: SubscriptionRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/all", get(list_all::<T>))
        .route("/newrecord", post(create::<T>))
        .route("/summary", get(summary::<T>))
        .route(
            "/:id",
            get(get_by_id::<T>)
                .put(update::<T>)
                .delete(delete_by_id::<T>),
        )
        .route(
            "/user/:id",
            get(list_by_user::<T>).delete(delete_by_user::<T>),
        )
        .route(
            "/service/:name",
            get(list_by_service::<T>).delete(delete_by_service::<T>),
        )
        .with_state(subscriptions_usecase)
}

pub async fn list_all<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
) -> impl IntoResponse
where
    T: SubscriptionRepository + Send + Sync,
{
    match subscriptions_usecase.list_all().await {
        Ok(subscriptions) => Json(subscriptions).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_by_id<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
    Path(id): Path<i32>,
) -> impl IntoResponse
where
    T: SubscriptionRepository + Send + Sync,
{
    match subscriptions_usecase.get_by_id(id).await {
        Ok(subscription) => Json(subscription).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_by_user<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse
where
    T: SubscriptionRepository + Send + Sync,
{
    match subscriptions_usecase.list_by_user(&user_id).await {
        Ok(subscriptions) => Json(json!({ "data": subscriptions })).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_by_service<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
    Path(service_name): Path<String>,
) -> impl IntoResponse
where
    T: SubscriptionRepository + Send + Sync,
{
    match subscriptions_usecase.list_by_service(&service_name).await {
        Ok(subscriptions) => Json(json!({ "data": subscriptions })).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
    Json(insert_subscription_model): Json<InsertSubscriptionModel>,
) -> impl IntoResponse
where
    T: SubscriptionRepository + Send + Sync,
{
    info!(
        user_id = %insert_subscription_model.user_id,
        "subscriptions: create request received"
    );

    match subscriptions_usecase.create(insert_subscription_model).await {
        Ok(subscription) => (StatusCode::CREATED, Json(subscription)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
    Path(id): Path<i32>,
    Json(update_subscription_model): Json<InsertSubscriptionModel>,
) -> impl IntoResponse
where
    T: SubscriptionRepository + Send + Sync,
{
    match subscriptions_usecase
        .update(id, update_subscription_model)
        .await
    {
        Ok(subscription) => Json(subscription).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_by_id<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
    Path(id): Path<i32>,
) -> impl IntoResponse
where
    T: SubscriptionRepository + Send + Sync,
{
    match subscriptions_usecase.delete_by_id(id).await {
        Ok(()) => Json(json!({
            "message": "Successfully deleted record about the subscription"
        }))
        .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_by_user<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse
where
    T: SubscriptionRepository + Send + Sync,
{
    match subscriptions_usecase.delete_by_user(&user_id).await {
        Ok(deleted) => Json(json!({
            "message": "Successfully deleted subscriptions of the user",
            "deleted": deleted,
        }))
        .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_by_service<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
    Path(service_name): Path<String>,
) -> impl IntoResponse
where
    T: SubscriptionRepository + Send + Sync,
{
    match subscriptions_usecase.delete_by_service(&service_name).await {
        Ok(deleted) => Json(json!({
            "message": "Successfully deleted subscriptions of the service",
            "deleted": deleted,
        }))
        .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn summary<T>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<T>>>,
    Query(query): Query<SummaryQuery>,
) -> impl IntoResponse
where
    T: SubscriptionRepository + Send + Sync,
{
    match subscriptions_usecase.summary(query).await {
        Ok(summary) => Json(summary).into_response(),
        Err(err) => err.into_response(),
    }
}
