pub mod month_year;
pub mod subscription_filter;
pub mod subscriptions;
pub mod summary;
