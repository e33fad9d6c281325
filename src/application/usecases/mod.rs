pub mod cost_summary;
pub mod subscriptions;
