use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{month_year::MonthYear, subscriptions::SubscriptionModel};

/// Inclusive `[from, to]` reporting range. `from <= to` is expected, not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub from: MonthYear,
    pub to: MonthYear,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SubscriptionCostModel {
    #[serde(flatten)]
    pub subscription: SubscriptionModel,
    pub effective_from: MonthYear,
    pub effective_to: MonthYear,
    pub cost: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SubscriptionSummaryModel {
    pub total_cost: i64,
    pub subscriptions: Vec<SubscriptionCostModel>,
}

/// Raw `/summary` query string. Absent values behave like empty strings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SummaryQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub user_id: Option<String>,
    pub service_name: Option<String>,
}
