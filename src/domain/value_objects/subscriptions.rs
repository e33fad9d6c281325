use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    value_objects::month_year::{MonthYear, MonthYearParseError},
};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SubscriptionModel {
    pub id: i32,
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: MonthYear,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<MonthYear>,
}

impl From<SubscriptionEntity> for SubscriptionModel {
    fn from(value: SubscriptionEntity) -> Self {
        Self {
            id: value.id,
            service_name: value.service_name,
            price: value.price,
            user_id: value.user_id,
            start_date: MonthYear::from_date(value.start_date),
            end_date: value.end_date.map(MonthYear::from_date),
        }
    }
}

/// Request body for create and full update. Dates arrive as `MM-YYYY`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct InsertSubscriptionModel {
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl InsertSubscriptionModel {
    /// Parses the month-year fields. A missing, null or empty `end_date` means open-ended.
    pub fn to_entity(&self) -> Result<InsertSubscriptionEntity, MonthYearParseError> {
        let start_date: MonthYear = self.start_date.parse()?;
        let end_date = match self.end_date.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<MonthYear>()?),
        };

        Ok(InsertSubscriptionEntity {
            service_name: self.service_name.clone(),
            price: self.price,
            user_id: self.user_id,
            start_date: start_date.as_date(),
            end_date: end_date.map(|end| end.as_date()),
        })
    }
}
