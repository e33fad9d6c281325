use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid user_id `{value}`: {reason}")]
pub struct InvalidFilterError {
    pub value: String,
    pub reason: String,
}

/// Selection predicate over the subscription table.
///
/// Storage adapters turn this into a parameterized query and always order the result by
/// `(user_id, service_name)` ascending.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubscriptionFilter {
    #[default]
    All,
    ByUser(Uuid),
    ByService(String),
    ByUserAndService {
        user_id: Uuid,
        service_name: String,
    },
}

impl SubscriptionFilter {
    /// Builds a filter from raw query values, where an empty string means "not set".
    pub fn build(user_id: &str, service_name: &str) -> Result<Self, InvalidFilterError> {
        let user_id = match user_id {
            "" => None,
            raw => Some(parse_user_id(raw)?),
        };

        let filter = match (user_id, service_name) {
            (Some(user_id), "") => Self::ByUser(user_id),
            (Some(user_id), service_name) => Self::ByUserAndService {
                user_id,
                service_name: service_name.to_string(),
            },
            (None, "") => Self::All,
            (None, service_name) => Self::ByService(service_name.to_string()),
        };

        Ok(filter)
    }
}

pub fn parse_user_id(raw: &str) -> Result<Uuid, InvalidFilterError> {
    Uuid::parse_str(raw).map_err(|err| InvalidFilterError {
        value: raw.to_string(),
        reason: err.to_string(),
    })
}
