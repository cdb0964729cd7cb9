use chrono::{DateTime, Utc};
use serde::Serialize;

/// Last known address of one hostname, plus who reported it and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub hostname: String,
    pub ip: String,
    pub last_update: DateTime<Utc>,
    pub user_agent: String,
    pub updated_by: String,
    pub method: String,
}
