use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A member's enrollment joined with the ceremony it points at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct HistoryItem {
    pub enrollment_id: Uuid,
    pub ceremony_id: Uuid,
    pub title: String,
    pub ceremony_date: NaiveDate,
    pub medicine: Option<String>,
    pub paid: bool,
    pub cancelled: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct HistoryStats {
    pub total: u64,
    pub first: Option<NaiveDate>,
    pub last: Option<NaiveDate>,
    pub medicines: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub page: Option<u32>,
}
