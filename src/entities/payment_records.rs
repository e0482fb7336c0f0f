use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status string the processor reports for a settled payment.
pub const APPROVED_STATUS: &str = "approved";

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "payment_product_kind"
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentProductKind {
    #[sea_orm(string_value = "ceremony")]
    Ceremony,
    #[sea_orm(string_value = "course")]
    Course,
    #[sea_orm(string_value = "product")]
    Product,
}

impl PaymentProductKind {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentProductKind::Ceremony => "Cerimônia",
            PaymentProductKind::Course => "Curso",
            PaymentProductKind::Product => "Produto",
        }
    }
}

/// Processor status, parsed from the free-text column.
///
/// Matching is exact, like the `status = 'approved'` filter the ledger query
/// uses; any other spelling lands in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Approved,
    Pending,
    Rejected,
    Refunded,
    Cancelled,
    Other(String),
}

impl From<&str> for PaymentStatus {
    fn from(value: &str) -> Self {
        match value {
            APPROVED_STATUS => PaymentStatus::Approved,
            "pending" | "in_process" => PaymentStatus::Pending,
            "rejected" => PaymentStatus::Rejected,
            "refunded" | "charged_back" => PaymentStatus::Refunded,
            "cancelled" | "canceled" => PaymentStatus::Cancelled,
            other => PaymentStatus::Other(other.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "payment_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub house_id: Uuid,
    pub user_id: Option<Uuid>,
    pub amount_cents: i64,
    pub status: String,
    pub paid_at: Option<DateTime<Utc>>,
    pub product_kind: PaymentProductKind,
    pub product_id: Option<Uuid>,
    pub description: Option<String>,
    pub payment_method: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Model {
    pub fn parsed_status(&self) -> PaymentStatus {
        PaymentStatus::from(self.status.as_str())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!(PaymentStatus::from("approved"), PaymentStatus::Approved);
        assert_eq!(
            PaymentStatus::from(" APPROVED "),
            PaymentStatus::Other(" APPROVED ".to_string())
        );
        assert_eq!(PaymentStatus::from("in_process"), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::from("canceled"), PaymentStatus::Cancelled);
        assert_eq!(
            PaymentStatus::from("authorized"),
            PaymentStatus::Other("authorized".to_string())
        );
    }
}
