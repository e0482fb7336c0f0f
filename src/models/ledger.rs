use super::common::deserialize_some;
use crate::entities::{PaymentProductKind, TransactionKind, category_entity};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Where a ledger line came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LedgerSource {
    Manual,
    External,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct CategoryRef {
    pub id: Option<Uuid>,
    pub name: String,
    pub color: String,
}

/// One row of the unified cash-flow view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub source: LedgerSource,
    pub kind: TransactionKind,
    pub amount_cents: i64,
    #[schema(example = "2025-03-14")]
    pub date: NaiveDate,
    pub description: String,
    pub category: Option<CategoryRef>,
    pub payment_method: Option<String>,
    pub product_kind: Option<PaymentProductKind>,
    pub reconciled: bool,
    pub reconciled_by: Option<Uuid>,
    pub reconciled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct PeriodTotals {
    pub manual_entradas: i64,
    pub external_entradas: i64,
    pub entradas: i64,
    pub saidas: i64,
    pub saldo: i64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct MonthlyBucket {
    /// 1..=12
    pub month: u32,
    pub entradas: i64,
    pub saidas: i64,
    pub saldo: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MonthlySummaryResponse {
    pub year: i32,
    pub months: Vec<MonthlyBucket>,
    pub totals: PeriodTotals,
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct LedgerRange {
    #[schema(example = "2025-01-01")]
    pub start: NaiveDate,
    #[schema(example = "2025-01-31")]
    pub end: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MonthlyQuery {
    pub year: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    pub kind: TransactionKind,
    #[schema(example = 15000)]
    pub amount_cents: i64,
    #[schema(example = "2025-03-14")]
    pub occurred_on: NaiveDate,
    pub category_id: Option<Uuid>,
    #[schema(example = "pix")]
    pub payment_method: Option<String>,
    #[schema(example = "Compra de velas")]
    pub description: String,
    pub notes: Option<String>,
}

/// Partial update. For `category_id`, `payment_method` and `notes` an omitted
/// field is left alone and an explicit `null` clears the column.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTransactionRequest {
    pub amount_cents: Option<i64>,
    pub occurred_on: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<Uuid>)]
    pub category_id: Option<Option<Uuid>>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub payment_method: Option<Option<String>>,
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BulkReconcileRequest {
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BulkReconcileResponse {
    pub updated: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub kind: TransactionKind,
    pub color: String,
    pub is_active: bool,
}

impl From<category_entity::Model> for CategoryResponse {
    fn from(m: category_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            kind: m.kind,
            color: m.color,
            is_active: m.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryQuery {
    pub kind: Option<TransactionKind>,
    pub only_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    #[schema(example = "Doações")]
    pub name: String,
    pub kind: TransactionKind,
    #[schema(example = "#10B981")]
    pub color: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub color: Option<String>,
}
