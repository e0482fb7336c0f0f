use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Money in (`entrada`) or money out (`saida`).
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    ToSchema,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    #[sea_orm(string_value = "entrada")]
    Entrada,
    #[sea_orm(string_value = "saida")]
    Saida,
}

impl TransactionKind {
    /// Label used in exports.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Entrada => "Entrada",
            TransactionKind::Saida => "Saída",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Entrada => write!(f, "entrada"),
            TransactionKind::Saida => write!(f, "saida"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "financial_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub house_id: Uuid,
    pub kind: TransactionKind,
    pub amount_cents: i64,
    pub occurred_on: NaiveDate,
    pub category_id: Option<Uuid>,
    pub payment_method: Option<String>,
    pub description: String,
    pub notes: Option<String>,
    pub reconciled: bool,
    pub reconciled_by: Option<Uuid>,
    pub reconciled_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::financial_categories::Entity",
        from = "Column::CategoryId",
        to = "super::financial_categories::Column::Id"
    )]
    Category,
}

impl Related<super::financial_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
