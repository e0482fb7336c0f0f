use crate::aggregates::{
    ledger_to_csv, merge_entries, monthly_buckets, period_totals, year_range,
};
use crate::aggregates::ledger::manual_entry;
use crate::context::AuthContext;
use crate::entities::{
    APPROVED_STATUS, TransactionKind, category_entity as cat, payment_record_entity as pr,
    transaction_entity as tx,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct CashFlowService {
    pool: DatabaseConnection,
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn validate_range(range: &LedgerRange) -> AppResult<()> {
    if range.start > range.end {
        return Err(AppError::ValidationError(
            "start must not be after end".to_string(),
        ));
    }
    Ok(())
}

fn validate_amount(amount_cents: i64) -> AppResult<()> {
    if amount_cents <= 0 {
        return Err(AppError::ValidationError(
            "amount_cents must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Flips the reconciled flag and keeps the audit columns consistent with it.
pub fn reconciliation_update(
    model: tx::Model,
    admin_id: Uuid,
    now: DateTime<Utc>,
) -> tx::ActiveModel {
    let reconciled = !model.reconciled;
    let mut am = model.into_active_model();
    am.reconciled = Set(reconciled);
    am.reconciled_by = Set(reconciled.then_some(admin_id));
    am.reconciled_at = Set(reconciled.then_some(now));
    am.updated_at = Set(Some(now));
    am
}

/// Applies a partial update. Absent fields are kept; an explicit `null`
/// clears `category_id`, `payment_method` or `notes`.
pub fn apply_transaction_update(
    model: tx::Model,
    req: UpdateTransactionRequest,
    now: DateTime<Utc>,
) -> AppResult<tx::ActiveModel> {
    let mut am = model.into_active_model();
    if let Some(amount) = req.amount_cents {
        validate_amount(amount)?;
        am.amount_cents = Set(amount);
    }
    if let Some(date) = req.occurred_on {
        am.occurred_on = Set(date);
    }
    if let Some(category_id) = req.category_id {
        am.category_id = Set(category_id);
    }
    if let Some(method) = req.payment_method {
        am.payment_method = Set(method);
    }
    if let Some(description) = req.description {
        if description.trim().is_empty() {
            return Err(AppError::ValidationError(
                "description must not be empty".to_string(),
            ));
        }
        am.description = Set(description.trim().to_string());
    }
    if let Some(notes) = req.notes {
        am.notes = Set(notes);
    }
    am.updated_at = Set(Some(now));
    Ok(am)
}

impl CashFlowService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    async fn fetch_manual(
        &self,
        house_id: Uuid,
        range: &LedgerRange,
    ) -> AppResult<Vec<(tx::Model, Option<cat::Model>)>> {
        let rows = tx::Entity::find()
            .find_also_related(cat::Entity)
            .filter(tx::Column::HouseId.eq(house_id))
            .filter(tx::Column::OccurredOn.between(range.start, range.end))
            .order_by_desc(tx::Column::OccurredOn)
            .all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn fetch_external(&self, house_id: Uuid, range: &LedgerRange) -> AppResult<Vec<pr::Model>> {
        let end_exclusive = range
            .end
            .succ_opt()
            .map(start_of_day)
            .ok_or_else(|| AppError::ValidationError("end date out of range".to_string()))?;

        let rows = pr::Entity::find()
            .filter(pr::Column::HouseId.eq(house_id))
            .filter(pr::Column::Status.eq(APPROVED_STATUS))
            .filter(pr::Column::PaidAt.gte(start_of_day(range.start)))
            .filter(pr::Column::PaidAt.lt(end_exclusive))
            .order_by_desc(pr::Column::PaidAt)
            .all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Manual transactions and approved processor payments, newest first.
    ///
    /// Admins only; the other ledger reads go through here.
    pub async fn list_entries(
        &self,
        ctx: &AuthContext,
        range: &LedgerRange,
    ) -> AppResult<Vec<LedgerEntry>> {
        ctx.require_admin()?;
        let Some(house_id) = ctx.house_id else {
            return Ok(Vec::new());
        };
        validate_range(range)?;

        let (manual, external) = tokio::try_join!(
            self.fetch_manual(house_id, range),
            self.fetch_external(house_id, range)
        )?;
        Ok(merge_entries(manual, external))
    }

    pub async fn period_totals(
        &self,
        ctx: &AuthContext,
        range: &LedgerRange,
    ) -> AppResult<PeriodTotals> {
        let entries = self.list_entries(ctx, range).await?;
        Ok(period_totals(&entries))
    }

    pub async fn monthly_summary(
        &self,
        ctx: &AuthContext,
        year: i32,
    ) -> AppResult<MonthlySummaryResponse> {
        let (start, end) = year_range(year)
            .ok_or_else(|| AppError::ValidationError(format!("Invalid year: {year}")))?;
        let entries = self.list_entries(ctx, &LedgerRange { start, end }).await?;

        Ok(MonthlySummaryResponse {
            year,
            months: monthly_buckets(&entries, year).to_vec(),
            totals: period_totals(&entries),
        })
    }

    pub async fn export_csv(&self, ctx: &AuthContext, range: &LedgerRange) -> AppResult<String> {
        let entries = self.list_entries(ctx, range).await?;
        ledger_to_csv(&entries)
    }

    async fn find_transaction(&self, house_id: Uuid, id: Uuid) -> AppResult<tx::Model> {
        tx::Entity::find_by_id(id)
            .filter(tx::Column::HouseId.eq(house_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))
    }

    /// The category must belong to the house, be active and match the kind.
    async fn checked_category(
        &self,
        house_id: Uuid,
        category_id: Uuid,
        kind: TransactionKind,
    ) -> AppResult<cat::Model> {
        let category = cat::Entity::find_by_id(category_id)
            .filter(cat::Column::HouseId.eq(house_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        if !category.is_active {
            return Err(AppError::ValidationError("Category is disabled".to_string()));
        }
        if category.kind != kind {
            return Err(AppError::ValidationError(format!(
                "Category is for {} but the transaction is {kind}",
                category.kind
            )));
        }
        Ok(category)
    }

    async fn category_of(&self, model: &tx::Model) -> AppResult<Option<cat::Model>> {
        match model.category_id {
            Some(id) => Ok(cat::Entity::find_by_id(id).one(&self.pool).await?),
            None => Ok(None),
        }
    }

    pub async fn create_transaction(
        &self,
        ctx: &AuthContext,
        req: CreateTransactionRequest,
    ) -> AppResult<LedgerEntry> {
        ctx.require_admin()?;
        let house_id = ctx.require_house()?;
        validate_amount(req.amount_cents)?;
        if req.description.trim().is_empty() {
            return Err(AppError::ValidationError(
                "description must not be empty".to_string(),
            ));
        }

        let category = match req.category_id {
            Some(id) => Some(self.checked_category(house_id, id, req.kind).await?),
            None => None,
        };

        let now = Utc::now();
        let model = tx::ActiveModel {
            id: Set(Uuid::new_v4()),
            house_id: Set(house_id),
            kind: Set(req.kind),
            amount_cents: Set(req.amount_cents),
            occurred_on: Set(req.occurred_on),
            category_id: Set(req.category_id),
            payment_method: Set(req.payment_method),
            description: Set(req.description.trim().to_string()),
            notes: Set(req.notes),
            reconciled: Set(false),
            reconciled_by: Set(None),
            reconciled_at: Set(None),
            created_by: Set(ctx.user_id),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Transaction {} created in house {house_id} by {}",
            model.id,
            ctx.user_id
        );
        Ok(manual_entry(model, category))
    }

    pub async fn update_transaction(
        &self,
        ctx: &AuthContext,
        id: Uuid,
        req: UpdateTransactionRequest,
    ) -> AppResult<LedgerEntry> {
        ctx.require_admin()?;
        let house_id = ctx.require_house()?;
        let current = self.find_transaction(house_id, id).await?;

        if let Some(Some(category_id)) = req.category_id {
            self.checked_category(house_id, category_id, current.kind)
                .await?;
        }

        let updated = apply_transaction_update(current, req, Utc::now())?
            .update(&self.pool)
            .await?;
        let category = self.category_of(&updated).await?;
        Ok(manual_entry(updated, category))
    }

    pub async fn delete_transaction(&self, ctx: &AuthContext, id: Uuid) -> AppResult<()> {
        ctx.require_admin()?;
        let house_id = ctx.require_house()?;
        let result = tx::Entity::delete_many()
            .filter(tx::Column::Id.eq(id))
            .filter(tx::Column::HouseId.eq(house_id))
            .exec(&self.pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Transaction not found".to_string()));
        }
        log::info!("Transaction {id} deleted from house {house_id} by {}", ctx.user_id);
        Ok(())
    }

    /// Last write wins; no conflict detection.
    pub async fn toggle_reconciliation(
        &self,
        ctx: &AuthContext,
        id: Uuid,
    ) -> AppResult<LedgerEntry> {
        ctx.require_admin()?;
        let house_id = ctx.require_house()?;
        let current = self.find_transaction(house_id, id).await?;

        let updated = reconciliation_update(current, ctx.user_id, Utc::now())
            .update(&self.pool)
            .await?;
        let category = self.category_of(&updated).await?;
        Ok(manual_entry(updated, category))
    }

    pub async fn bulk_reconcile(
        &self,
        ctx: &AuthContext,
        ids: &[Uuid],
    ) -> AppResult<u64> {
        ctx.require_admin()?;
        let house_id = ctx.require_house()?;
        if ids.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        let result = tx::Entity::update_many()
            .col_expr(tx::Column::Reconciled, Expr::value(true))
            .col_expr(tx::Column::ReconciledBy, Expr::value(ctx.user_id))
            .col_expr(tx::Column::ReconciledAt, Expr::value(now))
            .col_expr(tx::Column::UpdatedAt, Expr::value(now))
            .filter(tx::Column::HouseId.eq(house_id))
            .filter(tx::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.pool)
            .await?;

        log::info!(
            "Bulk reconciliation in house {house_id}: {} of {} transactions",
            result.rows_affected,
            ids.len()
        );
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::ledger::fixtures::manual;
    use crate::context::Role;
    use sea_orm::ActiveValue;

    fn caller(role: Role, house_id: Option<Uuid>) -> AuthContext {
        AuthContext {
            user_id: Uuid::new_v4(),
            house_id,
            role,
        }
    }

    fn january() -> LedgerRange {
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        LedgerRange { start: d, end: d }
    }

    #[test]
    fn test_toggle_sets_and_clears_audit_fields() {
        let admin = Uuid::new_v4();
        let now = Utc::now();
        let model = manual(TransactionKind::Saida, 100, "2025-01-01", "Velas");

        let set = reconciliation_update(model.clone(), admin, now);
        assert_eq!(set.reconciled, ActiveValue::Set(true));
        assert_eq!(set.reconciled_by, ActiveValue::Set(Some(admin)));
        assert_eq!(set.reconciled_at, ActiveValue::Set(Some(now)));

        let reconciled = tx::Model {
            reconciled: true,
            reconciled_by: Some(admin),
            reconciled_at: Some(now),
            ..model
        };
        let cleared = reconciliation_update(reconciled, admin, now);
        assert_eq!(cleared.reconciled, ActiveValue::Set(false));
        assert_eq!(cleared.reconciled_by, ActiveValue::Set(None));
        assert_eq!(cleared.reconciled_at, ActiveValue::Set(None));
    }

    #[test]
    fn test_range_and_amount_validation() {
        let d = |s| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        assert!(validate_range(&LedgerRange { start: d("2025-02-01"), end: d("2025-01-01") }).is_err());
        assert!(validate_range(&LedgerRange { start: d("2025-01-01"), end: d("2025-01-01") }).is_ok());
        assert!(validate_amount(0).is_err());
        assert!(validate_amount(-5).is_err());
        assert!(validate_amount(1).is_ok());
    }

    #[test]
    fn test_update_keeps_omitted_and_clears_null_fields() {
        let category = Uuid::new_v4();
        let model = tx::Model {
            category_id: Some(category),
            notes: Some("recibo 12".to_string()),
            ..manual(TransactionKind::Saida, 100, "2025-01-01", "Velas")
        };

        let req: UpdateTransactionRequest =
            serde_json::from_str(r#"{"payment_method": null, "notes": null}"#).unwrap();
        assert_eq!(req.category_id, None);
        assert_eq!(req.payment_method, Some(None));

        let am = apply_transaction_update(model, req, Utc::now()).unwrap();
        assert_eq!(am.category_id, ActiveValue::Unchanged(Some(category)));
        assert_eq!(am.payment_method, ActiveValue::Set(None));
        assert_eq!(am.notes, ActiveValue::Set(None));
        assert_eq!(am.description, ActiveValue::Unchanged("Velas".to_string()));
    }

    #[test]
    fn test_update_sets_and_validates_fields() {
        let model = manual(TransactionKind::Entrada, 100, "2025-01-01", "Doação");
        let category = Uuid::new_v4();
        let req: UpdateTransactionRequest = serde_json::from_value(serde_json::json!({
            "amount_cents": 2500,
            "category_id": category,
            "payment_method": "pix",
        }))
        .unwrap();

        let am = apply_transaction_update(model.clone(), req, Utc::now()).unwrap();
        assert_eq!(am.amount_cents, ActiveValue::Set(2500));
        assert_eq!(am.category_id, ActiveValue::Set(Some(category)));
        assert_eq!(am.payment_method, ActiveValue::Set(Some("pix".to_string())));

        let bad = UpdateTransactionRequest {
            amount_cents: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            apply_transaction_update(model, bad, Utc::now()),
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_house_short_circuits_without_query() {
        // a disconnected pool panics on any query, so returning at all proves none ran
        let service = CashFlowService::new(DatabaseConnection::from(sea_orm::DatabaseConnectionType::Disconnected));
        let ctx = caller(Role::Admin, None);
        let range = january();

        assert!(service.list_entries(&ctx, &range).await.unwrap().is_empty());
        assert_eq!(
            service.period_totals(&ctx, &range).await.unwrap(),
            PeriodTotals::default()
        );
        let summary = service.monthly_summary(&ctx, 2025).await.unwrap();
        assert_eq!(summary.months.len(), 12);
        assert!(summary.months.iter().all(|m| m.saldo == 0));
        assert_eq!(
            service.export_csv(&ctx, &range).await.unwrap(),
            "Data,Tipo,Descrição,Categoria,Valor,Forma Pagamento\n"
        );
    }

    #[tokio::test]
    async fn test_reads_require_admin() {
        let service = CashFlowService::new(DatabaseConnection::from(sea_orm::DatabaseConnectionType::Disconnected));
        let member = caller(Role::Member, Some(Uuid::new_v4()));
        let range = january();

        assert!(matches!(
            service.list_entries(&member, &range).await,
            Err(AppError::PermissionDenied)
        ));
        assert!(matches!(
            service.period_totals(&member, &range).await,
            Err(AppError::PermissionDenied)
        ));
        assert!(matches!(
            service.monthly_summary(&member, 2025).await,
            Err(AppError::PermissionDenied)
        ));
        assert!(matches!(
            service.export_csv(&member, &range).await,
            Err(AppError::PermissionDenied)
        ));
    }

    #[tokio::test]
    async fn test_writes_require_admin() {
        let service = CashFlowService::new(DatabaseConnection::from(sea_orm::DatabaseConnectionType::Disconnected));
        let ctx = caller(Role::Member, Some(Uuid::new_v4()));
        let result = service.bulk_reconcile(&ctx, &[Uuid::new_v4()]).await;
        assert!(matches!(result, Err(AppError::PermissionDenied)));
    }
}
