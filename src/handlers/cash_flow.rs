use super::auth_context;
use crate::models::*;
use crate::services::CashFlowService;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/cash-flow/entries",
    tag = "cash_flow",
    params(
        ("start" = String, Query, description = "First day, inclusive (YYYY-MM-DD)"),
        ("end" = String, Query, description = "Last day, inclusive (YYYY-MM-DD)")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Merged ledger, newest first", body = [LedgerEntry]),
        (status = 400, description = "Invalid range"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admins only")
    )
)]
pub async fn list_entries(
    service: web::Data<CashFlowService>,
    req: HttpRequest,
    query: web::Query<LedgerRange>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.list_entries(&ctx, &query).await {
        Ok(entries) => Ok(HttpResponse::Ok().json(ApiResponse::success(entries))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/cash-flow/totals",
    tag = "cash_flow",
    params(
        ("start" = String, Query, description = "First day, inclusive (YYYY-MM-DD)"),
        ("end" = String, Query, description = "Last day, inclusive (YYYY-MM-DD)")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Totals of the period", body = PeriodTotals),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admins only")
    )
)]
pub async fn totals(
    service: web::Data<CashFlowService>,
    req: HttpRequest,
    query: web::Query<LedgerRange>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.period_totals(&ctx, &query).await {
        Ok(totals) => Ok(HttpResponse::Ok().json(ApiResponse::success(totals))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/cash-flow/monthly",
    tag = "cash_flow",
    params(("year" = i32, Query, description = "Calendar year")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Twelve monthly buckets", body = MonthlySummaryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admins only")
    )
)]
pub async fn monthly(
    service: web::Data<CashFlowService>,
    req: HttpRequest,
    query: web::Query<MonthlyQuery>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.monthly_summary(&ctx, query.year).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(summary))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/cash-flow/export",
    tag = "cash_flow",
    params(
        ("start" = String, Query, description = "First day, inclusive (YYYY-MM-DD)"),
        ("end" = String, Query, description = "Last day, inclusive (YYYY-MM-DD)")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admins only")
    )
)]
pub async fn export(
    service: web::Data<CashFlowService>,
    req: HttpRequest,
    query: web::Query<LedgerRange>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.export_csv(&ctx, &query).await {
        Ok(csv) => {
            let filename = format!("fluxo-de-caixa-{}-{}.csv", query.start, query.end);
            Ok(HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(csv))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cash-flow/transactions",
    tag = "cash_flow",
    request_body = CreateTransactionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Transaction created", body = LedgerEntry),
        (status = 400, description = "Invalid amount or category"),
        (status = 403, description = "Admins only")
    )
)]
pub async fn create_transaction(
    service: web::Data<CashFlowService>,
    req: HttpRequest,
    body: web::Json<CreateTransactionRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.create_transaction(&ctx, body.into_inner()).await {
        Ok(entry) => Ok(HttpResponse::Created().json(ApiResponse::success(entry))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/cash-flow/transactions/{id}",
    tag = "cash_flow",
    params(("id" = Uuid, Path, description = "Transaction id")),
    request_body = UpdateTransactionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Transaction updated", body = LedgerEntry),
        (status = 403, description = "Admins only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_transaction(
    service: web::Data<CashFlowService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<UpdateTransactionRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service
        .update_transaction(&ctx, path.into_inner(), body.into_inner())
        .await
    {
        Ok(entry) => Ok(HttpResponse::Ok().json(ApiResponse::success(entry))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/cash-flow/transactions/{id}",
    tag = "cash_flow",
    params(("id" = Uuid, Path, description = "Transaction id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Transaction deleted"),
        (status = 403, description = "Admins only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_transaction(
    service: web::Data<CashFlowService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.delete_transaction(&ctx, id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            id,
            "Transaction deleted",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cash-flow/transactions/{id}/toggle-reconciliation",
    tag = "cash_flow",
    params(("id" = Uuid, Path, description = "Transaction id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reconciled flag flipped", body = LedgerEntry),
        (status = 403, description = "Admins only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn toggle_reconciliation(
    service: web::Data<CashFlowService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.toggle_reconciliation(&ctx, path.into_inner()).await {
        Ok(entry) => Ok(HttpResponse::Ok().json(ApiResponse::success(entry))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cash-flow/reconcile",
    tag = "cash_flow",
    request_body = BulkReconcileRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Number of transactions reconciled", body = BulkReconcileResponse),
        (status = 403, description = "Admins only")
    )
)]
pub async fn bulk_reconcile(
    service: web::Data<CashFlowService>,
    req: HttpRequest,
    body: web::Json<BulkReconcileRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.bulk_reconcile(&ctx, &body.ids).await {
        Ok(updated) => Ok(HttpResponse::Ok().json(ApiResponse::success(BulkReconcileResponse {
            updated,
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn cash_flow_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cash-flow")
            .route("/entries", web::get().to(list_entries))
            .route("/totals", web::get().to(totals))
            .route("/monthly", web::get().to(monthly))
            .route("/export", web::get().to(export))
            .route("/transactions", web::post().to(create_transaction))
            .route("/transactions/{id}", web::put().to(update_transaction))
            .route("/transactions/{id}", web::delete().to(delete_transaction))
            .route(
                "/transactions/{id}/toggle-reconciliation",
                web::post().to(toggle_reconciliation),
            )
            .route("/reconcile", web::post().to(bulk_reconcile)),
    );
}
