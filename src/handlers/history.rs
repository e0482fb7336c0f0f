use super::auth_context;
use crate::models::*;
use crate::services::HistoryService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/history",
    tag = "history",
    params(("page" = Option<u32>, Query, description = "1-based page (default 1)")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paid enrollments, newest ceremony first, with pagination info")
    )
)]
/// The caller's paid ceremony history, one fixed-size page at a time.
pub async fn get_history(
    service: web::Data<HistoryService>,
    req: HttpRequest,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.history(&ctx, query.page).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/history/stats",
    tag = "history",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Totals over paid, non-cancelled enrollments", body = HistoryStats)
    )
)]
pub async fn get_stats(service: web::Data<HistoryService>, req: HttpRequest) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.stats(&ctx).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(stats))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn history_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/history")
            .route("", web::get().to(get_history))
            .route("/stats", web::get().to(get_stats)),
    );
}
