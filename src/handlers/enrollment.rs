use super::auth_context;
use crate::models::*;
use crate::services::{CeremonyService, WaitlistService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/enrollments/recent",
    tag = "enrollments",
    params(("limit" = Option<u64>, Query, description = "How many to return (max 50)")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Newest ceremony and course inscriptions", body = [InscriptionResponse])
    )
)]
pub async fn recent(
    service: web::Data<CeremonyService>,
    req: HttpRequest,
    query: web::Query<RecentQuery>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.recent_enrollments(&ctx, query.limit).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/enrollments/{id}/cancel",
    tag = "enrollments",
    params(("id" = Uuid, Path, description = "Enrollment id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Enrollment cancelled", body = EnrollmentResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn cancel(
    service: web::Data<CeremonyService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.cancel_enrollment(&ctx, path.into_inner()).await {
        Ok(enrollment) => Ok(HttpResponse::Ok().json(ApiResponse::success(enrollment))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/enrollments/{id}/paid",
    tag = "enrollments",
    params(("id" = Uuid, Path, description = "Enrollment id")),
    request_body = SetPaidRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paid flag updated", body = EnrollmentResponse),
        (status = 403, description = "Admins only")
    )
)]
pub async fn set_paid(
    service: web::Data<CeremonyService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<SetPaidRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.set_paid(&ctx, path.into_inner(), body.paid).await {
        Ok(enrollment) => Ok(HttpResponse::Ok().json(ApiResponse::success(enrollment))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/enrollments/{id}/note",
    tag = "enrollments",
    params(("id" = Uuid, Path, description = "Enrollment id")),
    request_body = UpdateNoteRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Note saved", body = EnrollmentResponse),
        (status = 403, description = "Admins only")
    )
)]
pub async fn update_note(
    service: web::Data<CeremonyService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<UpdateNoteRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service
        .update_admin_note(&ctx, path.into_inner(), body.into_inner().note)
        .await
    {
        Ok(enrollment) => Ok(HttpResponse::Ok().json(ApiResponse::success(enrollment))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/waitlist/{id}/notified",
    tag = "waitlist",
    params(("id" = Uuid, Path, description = "Waitlist entry id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Entry marked as notified", body = WaitlistEntryResponse),
        (status = 403, description = "Admins only")
    )
)]
pub async fn mark_notified(
    service: web::Data<WaitlistService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.mark_notified(&ctx, path.into_inner()).await {
        Ok(entry) => Ok(HttpResponse::Ok().json(ApiResponse::success(entry))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn enrollment_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/enrollments")
            .route("/recent", web::get().to(recent))
            .route("/{id}/cancel", web::post().to(cancel))
            .route("/{id}/paid", web::put().to(set_paid))
            .route("/{id}/note", web::put().to(update_note)),
    )
    .route("/waitlist/{id}/notified", web::post().to(mark_notified));
}
