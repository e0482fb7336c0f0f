use super::auth_context;
use crate::models::*;
use crate::services::{CeremonyService, WaitlistService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/ceremonies/upcoming",
    tag = "ceremonies",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Ceremonies from today on", body = [CeremonyResponse]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn upcoming(service: web::Data<CeremonyService>, req: HttpRequest) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.upcoming_ceremonies(&ctx).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/ceremonies/{id}/seats",
    tag = "ceremonies",
    params(("id" = Uuid, Path, description = "Ceremony id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Seat availability", body = SeatAvailability),
        (status = 404, description = "Ceremony not found")
    )
)]
pub async fn seats(
    service: web::Data<CeremonyService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.ceremony_seats(&ctx, path.into_inner()).await {
        Ok(seats) => Ok(HttpResponse::Ok().json(ApiResponse::success(seats))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/ceremonies/{id}/enroll",
    tag = "ceremonies",
    params(("id" = Uuid, Path, description = "Ceremony id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Enrolled", body = EnrollmentResponse),
        (status = 400, description = "Ceremony full or already enrolled"),
        (status = 404, description = "Ceremony not found")
    )
)]
pub async fn enroll(
    service: web::Data<CeremonyService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.enroll(&ctx, path.into_inner()).await {
        Ok(enrollment) => Ok(HttpResponse::Created().json(ApiResponse::success(enrollment))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/ceremonies/{id}/waitlist",
    tag = "waitlist",
    params(("id" = Uuid, Path, description = "Ceremony id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Waitlist ordered by position", body = [WaitlistEntryResponse]),
        (status = 403, description = "Admins only")
    )
)]
pub async fn list_waitlist(
    service: web::Data<WaitlistService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.list(&ctx, path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/ceremonies/{id}/waitlist",
    tag = "waitlist",
    params(("id" = Uuid, Path, description = "Ceremony id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Joined the waitlist", body = WaitlistEntryResponse),
        (status = 400, description = "Already on the waitlist"),
        (status = 404, description = "Ceremony not found")
    )
)]
pub async fn join_waitlist(
    service: web::Data<WaitlistService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.join(&ctx, path.into_inner()).await {
        Ok(entry) => Ok(HttpResponse::Created().json(ApiResponse::success(entry))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/ceremonies/{id}/waitlist",
    tag = "waitlist",
    params(("id" = Uuid, Path, description = "Ceremony id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Left the waitlist"),
        (status = 404, description = "Not on the waitlist")
    )
)]
pub async fn leave_waitlist(
    service: web::Data<WaitlistService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    let ceremony_id = path.into_inner();
    match service.leave(&ctx, ceremony_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            ceremony_id,
            "Left the waitlist",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/ceremonies/{id}/waitlist/position",
    tag = "waitlist",
    params(("id" = Uuid, Path, description = "Ceremony id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's stored position", body = WaitlistPositionResponse)
    )
)]
pub async fn waitlist_position(
    service: web::Data<WaitlistService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.position(&ctx, path.into_inner()).await {
        Ok(position) => Ok(HttpResponse::Ok().json(ApiResponse::success(position))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn ceremony_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/ceremonies")
            .route("/upcoming", web::get().to(upcoming))
            .route("/{id}/seats", web::get().to(seats))
            .route("/{id}/enroll", web::post().to(enroll))
            .route("/{id}/waitlist", web::get().to(list_waitlist))
            .route("/{id}/waitlist", web::post().to(join_waitlist))
            .route("/{id}/waitlist", web::delete().to(leave_waitlist))
            .route("/{id}/waitlist/position", web::get().to(waitlist_position)),
    );
}
