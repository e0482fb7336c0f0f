use super::auth_context;
use crate::models::*;
use crate::services::CourseService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/courses/{id}/seats",
    tag = "courses",
    params(("id" = Uuid, Path, description = "Course id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Seat availability", body = SeatAvailability),
        (status = 404, description = "Course not found")
    )
)]
pub async fn seats(
    service: web::Data<CourseService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.course_seats(&ctx, path.into_inner()).await {
        Ok(seats) => Ok(HttpResponse::Ok().json(ApiResponse::success(seats))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/courses/{id}/enrollments",
    tag = "courses",
    params(("id" = Uuid, Path, description = "Course id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Enrollments of the course", body = [CourseEnrollmentResponse]),
        (status = 403, description = "Admins only")
    )
)]
pub async fn enrollments(
    service: web::Data<CourseService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.course_enrollments(&ctx, path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/course-enrollments/{id}/paid",
    tag = "courses",
    params(("id" = Uuid, Path, description = "Course enrollment id")),
    request_body = SetPaidRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paid flag updated", body = CourseEnrollmentResponse),
        (status = 403, description = "Admins only")
    )
)]
pub async fn set_paid(
    service: web::Data<CourseService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<SetPaidRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.set_course_paid(&ctx, path.into_inner(), body.paid).await {
        Ok(enrollment) => Ok(HttpResponse::Ok().json(ApiResponse::success(enrollment))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn course_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/courses")
            .route("/{id}/seats", web::get().to(seats))
            .route("/{id}/enrollments", web::get().to(enrollments)),
    )
    .route("/course-enrollments/{id}/paid", web::put().to(set_paid));
}
