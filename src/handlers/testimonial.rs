use super::auth_context;
use crate::models::*;
use crate::services::TestimonialService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/testimonials/recent",
    tag = "testimonials",
    params(("limit" = Option<u64>, Query, description = "How many to return (max 50)")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Latest approved testimonials", body = [TestimonialResponse])
    )
)]
pub async fn recent(
    service: web::Data<TestimonialService>,
    req: HttpRequest,
    query: web::Query<RecentQuery>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.recent(&ctx, query.limit).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn testimonial_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/testimonials/recent", web::get().to(recent));
}
