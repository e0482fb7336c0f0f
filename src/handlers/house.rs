use super::auth_context;
use crate::models::*;
use crate::services::HouseService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/house",
    tag = "house",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "House selected in the access token", body = HouseResponse),
        (status = 400, description = "No house selected"),
        (status = 403, description = "House is disabled")
    )
)]
pub async fn current_house(service: web::Data<HouseService>, req: HttpRequest) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.current(&ctx).await {
        Ok(house) => Ok(HttpResponse::Ok().json(ApiResponse::success(house))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn house_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/house", web::get().to(current_house));
}
