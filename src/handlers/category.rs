use super::auth_context;
use crate::entities::TransactionKind;
use crate::models::*;
use crate::services::CategoryService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    params(
        ("kind" = Option<TransactionKind>, Query, description = "entrada or saida"),
        ("only_active" = Option<bool>, Query, description = "Defaults to true")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Categories of the house", body = [CategoryResponse]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_categories(
    service: web::Data<CategoryService>,
    req: HttpRequest,
    query: web::Query<CategoryQuery>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.list(&ctx, &query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    request_body = CreateCategoryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid name or color"),
        (status = 403, description = "Admins only")
    )
)]
pub async fn create_category(
    service: web::Data<CategoryService>,
    req: HttpRequest,
    body: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.create(&ctx, body.into_inner()).await {
        Ok(category) => Ok(HttpResponse::Created().json(ApiResponse::success(category))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_category(
    service: web::Data<CategoryService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCategoryRequest>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.update(&ctx, path.into_inner(), body.into_inner()).await {
        Ok(category) => Ok(HttpResponse::Ok().json(ApiResponse::success(category))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/categories/{id}/deactivate",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category disabled", body = CategoryResponse),
        (status = 404, description = "Not found")
    )
)]
pub async fn deactivate_category(
    service: web::Data<CategoryService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let ctx = match auth_context(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match service.deactivate(&ctx, path.into_inner()).await {
        Ok(category) => Ok(HttpResponse::Ok().json(ApiResponse::success(category))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn category_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::get().to(list_categories))
            .route("", web::post().to(create_category))
            .route("/{id}", web::put().to(update_category))
            .route("/{id}/deactivate", web::post().to(deactivate_category)),
    );
}
