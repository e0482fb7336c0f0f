pub mod cash_flow;
pub mod category;
pub mod ceremony;
pub mod course;
pub mod enrollment;
pub mod history;
pub mod house;
pub mod testimonial;

pub use cash_flow::cash_flow_config;
pub use category::category_config;
pub use ceremony::ceremony_config;
pub use course::course_config;
pub use enrollment::enrollment_config;
pub use history::history_config;
pub use house::house_config;
pub use testimonial::testimonial_config;

use crate::context::AuthContext;
use crate::error::{AppError, AppResult};
use crate::middlewares::get_auth_context;
use actix_web::HttpRequest;

/// Context attached by the auth middleware.
pub(crate) fn auth_context(req: &HttpRequest) -> AppResult<AuthContext> {
    get_auth_context(req).ok_or_else(|| AppError::AuthError("Missing access token".to_string()))
}
