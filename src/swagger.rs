use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::context::Role;
use crate::entities::{PaymentProductKind, TransactionKind};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::cash_flow::list_entries,
        handlers::cash_flow::totals,
        handlers::cash_flow::monthly,
        handlers::cash_flow::export,
        handlers::cash_flow::create_transaction,
        handlers::cash_flow::update_transaction,
        handlers::cash_flow::delete_transaction,
        handlers::cash_flow::toggle_reconciliation,
        handlers::cash_flow::bulk_reconcile,
        handlers::category::list_categories,
        handlers::category::create_category,
        handlers::category::update_category,
        handlers::category::deactivate_category,
        handlers::ceremony::upcoming,
        handlers::ceremony::seats,
        handlers::ceremony::enroll,
        handlers::ceremony::list_waitlist,
        handlers::ceremony::join_waitlist,
        handlers::ceremony::leave_waitlist,
        handlers::ceremony::waitlist_position,
        handlers::enrollment::recent,
        handlers::enrollment::cancel,
        handlers::enrollment::set_paid,
        handlers::enrollment::update_note,
        handlers::enrollment::mark_notified,
        handlers::history::get_history,
        handlers::history::get_stats,
        handlers::course::seats,
        handlers::course::enrollments,
        handlers::course::set_paid,
        handlers::testimonial::recent,
        handlers::house::current_house,
    ),
    components(
        schemas(
            TransactionKind,
            PaymentProductKind,
            Role,
            LedgerSource,
            CategoryRef,
            LedgerEntry,
            PeriodTotals,
            MonthlyBucket,
            MonthlySummaryResponse,
            CreateTransactionRequest,
            UpdateTransactionRequest,
            BulkReconcileRequest,
            BulkReconcileResponse,
            CategoryResponse,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            SeatAvailability,
            CeremonyResponse,
            EnrollmentResponse,
            SetPaidRequest,
            UpdateNoteRequest,
            WaitlistEntryResponse,
            WaitlistPositionResponse,
            CourseEnrollmentResponse,
            InscriptionKind,
            InscriptionResponse,
            HistoryItem,
            HistoryStats,
            TestimonialResponse,
            HouseResponse,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "cash_flow", description = "Ledger, totals and CSV export"),
        (name = "categories", description = "Financial categories"),
        (name = "ceremonies", description = "Ceremonies and seats"),
        (name = "waitlist", description = "Ceremony waitlists"),
        (name = "enrollments", description = "Enrollment administration"),
        (name = "history", description = "Member ceremony history"),
        (name = "courses", description = "Courses and seats"),
        (name = "testimonials", description = "Approved testimonials"),
        (name = "house", description = "Current house"),
    ),
    info(
        title = "Consciência Divinal API",
        version = "1.0.0",
        description = "Ceremonial house management REST API"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_cash_flow_and_bearer_scheme() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/cash-flow/export"));
        assert!(doc.paths.paths.contains_key("/ceremonies/{id}/waitlist"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
