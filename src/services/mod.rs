pub mod cash_flow_service;
pub mod category_service;
pub mod ceremony_service;
pub mod course_service;
pub mod history_service;
pub mod house_service;
pub mod testimonial_service;
pub mod waitlist_service;

pub use cash_flow_service::CashFlowService;
pub use category_service::CategoryService;
pub use ceremony_service::CeremonyService;
pub use course_service::CourseService;
pub use history_service::HistoryService;
pub use house_service::HouseService;
pub use testimonial_service::TestimonialService;
pub use waitlist_service::WaitlistService;
