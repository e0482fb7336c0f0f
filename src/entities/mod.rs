pub mod ceremonies;
pub mod course_enrollments;
pub mod courses;
pub mod enrollments;
pub mod financial_categories;
pub mod financial_transactions;
pub mod houses;
pub mod payment_records;
pub mod testimonials;
pub mod waitlist_entries;

pub use ceremonies as ceremony_entity;
pub use course_enrollments as course_enrollment_entity;
pub use courses as course_entity;
pub use enrollments as enrollment_entity;
pub use financial_categories as category_entity;
pub use financial_transactions as transaction_entity;
pub use houses as house_entity;
pub use payment_records as payment_record_entity;
pub use testimonials as testimonial_entity;
pub use waitlist_entries as waitlist_entity;

pub use financial_transactions::TransactionKind;
pub use payment_records::{APPROVED_STATUS, PaymentProductKind, PaymentStatus};
