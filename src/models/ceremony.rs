use crate::entities::{ceremony_entity, course_enrollment_entity, enrollment_entity, waitlist_entity};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct SeatAvailability {
    /// `None` means unlimited.
    pub capacity: Option<i32>,
    pub enrolled: i64,
    pub available: i64,
    pub is_full: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CeremonyResponse {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub location: Option<String>,
    pub medicine: Option<String>,
    pub seats: SeatAvailability,
}

impl CeremonyResponse {
    pub fn new(m: ceremony_entity::Model, seats: SeatAvailability) -> Self {
        Self {
            id: m.id,
            title: m.title,
            date: m.date,
            time: m.time,
            location: m.location,
            medicine: m.medicine,
            seats,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentResponse {
    pub id: Uuid,
    pub ceremony_id: Uuid,
    pub user_id: Uuid,
    pub paid: bool,
    pub cancelled: bool,
    pub admin_note: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<enrollment_entity::Model> for EnrollmentResponse {
    fn from(m: enrollment_entity::Model) -> Self {
        Self {
            id: m.id,
            ceremony_id: m.ceremony_id,
            user_id: m.user_id,
            paid: m.paid,
            cancelled: m.cancelled,
            admin_note: m.admin_note,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SetPaidRequest {
    pub paid: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    #[schema(example = "Primeira vez, acompanhar de perto")]
    pub note: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecentQuery {
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WaitlistEntryResponse {
    pub id: Uuid,
    pub ceremony_id: Uuid,
    pub user_id: Uuid,
    pub position: i32,
    pub notified: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<waitlist_entity::Model> for WaitlistEntryResponse {
    fn from(m: waitlist_entity::Model) -> Self {
        Self {
            id: m.id,
            ceremony_id: m.ceremony_id,
            user_id: m.user_id,
            position: m.position,
            notified: m.notified,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WaitlistPositionResponse {
    pub ceremony_id: Uuid,
    /// `None` when the user is not on the waitlist.
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseEnrollmentResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub user_id: Uuid,
    pub paid: bool,
    pub cancelled: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<course_enrollment_entity::Model> for CourseEnrollmentResponse {
    fn from(m: course_enrollment_entity::Model) -> Self {
        Self {
            id: m.id,
            course_id: m.course_id,
            user_id: m.user_id,
            paid: m.paid,
            cancelled: m.cancelled,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InscriptionKind {
    Ceremony,
    Course,
}

/// A ceremony or course enrollment, as shown in "recent inscriptions".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct InscriptionResponse {
    pub id: Uuid,
    pub kind: InscriptionKind,
    pub event_id: Uuid,
    pub title: String,
    pub event_date: NaiveDate,
    pub user_id: Uuid,
    pub paid: bool,
    pub cancelled: bool,
    pub created_at: Option<DateTime<Utc>>,
}
