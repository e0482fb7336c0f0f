use crate::entities::testimonial_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestimonialResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<testimonial_entity::Model> for TestimonialResponse {
    fn from(m: testimonial_entity::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            body: m.body,
            created_at: m.created_at,
        }
    }
}
