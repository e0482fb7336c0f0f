use crate::aggregates::{occupied_seats, seat_availability};
use crate::context::AuthContext;
use crate::entities::{course_enrollment_entity as course_enrollment, course_entity as course};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct CourseService {
    pool: DatabaseConnection,
}

impl CourseService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    async fn find_course(&self, house_id: Uuid, id: Uuid) -> AppResult<course::Model> {
        course::Entity::find_by_id(id)
            .filter(course::Column::HouseId.eq(house_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
    }

    pub async fn course_seats(&self, ctx: &AuthContext, course_id: Uuid) -> AppResult<SeatAvailability> {
        let house_id = ctx.require_house()?;
        let course = self.find_course(house_id, course_id).await?;

        let flags = course_enrollment::Entity::find()
            .select_only()
            .column(course_enrollment::Column::Cancelled)
            .filter(course_enrollment::Column::CourseId.eq(course.id))
            .into_tuple::<bool>()
            .all(&self.pool)
            .await?;
        Ok(seat_availability(course.capacity, occupied_seats(flags)))
    }

    pub async fn course_enrollments(
        &self,
        ctx: &AuthContext,
        course_id: Uuid,
    ) -> AppResult<Vec<CourseEnrollmentResponse>> {
        ctx.require_admin()?;
        let Some(house_id) = ctx.house_id else {
            return Ok(Vec::new());
        };

        let rows = course_enrollment::Entity::find()
            .filter(course_enrollment::Column::HouseId.eq(house_id))
            .filter(course_enrollment::Column::CourseId.eq(course_id))
            .order_by_asc(course_enrollment::Column::CreatedAt)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(CourseEnrollmentResponse::from).collect())
    }

    pub async fn set_course_paid(
        &self,
        ctx: &AuthContext,
        enrollment_id: Uuid,
        paid: bool,
    ) -> AppResult<CourseEnrollmentResponse> {
        ctx.require_admin()?;
        let house_id = ctx.require_house()?;
        let enrollment = course_enrollment::Entity::find_by_id(enrollment_id)
            .filter(course_enrollment::Column::HouseId.eq(house_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Course enrollment not found".to_string()))?;

        let mut am = enrollment.into_active_model();
        am.paid = Set(paid);
        Ok(am.update(&self.pool).await?.into())
    }
}
