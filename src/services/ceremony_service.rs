use crate::aggregates::{occupied_seats, seat_availability, top_recent};
use crate::context::AuthContext;
use crate::entities::{
    ceremony_entity as ceremony, course_enrollment_entity as course_enrollment,
    course_entity as course, enrollment_entity as enrollment,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::sea_query::NullOrdering;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, Order, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

pub const MAX_RECENT_LIMIT: u64 = 50;

/// Notes are stored verbatim; an empty string is a valid note.
pub fn apply_admin_note(model: enrollment::Model, note: String) -> enrollment::ActiveModel {
    let mut am = model.into_active_model();
    am.admin_note = Set(Some(note));
    am
}

pub(crate) fn clamp_limit(requested: Option<u64>, default: u64) -> u64 {
    requested.unwrap_or(default).clamp(1, MAX_RECENT_LIMIT)
}

fn ceremony_inscription(e: enrollment::Model, c: ceremony::Model) -> InscriptionResponse {
    InscriptionResponse {
        id: e.id,
        kind: InscriptionKind::Ceremony,
        event_id: c.id,
        title: c.title,
        event_date: c.date,
        user_id: e.user_id,
        paid: e.paid,
        cancelled: e.cancelled,
        created_at: e.created_at,
    }
}

fn course_inscription(e: course_enrollment::Model, c: course::Model) -> InscriptionResponse {
    InscriptionResponse {
        id: e.id,
        kind: InscriptionKind::Course,
        event_id: c.id,
        title: c.title,
        event_date: c.starts_on,
        user_id: e.user_id,
        paid: e.paid,
        cancelled: e.cancelled,
        created_at: e.created_at,
    }
}

#[derive(Clone)]
pub struct CeremonyService {
    pool: DatabaseConnection,
    recent_limit: u64,
}

impl CeremonyService {
    pub fn new(pool: DatabaseConnection, recent_limit: u64) -> Self {
        Self { pool, recent_limit }
    }

    async fn find_ceremony<C: ConnectionTrait>(
        conn: &C,
        house_id: Uuid,
        id: Uuid,
    ) -> AppResult<ceremony::Model> {
        ceremony::Entity::find_by_id(id)
            .filter(ceremony::Column::HouseId.eq(house_id))
            .one(conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Ceremony not found".to_string()))
    }

    async fn seats_of<C: ConnectionTrait>(
        conn: &C,
        ceremony: &ceremony::Model,
    ) -> AppResult<SeatAvailability> {
        let flags = enrollment::Entity::find()
            .select_only()
            .column(enrollment::Column::Cancelled)
            .filter(enrollment::Column::CeremonyId.eq(ceremony.id))
            .into_tuple::<bool>()
            .all(conn)
            .await?;
        Ok(seat_availability(ceremony.capacity, occupied_seats(flags)))
    }

    async fn find_enrollment(&self, house_id: Uuid, id: Uuid) -> AppResult<enrollment::Model> {
        enrollment::Entity::find_by_id(id)
            .filter(enrollment::Column::HouseId.eq(house_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))
    }

    pub async fn ceremony_seats(
        &self,
        ctx: &AuthContext,
        ceremony_id: Uuid,
    ) -> AppResult<SeatAvailability> {
        let house_id = ctx.require_house()?;
        let ceremony = Self::find_ceremony(&self.pool, house_id, ceremony_id).await?;
        Self::seats_of(&self.pool, &ceremony).await
    }

    /// Ceremonies from today on, soonest first, each with its seat count.
    pub async fn upcoming_ceremonies(&self, ctx: &AuthContext) -> AppResult<Vec<CeremonyResponse>> {
        let Some(house_id) = ctx.house_id else {
            return Ok(Vec::new());
        };

        let today = Utc::now().date_naive();
        let ceremonies = ceremony::Entity::find()
            .filter(ceremony::Column::HouseId.eq(house_id))
            .filter(ceremony::Column::Date.gte(today))
            .order_by_asc(ceremony::Column::Date)
            .order_by_asc(ceremony::Column::Time)
            .all(&self.pool)
            .await?;
        if ceremonies.is_empty() {
            return Ok(Vec::new());
        }

        let rows = enrollment::Entity::find()
            .select_only()
            .column(enrollment::Column::CeremonyId)
            .column(enrollment::Column::Cancelled)
            .filter(enrollment::Column::CeremonyId.is_in(ceremonies.iter().map(|c| c.id)))
            .into_tuple::<(Uuid, bool)>()
            .all(&self.pool)
            .await?;

        let mut flags: HashMap<Uuid, Vec<bool>> = HashMap::new();
        for (ceremony_id, cancelled) in rows {
            flags.entry(ceremony_id).or_default().push(cancelled);
        }

        Ok(ceremonies
            .into_iter()
            .map(|c| {
                let taken = occupied_seats(flags.remove(&c.id).unwrap_or_default());
                let seats = seat_availability(c.capacity, taken);
                CeremonyResponse::new(c, seats)
            })
            .collect())
    }

    /// Locks the ceremony row so concurrent enrollments cannot overbook it.
    pub async fn enroll(&self, ctx: &AuthContext, ceremony_id: Uuid) -> AppResult<EnrollmentResponse> {
        let house_id = ctx.require_house()?;
        let txn = self.pool.begin().await?;

        let ceremony = ceremony::Entity::find_by_id(ceremony_id)
            .filter(ceremony::Column::HouseId.eq(house_id))
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Ceremony not found".to_string()))?;

        let existing = enrollment::Entity::find()
            .filter(enrollment::Column::CeremonyId.eq(ceremony_id))
            .filter(enrollment::Column::UserId.eq(ctx.user_id))
            .filter(enrollment::Column::Cancelled.eq(false))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Already enrolled in this ceremony".to_string(),
            ));
        }

        if Self::seats_of(&txn, &ceremony).await?.is_full {
            return Err(AppError::ValidationError("Ceremony is full".to_string()));
        }

        let model = enrollment::ActiveModel {
            id: Set(Uuid::new_v4()),
            house_id: Set(house_id),
            ceremony_id: Set(ceremony_id),
            user_id: Set(ctx.user_id),
            paid: Set(false),
            cancelled: Set(false),
            admin_note: Set(None),
            created_at: Set(Some(Utc::now())),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        log::info!("User {} enrolled in ceremony {ceremony_id}", ctx.user_id);
        Ok(model.into())
    }

    /// The member who owns the enrollment or an admin may cancel it.
    pub async fn cancel_enrollment(&self, ctx: &AuthContext, id: Uuid) -> AppResult<EnrollmentResponse> {
        let house_id = ctx.require_house()?;
        let current = self.find_enrollment(house_id, id).await?;
        if current.user_id != ctx.user_id && !ctx.is_admin() {
            return Err(AppError::Forbidden);
        }

        let mut am = current.into_active_model();
        am.cancelled = Set(true);
        Ok(am.update(&self.pool).await?.into())
    }

    pub async fn set_paid(&self, ctx: &AuthContext, id: Uuid, paid: bool) -> AppResult<EnrollmentResponse> {
        ctx.require_admin()?;
        let house_id = ctx.require_house()?;
        let mut am = self.find_enrollment(house_id, id).await?.into_active_model();
        am.paid = Set(paid);
        Ok(am.update(&self.pool).await?.into())
    }

    pub async fn update_admin_note(
        &self,
        ctx: &AuthContext,
        id: Uuid,
        note: String,
    ) -> AppResult<EnrollmentResponse> {
        ctx.require_admin()?;
        let house_id = ctx.require_house()?;
        let current = self.find_enrollment(house_id, id).await?;
        Ok(apply_admin_note(current, note).update(&self.pool).await?.into())
    }

    /// Newest ceremony and course inscriptions together.
    ///
    /// Admins see the whole house; members see their own. Rows without
    /// `created_at` sort last so they never crowd out dated ones.
    pub async fn recent_enrollments(
        &self,
        ctx: &AuthContext,
        limit: Option<u64>,
    ) -> AppResult<Vec<InscriptionResponse>> {
        let Some(house_id) = ctx.house_id else {
            return Ok(Vec::new());
        };
        let limit = clamp_limit(limit, self.recent_limit);

        let mut ceremonies = enrollment::Entity::find()
            .find_also_related(ceremony::Entity)
            .filter(enrollment::Column::HouseId.eq(house_id));
        let mut courses = course_enrollment::Entity::find()
            .find_also_related(course::Entity)
            .filter(course_enrollment::Column::HouseId.eq(house_id));
        if !ctx.is_admin() {
            ceremonies = ceremonies.filter(enrollment::Column::UserId.eq(ctx.user_id));
            courses = courses.filter(course_enrollment::Column::UserId.eq(ctx.user_id));
        }

        let (ceremony_rows, course_rows) = tokio::try_join!(
            ceremonies
                .order_by_with_nulls(enrollment::Column::CreatedAt, Order::Desc, NullOrdering::Last)
                .limit(limit)
                .all(&self.pool),
            courses
                .order_by_with_nulls(
                    course_enrollment::Column::CreatedAt,
                    Order::Desc,
                    NullOrdering::Last
                )
                .limit(limit)
                .all(&self.pool)
        )?;

        let inscriptions: Vec<InscriptionResponse> = ceremony_rows
            .into_iter()
            .filter_map(|(e, c)| c.map(|c| ceremony_inscription(e, c)))
            .chain(
                course_rows
                    .into_iter()
                    .filter_map(|(e, c)| c.map(|c| course_inscription(e, c))),
            )
            .collect();

        Ok(top_recent(inscriptions, limit as usize, |i| i.created_at))
    }
}
