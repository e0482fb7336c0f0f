use crate::aggregates::next_waitlist_position;
use crate::context::AuthContext;
use crate::entities::{ceremony_entity as ceremony, waitlist_entity as waitlist};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct WaitlistService {
    pool: DatabaseConnection,
}

impl WaitlistService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Appends the caller to the ceremony's waitlist.
    ///
    /// The ceremony row is locked while the next position is computed, so two
    /// concurrent joins never receive the same position.
    pub async fn join(&self, ctx: &AuthContext, ceremony_id: Uuid) -> AppResult<WaitlistEntryResponse> {
        let house_id = ctx.require_house()?;
        let txn = self.pool.begin().await?;

        ceremony::Entity::find_by_id(ceremony_id)
            .filter(ceremony::Column::HouseId.eq(house_id))
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Ceremony not found".to_string()))?;

        let already = waitlist::Entity::find()
            .filter(waitlist::Column::CeremonyId.eq(ceremony_id))
            .filter(waitlist::Column::UserId.eq(ctx.user_id))
            .one(&txn)
            .await?;
        if already.is_some() {
            return Err(AppError::ValidationError(
                "Already on the waitlist for this ceremony".to_string(),
            ));
        }

        let current_max = waitlist::Entity::find()
            .select_only()
            .column_as(waitlist::Column::Position.max(), "max_position")
            .filter(waitlist::Column::CeremonyId.eq(ceremony_id))
            .into_tuple::<Option<i32>>()
            .one(&txn)
            .await?
            .flatten();
        let position = next_waitlist_position(current_max);

        let entry = waitlist::ActiveModel {
            id: Set(Uuid::new_v4()),
            house_id: Set(house_id),
            ceremony_id: Set(ceremony_id),
            user_id: Set(ctx.user_id),
            position: Set(position),
            notified: Set(false),
            created_at: Set(Some(Utc::now())),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        log::info!(
            "User {} joined waitlist of ceremony {ceremony_id} at position {position}",
            ctx.user_id
        );
        Ok(entry.into())
    }

    /// Stored position of the caller, if any.
    pub async fn position(
        &self,
        ctx: &AuthContext,
        ceremony_id: Uuid,
    ) -> AppResult<WaitlistPositionResponse> {
        let Some(house_id) = ctx.house_id else {
            return Ok(WaitlistPositionResponse {
                ceremony_id,
                position: None,
            });
        };

        let position = waitlist::Entity::find()
            .select_only()
            .column(waitlist::Column::Position)
            .filter(waitlist::Column::HouseId.eq(house_id))
            .filter(waitlist::Column::CeremonyId.eq(ceremony_id))
            .filter(waitlist::Column::UserId.eq(ctx.user_id))
            .into_tuple::<i32>()
            .one(&self.pool)
            .await?;

        Ok(WaitlistPositionResponse {
            ceremony_id,
            position,
        })
    }

    /// Removes the caller's entry. Remaining positions are left untouched.
    pub async fn leave(&self, ctx: &AuthContext, ceremony_id: Uuid) -> AppResult<()> {
        let house_id = ctx.require_house()?;
        let result = waitlist::Entity::delete_many()
            .filter(waitlist::Column::HouseId.eq(house_id))
            .filter(waitlist::Column::CeremonyId.eq(ceremony_id))
            .filter(waitlist::Column::UserId.eq(ctx.user_id))
            .exec(&self.pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Not on the waitlist".to_string()));
        }
        Ok(())
    }

    pub async fn list(
        &self,
        ctx: &AuthContext,
        ceremony_id: Uuid,
    ) -> AppResult<Vec<WaitlistEntryResponse>> {
        ctx.require_admin()?;
        let Some(house_id) = ctx.house_id else {
            return Ok(Vec::new());
        };

        let rows = waitlist::Entity::find()
            .filter(waitlist::Column::HouseId.eq(house_id))
            .filter(waitlist::Column::CeremonyId.eq(ceremony_id))
            .order_by_asc(waitlist::Column::Position)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(WaitlistEntryResponse::from).collect())
    }

    pub async fn mark_notified(&self, ctx: &AuthContext, entry_id: Uuid) -> AppResult<WaitlistEntryResponse> {
        ctx.require_admin()?;
        let house_id = ctx.require_house()?;
        let entry = waitlist::Entity::find_by_id(entry_id)
            .filter(waitlist::Column::HouseId.eq(house_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Waitlist entry not found".to_string()))?;

        let mut am = entry.into_active_model();
        am.notified = Set(true);
        Ok(am.update(&self.pool).await?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Role;
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn ctx(role: Role, house_id: Option<Uuid>) -> AuthContext {
        AuthContext {
            user_id: Uuid::new_v4(),
            house_id,
            role,
        }
    }

    fn ceremony_row(house_id: Uuid) -> ceremony::Model {
        ceremony::Model {
            id: Uuid::new_v4(),
            house_id,
            title: "Feitio".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 8, 2).unwrap(),
            time: None,
            capacity: Some(10),
            location: None,
            medicine: None,
            created_at: None,
        }
    }

    fn entry_row(ctx: &AuthContext, ceremony_id: Uuid, position: i32) -> waitlist::Model {
        waitlist::Model {
            id: Uuid::new_v4(),
            house_id: ctx.house_id.unwrap_or_default(),
            ceremony_id,
            user_id: ctx.user_id,
            position,
            notified: false,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_join_takes_position_after_highest_stored() {
        let caller = ctx(Role::Member, Some(Uuid::new_v4()));
        let ceremony = ceremony_row(caller.house_id.unwrap());
        // positions 1 and 3 are stored; the vacated 2 stays a gap
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ceremony.clone()]])
            .append_query_results([Vec::<waitlist::Model>::new()])
            .append_query_results([vec![BTreeMap::from([(
                "max_position",
                Value::Int(Some(3)),
            )])]])
            .append_query_results([vec![entry_row(&caller, ceremony.id, 4)]])
            .into_connection();
        let service = WaitlistService::new(db.clone());

        let entry = service.join(&caller, ceremony.id).await.unwrap();
        assert_eq!(entry.position, 4);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("INSERT INTO"));
        assert!(log.contains("Int(Some(4))"));
    }

    #[tokio::test]
    async fn test_join_empty_waitlist_starts_at_one() {
        let caller = ctx(Role::Member, Some(Uuid::new_v4()));
        let ceremony = ceremony_row(caller.house_id.unwrap());
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ceremony.clone()]])
            .append_query_results([Vec::<waitlist::Model>::new()])
            .append_query_results([vec![BTreeMap::from([("max_position", Value::Int(None))])]])
            .append_query_results([vec![entry_row(&caller, ceremony.id, 1)]])
            .into_connection();
        let service = WaitlistService::new(db.clone());

        service.join(&caller, ceremony.id).await.unwrap();
        assert!(format!("{:?}", db.into_transaction_log()).contains("Int(Some(1))"));
    }

    #[tokio::test]
    async fn test_join_twice_is_rejected() {
        let caller = ctx(Role::Member, Some(Uuid::new_v4()));
        let ceremony = ceremony_row(caller.house_id.unwrap());
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ceremony.clone()]])
            .append_query_results([vec![entry_row(&caller, ceremony.id, 2)]])
            .into_connection();
        let service = WaitlistService::new(db.clone());

        let result = service.join(&caller, ceremony.id).await;
        assert!(matches!(
            result,
            Err(AppError::ValidationError(msg)) if msg == "Already on the waitlist for this ceremony"
        ));
        assert!(!format!("{:?}", db.into_transaction_log()).contains("INSERT"));
    }

    #[tokio::test]
    async fn test_position_without_house_is_none() {
        let service = WaitlistService::new(DatabaseConnection::from(sea_orm::DatabaseConnectionType::Disconnected));
        let ceremony_id = Uuid::new_v4();
        let response = service
            .position(&ctx(Role::Member, None), ceremony_id)
            .await
            .unwrap();
        assert_eq!(response.ceremony_id, ceremony_id);
        assert_eq!(response.position, None);
    }

    #[tokio::test]
    async fn test_admin_operations_reject_members() {
        let service = WaitlistService::new(DatabaseConnection::from(sea_orm::DatabaseConnectionType::Disconnected));
        let member = ctx(Role::Member, Some(Uuid::new_v4()));
        assert!(matches!(
            service.list(&member, Uuid::new_v4()).await,
            Err(AppError::PermissionDenied)
        ));
        assert!(matches!(
            service.mark_notified(&member, Uuid::new_v4()).await,
            Err(AppError::PermissionDenied)
        ));
    }

    #[tokio::test]
    async fn test_join_requires_house() {
        let service = WaitlistService::new(DatabaseConnection::from(sea_orm::DatabaseConnectionType::Disconnected));
        assert!(matches!(
            service.join(&ctx(Role::Member, None), Uuid::new_v4()).await,
            Err(AppError::ValidationError(_))
        ));
    }
}
