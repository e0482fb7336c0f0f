use crate::aggregates::top_recent;
use crate::context::AuthContext;
use crate::entities::testimonial_entity as testimonial;
use crate::error::AppResult;
use crate::models::*;
use crate::services::ceremony_service::clamp_limit;
use sea_orm::sea_query::NullOrdering;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect,
};

#[derive(Clone)]
pub struct TestimonialService {
    pool: DatabaseConnection,
    recent_limit: u64,
}

impl TestimonialService {
    pub fn new(pool: DatabaseConnection, recent_limit: u64) -> Self {
        Self { pool, recent_limit }
    }

    /// Latest approved testimonials of the house.
    pub async fn recent(&self, ctx: &AuthContext, limit: Option<u64>) -> AppResult<Vec<TestimonialResponse>> {
        let Some(house_id) = ctx.house_id else {
            return Ok(Vec::new());
        };
        let limit = clamp_limit(limit, self.recent_limit);

        let rows = testimonial::Entity::find()
            .filter(testimonial::Column::HouseId.eq(house_id))
            .filter(testimonial::Column::Approved.eq(true))
            .order_by_with_nulls(testimonial::Column::CreatedAt, Order::Desc, NullOrdering::Last)
            .limit(limit)
            .all(&self.pool)
            .await?;

        Ok(top_recent(rows, limit as usize, |t| t.created_at)
            .into_iter()
            .map(TestimonialResponse::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Role;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_recent_orders_undated_last() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<testimonial::Model>::new()])
            .into_connection();
        let service = TestimonialService::new(db.clone(), 5);
        let ctx = AuthContext {
            user_id: Uuid::new_v4(),
            house_id: Some(Uuid::new_v4()),
            role: Role::Member,
        };

        assert!(service.recent(&ctx, Some(3)).await.unwrap().is_empty());
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("DESC NULLS LAST"));
    }

    #[tokio::test]
    async fn test_recent_without_house_is_empty() {
        let service = TestimonialService::new(DatabaseConnection::from(sea_orm::DatabaseConnectionType::Disconnected), 5);
        let ctx = AuthContext {
            user_id: Uuid::new_v4(),
            house_id: None,
            role: Role::Member,
        };
        assert!(service.recent(&ctx, None).await.unwrap().is_empty());
    }
}
