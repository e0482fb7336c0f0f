use crate::aggregates::{history_item, history_page, history_stats, paid_history};
use crate::context::AuthContext;
use crate::entities::{ceremony_entity as ceremony, enrollment_entity as enrollment};
use crate::error::AppResult;
use crate::models::*;
use crate::utils::PaginatedResponse;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

#[derive(Clone)]
pub struct HistoryService {
    pool: DatabaseConnection,
    page_size: u32,
}

impl HistoryService {
    pub fn new(pool: DatabaseConnection, page_size: u32) -> Self {
        Self { pool, page_size }
    }

    /// Every enrollment of the caller joined with its ceremony, in storage order.
    async fn items(&self, house_id: Uuid, user_id: Uuid) -> AppResult<Vec<HistoryItem>> {
        let rows = enrollment::Entity::find()
            .find_also_related(ceremony::Entity)
            .filter(enrollment::Column::HouseId.eq(house_id))
            .filter(enrollment::Column::UserId.eq(user_id))
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(e, c)| c.map(|c| history_item(e, c)))
            .collect())
    }

    pub async fn history(
        &self,
        ctx: &AuthContext,
        page: Option<u32>,
    ) -> AppResult<PaginatedResponse<HistoryItem>> {
        let items = match ctx.house_id {
            Some(house_id) => self.items(house_id, ctx.user_id).await?,
            None => Vec::new(),
        };
        Ok(history_page(items, page, self.page_size))
    }

    pub async fn stats(&self, ctx: &AuthContext) -> AppResult<HistoryStats> {
        let Some(house_id) = ctx.house_id else {
            return Ok(HistoryStats::default());
        };
        let items = self.items(house_id, ctx.user_id).await?;
        Ok(history_stats(&paid_history(items)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Role;

    #[tokio::test]
    async fn test_missing_house_gives_empty_history() {
        let service = HistoryService::new(DatabaseConnection::from(sea_orm::DatabaseConnectionType::Disconnected), 10);
        let ctx = AuthContext {
            user_id: Uuid::new_v4(),
            house_id: None,
            role: Role::Member,
        };

        let page = service.history(&ctx, Some(1)).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total, 0);
        assert_eq!(service.stats(&ctx).await.unwrap(), HistoryStats::default());
    }
}
