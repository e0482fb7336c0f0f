use crate::context::AuthContext;
use crate::entities::house_entity as house;
use crate::error::{AppError, AppResult};
use crate::models::HouseResponse;
use sea_orm::{DatabaseConnection, EntityTrait};

#[derive(Clone)]
pub struct HouseService {
    pool: DatabaseConnection,
}

impl HouseService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// The house selected in the caller's token.
    pub async fn current(&self, ctx: &AuthContext) -> AppResult<HouseResponse> {
        let house_id = ctx.require_house()?;
        let house = house::Entity::find_by_id(house_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("House not found".to_string()))?;
        if !house.is_active {
            return Err(AppError::Forbidden);
        }
        Ok(house.into())
    }
}
