use crate::context::AuthContext;
use crate::entities::category_entity as cat;
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

const DEFAULT_COLOR: &str = "#6B7280";

/// Accepts `#RGB` and `#RRGGBB`.
fn validate_color(color: &str) -> AppResult<()> {
    let hex = color.strip_prefix('#').unwrap_or("");
    let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(AppError::ValidationError(format!("Invalid color: {color}")))
    }
}

fn validate_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 80 {
        return Err(AppError::ValidationError(
            "Category name must have 1 to 80 characters".to_string(),
        ));
    }
    Ok(name.to_string())
}

#[derive(Clone)]
pub struct CategoryService {
    pool: DatabaseConnection,
}

impl CategoryService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        ctx: &AuthContext,
        query: &CategoryQuery,
    ) -> AppResult<Vec<CategoryResponse>> {
        let Some(house_id) = ctx.house_id else {
            return Ok(Vec::new());
        };

        let mut select = cat::Entity::find().filter(cat::Column::HouseId.eq(house_id));
        if let Some(kind) = query.kind {
            select = select.filter(cat::Column::Kind.eq(kind));
        }
        if query.only_active.unwrap_or(true) {
            select = select.filter(cat::Column::IsActive.eq(true));
        }

        let rows = select
            .order_by_asc(cat::Column::Kind)
            .order_by_asc(cat::Column::Name)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(CategoryResponse::from).collect())
    }

    pub async fn create(
        &self,
        ctx: &AuthContext,
        req: CreateCategoryRequest,
    ) -> AppResult<CategoryResponse> {
        ctx.require_admin()?;
        let house_id = ctx.require_house()?;
        let name = validate_name(&req.name)?;
        let color = req.color.unwrap_or_else(|| DEFAULT_COLOR.to_string());
        validate_color(&color)?;

        let model = cat::ActiveModel {
            id: Set(Uuid::new_v4()),
            house_id: Set(house_id),
            name: Set(name),
            kind: Set(req.kind),
            color: Set(color),
            is_active: Set(true),
            created_at: Set(Some(Utc::now())),
        }
        .insert(&self.pool)
        .await?;

        Ok(model.into())
    }

    async fn find(&self, house_id: Uuid, id: Uuid) -> AppResult<cat::Model> {
        cat::Entity::find_by_id(id)
            .filter(cat::Column::HouseId.eq(house_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: Uuid,
        req: UpdateCategoryRequest,
    ) -> AppResult<CategoryResponse> {
        ctx.require_admin()?;
        let house_id = ctx.require_house()?;
        let mut am = self.find(house_id, id).await?.into_active_model();

        if let Some(name) = req.name {
            am.name = Set(validate_name(&name)?);
        }
        if let Some(color) = req.color {
            validate_color(&color)?;
            am.color = Set(color);
        }

        Ok(am.update(&self.pool).await?.into())
    }

    /// Soft delete: transactions keep pointing at the category.
    pub async fn deactivate(&self, ctx: &AuthContext, id: Uuid) -> AppResult<CategoryResponse> {
        ctx.require_admin()?;
        let house_id = ctx.require_house()?;
        let mut am = self.find(house_id, id).await?.into_active_model();
        am.is_active = Set(false);
        let model = am.update(&self.pool).await?;
        log::info!("Category {id} disabled in house {house_id}");
        Ok(model.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_validation() {
        assert!(validate_color("#10B981").is_ok());
        assert!(validate_color("#fff").is_ok());
        assert!(validate_color("10B981").is_err());
        assert!(validate_color("#10B98").is_err());
        assert!(validate_color("#GGGGGG").is_err());
        assert!(validate_color(DEFAULT_COLOR).is_ok());
    }

    #[test]
    fn test_name_is_trimmed_and_bounded() {
        assert_eq!(validate_name("  Doações ").unwrap(), "Doações");
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"a".repeat(81)).is_err());
    }
}
