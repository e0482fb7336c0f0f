use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Member,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Unknown role strings degrade to `Member`.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("admin") => Role::Admin,
            Some("super_admin") => Role::SuperAdmin,
            _ => Role::Member,
        }
    }
}

/// Who is calling and on behalf of which house.
///
/// Built once per request from the access token and passed explicitly into
/// every service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub house_id: Option<Uuid>,
    pub role: Role,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin | Role::SuperAdmin)
    }

    /// Writes and lookups of a record by id need a house. Listings and
    /// aggregates short-circuit on `house_id` to an empty result instead.
    pub fn require_house(&self) -> AppResult<Uuid> {
        self.house_id
            .ok_or_else(|| AppError::ValidationError("No house selected".to_string()))
    }

    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_and_admin_gate() {
        assert_eq!(Role::parse(Some("admin")), Role::Admin);
        assert_eq!(Role::parse(Some("super_admin")), Role::SuperAdmin);
        assert_eq!(Role::parse(Some("authenticated")), Role::Member);
        assert_eq!(Role::parse(None), Role::Member);

        let ctx = AuthContext {
            user_id: Uuid::new_v4(),
            house_id: None,
            role: Role::Member,
        };
        assert!(matches!(ctx.require_admin(), Err(AppError::PermissionDenied)));
        let admin = AuthContext {
            role: Role::Admin,
            ..ctx
        };
        assert!(admin.require_admin().is_ok());
        assert!(matches!(admin.require_house(), Err(AppError::ValidationError(_))));
    }
}
