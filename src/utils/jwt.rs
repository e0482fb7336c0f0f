use crate::context::{AuthContext, Role};
use crate::error::{AppError, AppResult};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims of an access token issued by the identity provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub aud: Option<String>,
    #[serde(default)]
    pub app_role: Option<String>,
    #[serde(default)]
    pub house_id: Option<String>,
}

#[derive(Clone)]
pub struct JwtService {
    decoding_key: DecodingKey,
    audience: Option<String>,
}

impl JwtService {
    pub fn new(secret: &str, audience: Option<String>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            audience,
        }
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        match &self.audience {
            Some(aud) => validation.set_audience(&[aud.as_str()]),
            None => validation.validate_aud = false,
        }
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)
    }

    pub fn verify_access_token(&self, token: &str) -> AppResult<AuthContext> {
        let claims = self.verify_token(token)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::AuthError("Invalid subject in access token".to_string()))?;
        // a malformed house id is treated as "no house selected"
        let house_id = claims
            .house_id
            .as_deref()
            .and_then(|h| Uuid::parse_str(h).ok());

        Ok(AuthContext {
            user_id,
            house_id,
            role: Role::parse(claims.app_role.as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &str = "test-secret";

    fn token(sub: &str, exp_offset: i64, house: Option<&str>, role: Option<&str>) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp: (Utc::now() + Duration::seconds(exp_offset)).timestamp(),
            iat: Some(Utc::now().timestamp()),
            aud: Some("authenticated".to_string()),
            app_role: role.map(str::to_string),
            house_id: house.map(str::to_string),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_builds_context() {
        let service = JwtService::new(SECRET, Some("authenticated".to_string()));
        let user = Uuid::new_v4();
        let house = Uuid::new_v4();
        let ctx = service
            .verify_access_token(&token(
                &user.to_string(),
                3600,
                Some(&house.to_string()),
                Some("admin"),
            ))
            .unwrap();
        assert_eq!(ctx.user_id, user);
        assert_eq!(ctx.house_id, Some(house));
        assert_eq!(ctx.role, Role::Admin);
    }

    #[test]
    fn test_missing_house_is_none() {
        let service = JwtService::new(SECRET, None);
        let ctx = service
            .verify_access_token(&token(&Uuid::new_v4().to_string(), 3600, Some("nope"), None))
            .unwrap();
        assert_eq!(ctx.house_id, None);
        assert_eq!(ctx.role, Role::Member);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = JwtService::new(SECRET, None);
        let result = service.verify_access_token(&token(&Uuid::new_v4().to_string(), -3600, None, None));
        assert!(matches!(result, Err(AppError::JwtError(_))));
    }

    #[test]
    fn test_wrong_secret_and_garbage_are_rejected() {
        let service = JwtService::new("another-secret", None);
        assert!(service
            .verify_access_token(&token(&Uuid::new_v4().to_string(), 3600, None, None))
            .is_err());
        assert!(service.verify_access_token("not.a.jwt").is_err());
    }

    #[test]
    fn test_non_uuid_subject_is_rejected() {
        let service = JwtService::new(SECRET, None);
        let result = service.verify_access_token(&token("42", 3600, None, None));
        assert!(matches!(result, Err(AppError::AuthError(_))));
    }
}
