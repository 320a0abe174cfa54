use crate::{error::AppError, models::User, utils::jwt::decode_jwt};
use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response, Extension};
use sea_orm::{DatabaseConnection, EntityTrait};

/// Extracted user information from the session token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub role: String,
}

/// JWT authentication middleware
///
/// Verifies the bearer token, checks the account is still present and
/// active, and adds user info to request extensions.
pub async fn auth_middleware(
    Extension(db): Extension<DatabaseConnection>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&headers).ok_or(AppError::Unauthorized)?;

    let claims = decode_jwt(&token).map_err(|_| AppError::Unauthorized)?;

    let user_id: i32 = claims
        .sub
        .parse()
        .map_err(|_| AppError::Validation("Invalid user ID in token".to_string()))?;

    let user = User::find_by_id(user_id)
        .one(&db)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !user.is_active {
        return Err(AppError::Unauthorized);
    }

    let auth_user = AuthUser {
        user_id: claims.sub,
        role: user.role,
    };
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;

    let token = auth_header.strip_prefix("Bearer ")?;
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Parse user_id from AuthUser string to i32
pub fn parse_user_id(auth_user: &AuthUser) -> crate::error::AppResult<i32> {
    auth_user
        .user_id
        .parse()
        .map_err(|_| AppError::Validation("Invalid user ID".to_string()))
}

/// Verify the current user has the ADMIN role
pub fn require_admin(auth_user: &AuthUser) -> crate::error::AppResult<i32> {
    if auth_user.role != crate::models::user::ROLE_ADMIN {
        return Err(AppError::Forbidden);
    }
    parse_user_id(auth_user)
}

/// Verify the current user may author content (EDITOR or ADMIN)
pub fn require_editor(auth_user: &AuthUser) -> crate::error::AppResult<i32> {
    match auth_user.role.as_str() {
        crate::models::user::ROLE_EDITOR | crate::models::user::ROLE_ADMIN => {
            parse_user_id(auth_user)
        }
        _ => Err(AppError::Forbidden),
    }
}

/// Extractor for AuthUser from request extensions
use axum::extract::FromRequestParts;

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_user(role: &str) -> AuthUser {
        AuthUser {
            user_id: "7".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn admin_passes_both_checks() {
        assert_eq!(require_admin(&auth_user("ADMIN")).unwrap(), 7);
        assert_eq!(require_editor(&auth_user("ADMIN")).unwrap(), 7);
    }

    #[test]
    fn editor_is_not_admin() {
        assert!(matches!(
            require_admin(&auth_user("EDITOR")),
            Err(AppError::Forbidden)
        ));
        assert_eq!(require_editor(&auth_user("EDITOR")).unwrap(), 7);
    }

    #[test]
    fn customer_cannot_write() {
        assert!(matches!(
            require_editor(&auth_user("CUSTOMER")),
            Err(AppError::Forbidden)
        ));
    }
}
