use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::{header, request::Parts};

use crate::api::errors::ApiError;
use crate::core::security::{self, SecurityError};
use crate::core::state::AppState;
use crate::db::models::User;
use crate::repositories;

pub(crate) use crate::db::types::UserRole as Role;

/// The caller behind a verified bearer token.
#[derive(Debug, Clone)]
pub(crate) struct AuthContext {
    pub(crate) user_id: String,
    pub(crate) role: Role,
    pub(crate) user: User,
}

impl AuthContext {
    pub(crate) fn require(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.contains(&self.role) {
            return Ok(());
        }

        let names = allowed.iter().map(|role| role.as_str()).collect::<Vec<_>>().join(" or ");
        Err(ApiError::Forbidden(format!("Access denied. Only {names} can access this.")))
    }
}

pub(crate) struct StudentAuth(pub(crate) AuthContext);
pub(crate) struct TeacherAuth(pub(crate) AuthContext);
pub(crate) struct AdminAuth(pub(crate) AuthContext);

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(ApiError::Unauthorized("Access denied. No token provided."))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid token"))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(ApiError::Unauthorized("Invalid token format. Use Bearer TOKEN"))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state) = State::<AppState>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to access application state"))?;

        let token = bearer_token(parts)?;

        let claims =
            security::verify_token(token, app_state.settings()).map_err(|err| match err {
                SecurityError::JwtExpired => ApiError::Unauthorized("Token has expired"),
                _ => ApiError::Unauthorized("Invalid token"),
            })?;

        let user = repositories::users::find_by_id(app_state.db(), &claims.sub)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load user"))?;

        let Some(user) = user else {
            return Err(ApiError::Unauthorized("User not found"));
        };

        Ok(AuthContext { user_id: user.id.clone(), role: user.role, user })
    }
}

async fn authorize(
    parts: &mut Parts,
    state: &AppState,
    role: Role,
) -> Result<AuthContext, ApiError> {
    let auth = AuthContext::from_request_parts(parts, state).await?;
    auth.require(&[role])?;
    Ok(auth)
}

#[async_trait]
impl FromRequestParts<AppState> for StudentAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, Role::Student).await.map(StudentAuth)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for TeacherAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, Role::Teacher).await.map(TeacherAuth)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, Role::Admin).await.map(AdminAuth)
    }
}
