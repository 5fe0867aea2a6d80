//! `registerUser`, `linkAdminToNonAdmin` and `getUsers`.
//!
//! Bodies are read as raw bytes and parsed here so that a malformed or oversized body, or a
//! missing `Content-Type`, produces the same `{"error": ...}` shape as every other client error.

use crate::error::AppError;
use crate::model::{NewUser, PermissionOverrides, Role};
use crate::response::{created, message, ok};
use crate::service::{RegistrationService, RelationshipManager};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const MISSING_REGISTER_FIELDS: &str = "Missing required fields: name, email, or role.";
pub const MISSING_LINK_FIELDS: &str = "Missing admin_email or non_admin_email.";
pub const LINKED: &str = "Admin linked to Non-Admin successfully.";

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub permissions: Option<PermissionOverrides>,
    #[serde(default)]
    pub linked_admins: Option<Vec<String>>,
    #[serde(default)]
    pub linked_non_admins: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub id: i32,
    pub role: Role,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unlinked: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LinkRequest {
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default)]
    pub non_admin_email: Option<String>,
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::Validation(format!("Invalid JSON body: {}", e)))
}

/// Absent, null and blank strings all count as missing.
fn present(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

/// POST /api/registerUser
pub async fn register_user(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("registering user");
    let req: RegisterRequest = parse_body(&body?)?;
    let (Some(name), Some(email), Some(role)) = (present(req.name), present(req.email), present(req.role)) else {
        return Err(AppError::Validation(MISSING_REGISTER_FIELDS.into()));
    };
    let user = NewUser::new(name, email, &role, req.permissions.as_ref())?;

    let linked_admins = req.linked_admins.unwrap_or_default();
    let linked_non_admins = req.linked_non_admins.unwrap_or_default();
    let reg = RegistrationService::register(state.store.as_ref(), &user, &linked_admins, &linked_non_admins).await?;

    Ok(created(RegisterResponse {
        message: format!("User {} registered successfully.", user.name()),
        id: reg.id,
        role: reg.role,
        unlinked: reg.unlinked,
    }))
}

/// POST /api/linkAdminToNonAdmin
pub async fn link_admin_to_non_admin(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req: LinkRequest = parse_body(&body?)?;
    let (Some(admin_email), Some(non_admin_email)) = (present(req.admin_email), present(req.non_admin_email)) else {
        return Err(AppError::Validation(MISSING_LINK_FIELDS.into()));
    };
    RelationshipManager::link(state.store.as_ref(), &admin_email, &non_admin_email).await?;
    Ok(message(LINKED))
}

/// GET /api/getUsers
pub async fn get_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    tracing::info!("listing users");
    let users = state.store.list_users().await?;
    Ok(ok(users))
}
