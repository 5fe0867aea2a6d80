//! Domain entities: roles, permission flags, users to register and stored records.

use crate::db::QueryExecutor;
use crate::error::AppError;
use crate::sql::Statement;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    SuperAdmin,
    Admin,
    #[serde(rename = "Non-Admin")]
    NonAdmin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::SuperAdmin, Role::Admin, Role::NonAdmin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SuperAdmin",
            Role::Admin => "Admin",
            Role::NonAdmin => "Non-Admin",
        }
    }

    /// SuperAdmin and Admin rows live in `admins`.
    pub fn is_admin(&self) -> bool {
        !matches!(self, Role::NonAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Role::ALL.iter().map(|r| r.as_str()).collect();
                AppError::Validation(format!("Role must be one of [{}]", names.join(", ")))
            })
    }
}

/// Permission flags as supplied in a request; absent flags take the role default.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionOverrides {
    #[serde(default)]
    pub remote_access: Option<bool>,
    #[serde(default)]
    pub video_call: Option<bool>,
    #[serde(default)]
    pub voice_call: Option<bool>,
    #[serde(default)]
    pub manage_users: Option<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub remote_access: bool,
    pub video_call: bool,
    pub voice_call: bool,
    pub manage_users: bool,
}

impl Permissions {
    pub fn all(value: bool) -> Self {
        Permissions {
            remote_access: value,
            video_call: value,
            voice_call: value,
            manage_users: value,
        }
    }

    pub fn with_overrides(default: bool, o: &PermissionOverrides) -> Self {
        Permissions {
            remote_access: o.remote_access.unwrap_or(default),
            video_call: o.video_call.unwrap_or(default),
            voice_call: o.voice_call.unwrap_or(default),
            manage_users: o.manage_users.unwrap_or(default),
        }
    }
}

/// A user about to be registered. One variant per role, each with the fields its table needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NewUser {
    SuperAdmin {
        name: String,
        email: String,
        permissions: Permissions,
    },
    Admin {
        name: String,
        email: String,
        permissions: Permissions,
    },
    NonAdmin {
        name: String,
        email: String,
    },
}

const INSERT_ADMIN: &str = "INSERT INTO admins (name, email, remote_access, video_call, voice_call, manage_users, is_super_admin) \
     VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id";

const INSERT_NON_ADMIN: &str = "INSERT INTO non_admins (name, email, family_member_count) VALUES ($1, $2, $3) RETURNING id";

impl NewUser {
    /// Validates the role tag and applies role defaults: SuperAdmin flags default true, Admin
    /// flags default false. Permissions are ignored for Non-Admin.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: &str,
        permissions: Option<&PermissionOverrides>,
    ) -> Result<Self, AppError> {
        let role: Role = role.parse()?;
        let name = name.into();
        let email = email.into();
        let overrides = permissions.cloned().unwrap_or_default();
        Ok(match role {
            Role::SuperAdmin => NewUser::SuperAdmin {
                name,
                email,
                permissions: Permissions::with_overrides(true, &overrides),
            },
            Role::Admin => NewUser::Admin {
                name,
                email,
                permissions: Permissions::with_overrides(false, &overrides),
            },
            Role::NonAdmin => NewUser::NonAdmin { name, email },
        })
    }

    pub fn role(&self) -> Role {
        match self {
            NewUser::SuperAdmin { .. } => Role::SuperAdmin,
            NewUser::Admin { .. } => Role::Admin,
            NewUser::NonAdmin { .. } => Role::NonAdmin,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NewUser::SuperAdmin { name, .. } | NewUser::Admin { name, .. } | NewUser::NonAdmin { name, .. } => name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            NewUser::SuperAdmin { email, .. } | NewUser::Admin { email, .. } | NewUser::NonAdmin { email, .. } => email,
        }
    }

    pub fn permissions(&self) -> Option<Permissions> {
        match self {
            NewUser::SuperAdmin { permissions, .. } | NewUser::Admin { permissions, .. } => Some(*permissions),
            NewUser::NonAdmin { .. } => None,
        }
    }

    /// `INSERT ... RETURNING id` for the table this variant belongs to.
    pub fn insert_statement(&self) -> Statement {
        match self {
            NewUser::SuperAdmin { name, email, permissions } => admin_insert(name, email, permissions, true),
            NewUser::Admin { name, email, permissions } => admin_insert(name, email, permissions, false),
            NewUser::NonAdmin { name, email } => Statement::new(INSERT_NON_ADMIN)
                .bind(name.as_str())
                .bind(email.as_str())
                .bind(0),
        }
    }

    /// Insert and return the generated id.
    pub async fn save_to_db(&self, executor: &QueryExecutor) -> Result<i32, AppError> {
        let row = executor
            .fetch_one(&self.insert_statement())
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        Ok(row.try_get::<i32, _>("id")?)
    }
}

fn admin_insert(name: &str, email: &str, p: &Permissions, is_super_admin: bool) -> Statement {
    Statement::new(INSERT_ADMIN)
        .bind(name)
        .bind(email)
        .bind(p.remote_access)
        .bind(p.video_call)
        .bind(p.voice_call)
        .bind(p.manage_users)
        .bind(is_super_admin)
}

/// A row of `admin_non_admin`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Link {
    pub admin_id: i32,
    pub non_admin_id: i32,
    pub admin_email: String,
}

/// One entry of the user listing. Admins carry `permissions`, non-admins `family_member_count`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_member_count: Option<i32>,
}
