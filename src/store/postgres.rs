//! `UserStore` over PostgreSQL through the `QueryExecutor`.

use crate::db::QueryExecutor;
use crate::error::AppError;
use crate::model::{Link, NewUser, Permissions, Role, UserRecord};
use crate::sql::Statement;
use crate::store::UserStore;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::Row;

const ADMIN_ID_BY_EMAIL: &str = "SELECT id FROM admins WHERE email = $1";
const NON_ADMIN_ID_BY_EMAIL: &str = "SELECT id FROM non_admins WHERE email = $1";
const INSERT_LINK: &str = "INSERT INTO admin_non_admin (admin_id, non_admin_id, admin_email) VALUES ($1, $2, $3)";
const LINKS_FOR_ADMIN: &str =
    "SELECT admin_id, non_admin_id, admin_email FROM admin_non_admin WHERE admin_id = $1 ORDER BY non_admin_id";

/// Both tables in one round trip. `kind` keeps admins ahead of non-admins.
const LIST_USERS: &str = r#"
    SELECT id, name, email,
           CASE WHEN is_super_admin THEN 'SuperAdmin' ELSE 'Admin' END AS role,
           remote_access, video_call, voice_call, manage_users,
           NULL::INTEGER AS family_member_count,
           0 AS kind
    FROM admins
    UNION ALL
    SELECT id, name, email,
           'Non-Admin' AS role,
           NULL, NULL, NULL, NULL,
           family_member_count,
           1 AS kind
    FROM non_admins
    ORDER BY kind, id
"#;

#[derive(Clone)]
pub struct PgUserStore {
    executor: QueryExecutor,
}

impl PgUserStore {
    pub fn new(executor: QueryExecutor) -> Self {
        PgUserStore { executor }
    }

    async fn id_by_email(&self, sql: &'static str, email: &str) -> Result<Option<i32>, AppError> {
        let row = self.executor.fetch_one(&Statement::new(sql).bind(email)).await?;
        match row {
            Some(r) => Ok(Some(r.try_get::<i32, _>("id")?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert_user(&self, user: &NewUser) -> Result<i32, AppError> {
        user.save_to_db(&self.executor).await
    }

    async fn admin_id_by_email(&self, email: &str) -> Result<Option<i32>, AppError> {
        self.id_by_email(ADMIN_ID_BY_EMAIL, email).await
    }

    async fn non_admin_id_by_email(&self, email: &str) -> Result<Option<i32>, AppError> {
        self.id_by_email(NON_ADMIN_ID_BY_EMAIL, email).await
    }

    async fn insert_link(&self, link: &Link) -> Result<(), AppError> {
        let stmt = Statement::new(INSERT_LINK)
            .bind(link.admin_id)
            .bind(link.non_admin_id)
            .bind(link.admin_email.as_str());
        self.executor.execute(&stmt).await?;
        Ok(())
    }

    async fn links_for_admin(&self, admin_id: i32) -> Result<Vec<Link>, AppError> {
        let rows = self
            .executor
            .fetch_all(&Statement::new(LINKS_FOR_ADMIN).bind(admin_id))
            .await?;
        rows.iter()
            .map(|r| -> Result<Link, AppError> {
                Ok(Link {
                    admin_id: r.try_get("admin_id")?,
                    non_admin_id: r.try_get("non_admin_id")?,
                    admin_email: r.try_get("admin_email")?,
                })
            })
            .collect()
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, AppError> {
        let rows = self.executor.fetch_all(&Statement::new(LIST_USERS)).await?;
        rows.iter().map(row_to_record).collect()
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.executor.fetch_one(&Statement::new("SELECT 1")).await?;
        Ok(())
    }
}

fn row_to_record(row: &PgRow) -> Result<UserRecord, AppError> {
    let role: Role = row.try_get::<String, _>("role")?.parse()?;
    let permissions = if role.is_admin() {
        Some(Permissions {
            remote_access: row.try_get("remote_access")?,
            video_call: row.try_get("video_call")?,
            voice_call: row.try_get("voice_call")?,
            manage_users: row.try_get("manage_users")?,
        })
    } else {
        None
    };
    Ok(UserRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        role,
        permissions,
        family_member_count: row.try_get::<Option<i32>, _>("family_member_count")?,
    })
}
