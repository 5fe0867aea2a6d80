//! In-process `UserStore` for router and service tests. Mirrors the unique email constraints.

use crate::error::AppError;
use crate::model::{Link, NewUser, Permissions, Role, UserRecord};
use crate::store::UserStore;
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    admins: Vec<(i32, String, String, Permissions, bool)>,
    non_admins: Vec<(i32, String, String, i32)>,
    links: Vec<Link>,
    writes: usize,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    /// When set every call fails like an unreachable database.
    pub fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        MemoryStore {
            fail: true,
            ..Default::default()
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        if self.fail {
            return Err(AppError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(self.tables.lock().unwrap())
    }

    pub fn links(&self) -> Vec<Link> {
        self.tables.lock().unwrap().links.clone()
    }

    /// Successful inserts into any table.
    pub fn writes(&self) -> usize {
        self.tables.lock().unwrap().writes
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &NewUser) -> Result<i32, AppError> {
        let mut t = self.lock()?;
        let email = user.email().to_string();
        let name = user.name().to_string();
        let id = match user {
            NewUser::SuperAdmin { permissions, .. } | NewUser::Admin { permissions, .. } => {
                if t.admins.iter().any(|a| a.2 == email) {
                    return Err(AppError::Uniqueness);
                }
                let id = t.admins.len() as i32 + 1;
                let is_super = user.role() == Role::SuperAdmin;
                t.admins.push((id, name, email, *permissions, is_super));
                id
            }
            NewUser::NonAdmin { .. } => {
                if t.non_admins.iter().any(|n| n.2 == email) {
                    return Err(AppError::Uniqueness);
                }
                let id = t.non_admins.len() as i32 + 1;
                t.non_admins.push((id, name, email, 0));
                id
            }
        };
        t.writes += 1;
        Ok(id)
    }

    async fn admin_id_by_email(&self, email: &str) -> Result<Option<i32>, AppError> {
        Ok(self.lock()?.admins.iter().find(|a| a.2 == email).map(|a| a.0))
    }

    async fn non_admin_id_by_email(&self, email: &str) -> Result<Option<i32>, AppError> {
        Ok(self.lock()?.non_admins.iter().find(|n| n.2 == email).map(|n| n.0))
    }

    async fn insert_link(&self, link: &Link) -> Result<(), AppError> {
        let mut t = self.lock()?;
        t.links.push(link.clone());
        t.writes += 1;
        Ok(())
    }

    async fn links_for_admin(&self, admin_id: i32) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self.lock()?.links.iter().filter(|l| l.admin_id == admin_id).cloned().collect();
        links.sort_by_key(|l| l.non_admin_id);
        Ok(links)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, AppError> {
        let t = self.lock()?;
        let admins = t.admins.iter().map(|(id, name, email, p, is_super)| UserRecord {
            id: *id,
            name: name.clone(),
            email: email.clone(),
            role: if *is_super { Role::SuperAdmin } else { Role::Admin },
            permissions: Some(*p),
            family_member_count: None,
        });
        let non_admins = t.non_admins.iter().map(|(id, name, email, count)| UserRecord {
            id: *id,
            name: name.clone(),
            email: email.clone(),
            role: Role::NonAdmin,
            permissions: None,
            family_member_count: Some(*count),
        });
        Ok(admins.chain(non_admins).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }
}
