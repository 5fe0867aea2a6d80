//! Admin to non-admin links.

use crate::error::AppError;
use crate::model::Link;
use crate::store::UserStore;

pub const PARTY_NOT_FOUND: &str = "Admin or Non-Admin not found.";

pub struct RelationshipManager;

impl RelationshipManager {
    /// Resolve both emails and insert one link row. Nothing is written when either is unknown.
    /// Repeated calls for the same pair insert repeated rows.
    pub async fn link(store: &dyn UserStore, admin_email: &str, non_admin_email: &str) -> Result<Link, AppError> {
        let admin_id = store.admin_id_by_email(admin_email).await?;
        let non_admin_id = store.non_admin_id_by_email(non_admin_email).await?;
        let (Some(admin_id), Some(non_admin_id)) = (admin_id, non_admin_id) else {
            return Err(AppError::NotFound(PARTY_NOT_FOUND.into()));
        };
        let link = Link {
            admin_id,
            non_admin_id,
            admin_email: admin_email.to_string(),
        };
        store.insert_link(&link).await?;
        tracing::info!(admin_id, non_admin_id, "admin linked to non-admin");
        Ok(link)
    }

    /// Link a freshly registered non-admin to each admin email. Returns emails that matched no admin.
    pub async fn link_non_admin_to_admins(
        store: &dyn UserStore,
        non_admin_id: i32,
        admin_emails: &[String],
    ) -> Result<Vec<String>, AppError> {
        let mut unlinked = Vec::new();
        for admin_email in admin_emails {
            match store.admin_id_by_email(admin_email).await? {
                Some(admin_id) => {
                    store
                        .insert_link(&Link {
                            admin_id,
                            non_admin_id,
                            admin_email: admin_email.clone(),
                        })
                        .await?;
                }
                None => {
                    tracing::warn!(%admin_email, non_admin_id, "linked admin not found, skipping");
                    unlinked.push(admin_email.clone());
                }
            }
        }
        Ok(unlinked)
    }

    /// Link a freshly registered admin to each non-admin email. Returns emails that matched no non-admin.
    pub async fn link_admin_to_non_admins(
        store: &dyn UserStore,
        admin_id: i32,
        admin_email: &str,
        non_admin_emails: &[String],
    ) -> Result<Vec<String>, AppError> {
        let mut unlinked = Vec::new();
        for non_admin_email in non_admin_emails {
            match store.non_admin_id_by_email(non_admin_email).await? {
                Some(non_admin_id) => {
                    store
                        .insert_link(&Link {
                            admin_id,
                            non_admin_id,
                            admin_email: admin_email.to_string(),
                        })
                        .await?;
                }
                None => {
                    tracing::warn!(%non_admin_email, admin_id, "linked non-admin not found, skipping");
                    unlinked.push(non_admin_email.clone());
                }
            }
        }
        Ok(unlinked)
    }
}
