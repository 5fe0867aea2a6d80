//! User registration: insert the entity, then apply any inline links.

use crate::error::AppError;
use crate::model::{NewUser, Role};
use crate::service::relationship::RelationshipManager;
use crate::store::UserStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub id: i32,
    pub role: Role,
    /// Linked emails that did not resolve to a user of the opposite role.
    pub unlinked: Vec<String>,
}

pub struct RegistrationService;

impl RegistrationService {
    /// `linked_admins` applies to non-admins, `linked_non_admins` to admins; the other list is ignored.
    /// The insert and each link are separate statements: a failure while linking leaves the user registered.
    pub async fn register(
        store: &dyn UserStore,
        user: &NewUser,
        linked_admins: &[String],
        linked_non_admins: &[String],
    ) -> Result<Registration, AppError> {
        let id = store.insert_user(user).await?;
        tracing::info!(id, role = %user.role(), name = %user.name(), "user registered");

        let unlinked = match user {
            NewUser::NonAdmin { .. } => {
                RelationshipManager::link_non_admin_to_admins(store, id, linked_admins).await?
            }
            NewUser::Admin { email, .. } | NewUser::SuperAdmin { email, .. } => {
                RelationshipManager::link_admin_to_non_admins(store, id, email, linked_non_admins).await?
            }
        };

        Ok(Registration {
            id,
            role: user.role(),
            unlinked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Link;
    use crate::store::memory::MemoryStore;

    fn emails(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn duplicate_email_fails_second_time() {
        let store = MemoryStore::new();
        let user = NewUser::new("Ann", "ann@example.com", "Admin", None).unwrap();
        let first = RegistrationService::register(&store, &user, &[], &[]).await.unwrap();
        assert_eq!(first.id, 1);
        let second = RegistrationService::register(&store, &user, &[], &[]).await.unwrap_err();
        assert!(matches!(second, AppError::Uniqueness));
    }

    #[tokio::test]
    async fn non_admin_links_to_listed_admins() {
        let store = MemoryStore::new();
        let admin = NewUser::new("Ann", "ann@example.com", "Admin", None).unwrap();
        RegistrationService::register(&store, &admin, &[], &[]).await.unwrap();

        let nia = NewUser::new("Nia", "nia@example.com", "Non-Admin", None).unwrap();
        let reg = RegistrationService::register(
            &store,
            &nia,
            &emails(&["ann@example.com", "ghost@example.com"]),
            &emails(&["ignored@example.com"]),
        )
        .await
        .unwrap();
        assert_eq!(reg.role, Role::NonAdmin);
        assert_eq!(reg.unlinked, emails(&["ghost@example.com"]));
        assert_eq!(
            store.links(),
            vec![Link {
                admin_id: 1,
                non_admin_id: reg.id,
                admin_email: "ann@example.com".into()
            }]
        );
    }

    #[tokio::test]
    async fn admin_links_to_listed_non_admins() {
        let store = MemoryStore::new();
        let nia = NewUser::new("Nia", "nia@example.com", "Non-Admin", None).unwrap();
        RegistrationService::register(&store, &nia, &[], &[]).await.unwrap();

        let sam = NewUser::new("Sam", "sam@example.com", "SuperAdmin", None).unwrap();
        let reg = RegistrationService::register(&store, &sam, &[], &emails(&["nia@example.com"]))
            .await
            .unwrap();
        assert!(reg.unlinked.is_empty());
        assert_eq!(store.links().len(), 1);
        assert_eq!(store.links()[0].admin_email, "sam@example.com");
    }
}
