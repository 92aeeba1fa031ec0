//! Role resolution for authenticated subjects.
//!
//! The directory record is the single authoritative privilege source. A
//! subject with no record gets one lazily, always with role USER. Store
//! failures never propagate out of resolution: the subject is treated as
//! non-privileged for the request.

use crate::models::{Role, User};
use crate::services::{PortalStore, SessionClaims};

/// Outcome of resolving a subject against the user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleResolution {
    /// An existing directory record supplied the role.
    Found(Role),
    /// No record existed; one was provisioned with role USER.
    Provisioned(Role),
    /// Resolution failed; the subject is treated as least-privileged.
    Denied,
}

impl RoleResolution {
    /// The role the request proceeds with. Denied degrades to USER.
    pub fn effective_role(&self) -> Role {
        match self {
            RoleResolution::Found(role) | RoleResolution::Provisioned(role) => *role,
            RoleResolution::Denied => Role::User,
        }
    }
}

pub async fn resolve_role(store: &dyn PortalStore, claims: &SessionClaims) -> RoleResolution {
    match store.find_user(claims.sub).await {
        Ok(Some(user)) => RoleResolution::Found(user.role()),
        Ok(None) => {
            let record = User::provisioned(claims.sub, claims.email.clone());
            match store.provision_user(&record).await {
                // A concurrent request may have won the upsert; the returned
                // record is authoritative either way.
                Ok(user) => RoleResolution::Provisioned(user.role()),
                Err(error) => {
                    tracing::warn!(
                        subject = %claims.sub,
                        %error,
                        "Failed to provision directory record; denying privileges"
                    );
                    RoleResolution::Denied
                }
            }
        }
        Err(error) => {
            tracing::warn!(
                subject = %claims.sub,
                %error,
                "Role lookup failed; denying privileges"
            );
            RoleResolution::Denied
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryStore;
    use chrono::Utc;
    use uuid::Uuid;

    fn claims_for(email: &str) -> SessionClaims {
        let now = Utc::now().timestamp();
        SessionClaims {
            sub: Uuid::new_v4(),
            email: email.to_string(),
            email_verified: true,
            exp: now + 3600,
            iat: now,
        }
    }

    #[tokio::test]
    async fn unknown_subject_is_provisioned_as_user() {
        let store = MemoryStore::new();
        let claims = claims_for("fresh@campus.edu");

        let resolution = resolve_role(&store, &claims).await;
        assert_eq!(resolution, RoleResolution::Provisioned(Role::User));

        let record = store.find_user(claims.sub).await.unwrap().unwrap();
        assert_eq!(record.role(), Role::User);
        assert_eq!(record.display_name, "fresh");
    }

    #[tokio::test]
    async fn repeated_resolution_is_idempotent() {
        let store = MemoryStore::new();
        let claims = claims_for("repeat@campus.edu");

        resolve_role(&store, &claims).await;
        let second = resolve_role(&store, &claims).await;

        assert_eq!(second, RoleResolution::Found(Role::User));
        assert_eq!(store.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn existing_admin_record_is_honored() {
        let store = MemoryStore::new();
        let claims = claims_for("dean@campus.edu");

        let mut record = User::provisioned(claims.sub, claims.email.clone());
        record.role_code = Role::Admin.as_str().to_string();
        store.provision_user(&record).await.unwrap();

        let resolution = resolve_role(&store, &claims).await;
        assert_eq!(resolution, RoleResolution::Found(Role::Admin));
    }

    #[tokio::test]
    async fn email_collision_fails_closed() {
        let store = MemoryStore::new();

        let first = claims_for("taken@campus.edu");
        resolve_role(&store, &first).await;

        // Different subject, same email: provisioning hits the uniqueness
        // constraint and the request proceeds unprivileged.
        let mut second = claims_for("other@campus.edu");
        second.email = "taken@campus.edu".to_string();

        let resolution = resolve_role(&store, &second).await;
        assert_eq!(resolution, RoleResolution::Denied);
        assert_eq!(resolution.effective_role(), Role::User);
        assert_eq!(store.count_users().await.unwrap(), 1);
    }
}
