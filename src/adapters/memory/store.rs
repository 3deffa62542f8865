//! In-memory implementation of the membership ports.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, MembershipId, UserId};
use crate::domain::membership::Membership;
use crate::ports::{
    MembershipReader, MembershipRepository, MembershipView, UserDirectory, UserRef,
};

#[derive(Debug, Default)]
struct StoreInner {
    users: HashMap<UserId, UserRef>,
    memberships: HashMap<MembershipId, Membership>,
}

/// In-memory store implementing repository, reader, and user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryMembershipStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user and return its directory entry.
    pub async fn register_user(&self, email: &str) -> UserRef {
        let user = UserRef {
            id: UserId::new(),
            email: email.to_string(),
            membership: None,
        };
        self.inner
            .write()
            .await
            .users
            .insert(user.id, user.clone());
        user
    }

    /// Fetch a user's current directory entry.
    pub async fn user(&self, id: &UserId) -> Option<UserRef> {
        self.inner.read().await.users.get(id).cloned()
    }

    /// Number of membership rows currently stored, blocked ones included.
    pub async fn membership_count(&self) -> usize {
        self.inner.read().await.memberships.len()
    }

    /// Clear all stored data (useful for tests).
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.users.clear();
        inner.memberships.clear();
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipStore {
    async fn create(&self, membership: &Membership) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;

        let user = inner.users.get_mut(&membership.user_id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::UserNotFound,
                format!("No user row for id {}", membership.user_id),
            )
        })?;
        // A fresh purchase overwrites any previous reference
        user.membership = Some(membership.id);

        inner
            .memberships
            .insert(membership.id, membership.clone());
        Ok(())
    }

    async fn update(&self, membership: &Membership) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        match inner.memberships.get_mut(&membership.id) {
            Some(slot) => {
                *slot = membership.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Membership update affected no rows",
            )),
        }
    }

    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
        Ok(self.inner.read().await.memberships.get(id).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Membership>, DomainError> {
        let inner = self.inner.read().await;
        let reference = inner.users.get(user_id).and_then(|u| u.membership);
        Ok(reference.and_then(|id| inner.memberships.get(&id).cloned()))
    }

    async fn remove(&self, id: &MembershipId) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;

        if inner.memberships.remove(id).is_none() {
            return Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                "Membership not found",
            ));
        }

        for user in inner.users.values_mut() {
            if user.membership == Some(*id) {
                user.membership = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl MembershipReader for InMemoryMembershipStore {
    async fn list_active(&self) -> Result<Vec<MembershipView>, DomainError> {
        let inner = self.inner.read().await;
        let mut views: Vec<MembershipView> = inner
            .memberships
            .values()
            .filter(|m| !m.is_blocked())
            .cloned()
            .map(MembershipView::from)
            .collect();
        views.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
        });
        Ok(views)
    }

    async fn get_by_id(&self, id: &MembershipId) -> Result<Option<MembershipView>, DomainError> {
        Ok(self
            .inner
            .read()
            .await
            .memberships
            .get(id)
            .cloned()
            .map(MembershipView::from))
    }

    async fn get_by_user(&self, user_id: &UserId) -> Result<Option<MembershipView>, DomainError> {
        let membership = MembershipRepository::find_by_user(self, user_id).await?;
        Ok(membership.map(MembershipView::from))
    }
}

#[async_trait]
impl UserDirectory for InMemoryMembershipStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRef>, DomainError> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_membership(
        &self,
        membership_id: &MembershipId,
    ) -> Result<Option<UserRef>, DomainError> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .values()
            .find(|u| u.membership.as_ref() == Some(membership_id))
            .cloned())
    }
}
