//! Repository trait for the owner registry.

use crate::domain::entities::{NewOwner, Owner};
use crate::error::StoreError;
use async_trait::async_trait;

/// Storage contract for link owners.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Registers a new owner.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmailTaken`] if the email is already
    /// registered.
    async fn create(&self, new_owner: NewOwner) -> Result<Owner, StoreError>;

    /// Finds an owner by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Owner>, StoreError>;

    /// Finds an owner by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Owner>, StoreError>;
}
