use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Tables;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::{Email, User};
use crate::ports::UserRepository;

pub struct InMemoryUserRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryUserRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email() == user.email()) {
            return Err(DomainError::new(
                ErrorCode::DuplicateEmail,
                "An account with this email already exists",
            ));
        }
        tables.users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .users
            .iter_mut()
            .find(|u| u.id() == user.id())
            .ok_or_else(|| DomainError::not_found(ErrorCode::UserNotFound, "User", user.id()))?;
        *slot = user.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email() == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().any(|u| u.email() == email))
    }
}
