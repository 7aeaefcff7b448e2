use std::sync::Arc;
use tokio::sync::RwLock;

use errform::{DomainError, ValidationMessage};

use crate::models::{Address, CreateUserRequest, User};

#[derive(Clone)]
pub struct UserService {
    users: Arc<RwLock<Vec<User>>>,
}

impl Default for UserService {
    fn default() -> Self {
        Self::new()
    }
}

impl UserService {
    pub fn new() -> Self {
        let users = vec![User {
            id: 1,
            name: "Alice".into(),
            email: "alice@example.com".into(),
            address: Address {
                city: "Lyon".into(),
                zip: "69001".into(),
            },
        }];
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    pub async fn list(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    pub async fn get_by_id(&self, id: u64) -> Option<User> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    /// Create a user. Emails are unique and zip codes must be numeric.
    pub async fn create(&self, req: CreateUserRequest) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        let mut problems = Vec::new();
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&req.email)) {
            problems.push(("email".to_string(), vec!["Already registered.".to_string()]));
        }
        if !req.address.zip.chars().all(|c| c.is_ascii_digit()) {
            problems.push((
                "address.zip".to_string(),
                vec!["Only digits are allowed.".to_string()],
            ));
        }
        if !problems.is_empty() {
            return Err(DomainError::Validation(ValidationMessage::Dict(problems)));
        }

        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            name: req.name,
            email: req.email,
            address: req.address,
        };
        users.push(user.clone());
        tracing::info!(user_id = id, "user created");
        Ok(user)
    }

    pub async fn delete(&self, id: u64, is_admin: bool) -> Result<bool, DomainError> {
        if !is_admin {
            return Err(DomainError::Permission(
                "Only administrators may delete users.".into(),
            ));
        }
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() != before)
    }
}
