//! Administrative user directory

use serde::Deserialize;
use shared::{validate_natural_key, User, DEFAULT_USER_STATUS};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::repository::{RecordFilter, Repositories};

#[derive(Clone)]
pub struct UserService {
    repos: Repositories,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub user_id: String,
    #[validate(length(min = 1, message = "User name is required"))]
    pub user_name: String,
    pub role: String,
    pub department: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub status: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub user_name: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
}

impl UpdateUser {
    pub fn apply_to(self, user: &mut User) {
        if let Some(user_name) = self.user_name {
            user.user_name = user_name;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(department) = self.department {
            user.department = department;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(status) = self.status {
            user.status = status;
        }
        if let Some(description) = self.description {
            user.description = description;
        }
    }
}

impl UserService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn create(&self, input: CreateUser) -> AppResult<User> {
        input.validate()?;
        validate_natural_key(&input.user_id).map_err(|message| AppError::Validation {
            field: "userId".to_string(),
            message: message.to_string(),
        })?;

        let user = User {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            user_name: input.user_name,
            role: input.role,
            department: input.department,
            email: input.email,
            status: input
                .status
                .unwrap_or_else(|| DEFAULT_USER_STATUS.to_string()),
            description: input.description.unwrap_or_default(),
        };

        let user = self.repos.users.create(user).await?;
        tracing::info!(user_id = %user.user_id, "User created");
        Ok(user)
    }

    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        self.repos.users.find_all(&RecordFilter::all()).await
    }

    pub async fn find_one(&self, id: Uuid) -> AppResult<User> {
        self.repos
            .users
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))
    }

    pub async fn find_by_user_id(&self, user_id: &str) -> AppResult<User> {
        self.repos
            .users
            .find_by_key(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))
    }

    pub async fn update(&self, id: Uuid, input: UpdateUser) -> AppResult<User> {
        input.validate()?;
        let mut user = self.find_one(id).await?;
        input.apply_to(&mut user);
        self.repos.users.save(user).await
    }

    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        self.repos.users.delete(id).await?;
        tracing::info!(%id, "User removed");
        Ok(())
    }
}
