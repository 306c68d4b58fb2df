//! Authentication endpoints

use super::{error::ClientError, ApiClient, UploadFile};
use edupredict_core::{Role, User};
use reqwest::{multipart::Form, Method};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Token plus the authenticated user's fields, as returned by login/register
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(flatten)]
    pub user: User,
}

/// Profile fields to change; absent fields are left untouched by the backend
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

impl ApiClient {
    /// Authenticate with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let request = self
            .request(Method::POST, "/api/auth/login")
            .await?
            .json(&LoginRequest {
                email: email.to_owned(),
                password: password.to_owned(),
            });
        self.execute(request).await
    }

    /// Create an account and authenticate in one step
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        let request = self
            .request(Method::POST, "/api/auth/register")
            .await?
            .json(request);
        self.execute(request).await
    }

    /// Fetch the user the stored credential belongs to
    pub async fn current_user(&self) -> Result<User, ClientError> {
        let request = self.request(Method::GET, "/api/auth/me").await?;
        self.execute(request).await
    }

    /// Update profile fields, optionally replacing the profile picture.
    /// Returns the server's full representation of the updated user.
    pub async fn update_profile(
        &self,
        fields: &ProfileUpdate,
        photo: Option<UploadFile>,
    ) -> Result<User, ClientError> {
        let mut form = Form::new();
        if let Some(name) = &fields.name {
            form = form.text("name", name.clone());
        }
        if let Some(email) = &fields.email {
            form = form.text("email", email.clone());
        }
        if let Some(photo) = photo {
            form = form.part("profilePicture", photo.into_part()?);
        }

        let request = self
            .request(Method::PUT, "/api/auth/profile")
            .await?
            .multipart(form);
        self.execute(request).await
    }

    /// Change the account password; the session stays valid
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ClientError> {
        let request = self
            .request(Method::PUT, "/api/auth/change-password")
            .await?
            .json(&ChangePasswordRequest {
                current_password,
                new_password,
            });
        self.execute_unit(request).await
    }
}
