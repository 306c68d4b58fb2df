//! EduPredict HTTP access layer
//!
//! One configured client wraps every backend call. Credential attachment and
//! authorization-failure teardown live here so individual call sites never
//! repeat that logic.

pub mod client;
pub mod retry;
pub mod settings;

pub use client::auth::{AuthResponse, LoginRequest, ProfileUpdate, RegisterRequest};
pub use client::error::ClientError;
pub use client::students::{SortOrder, StudentListQuery, StudentUpsert};
pub use client::{ApiClient, ApiClientBuilder, UploadFile};
pub use retry::{with_retry, RetryPolicy};
pub use settings::ClientSettings;
