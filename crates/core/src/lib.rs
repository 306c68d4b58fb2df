//! EduPredict core types and utilities

pub mod credentials;
pub mod error;
pub mod types;
pub mod validation;

pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::{CoreError, CoreResult};
pub use types::{
    ClassPerformance, DashboardStats, Gender, Pagination, Prediction, PredictionInput,
    PredictionStatus, PredictionStatusCounts, Role, Student, StudentPage, StudentSummary, User,
};
