use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Account role as issued by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl User {
    /// Check if the user may manage other accounts
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Wire value, for form payloads that bypass serde
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    /// School-assigned identifier, distinct from the numeric record id
    pub student_id: String,
    pub gender: Gender,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    pub grade: String,
    pub class: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Paging metadata returned alongside list responses
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentPage {
    pub students: Vec<Student>,
    pub pagination: Pagination,
}

/// Feature inputs submitted to the prediction service.
///
/// Field names are part of the wire contract and must reach the backend
/// unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionInput {
    pub hours_studied: f64,
    pub attendance: f64,
    pub extracurricular_activities: bool,
    pub sleep_hours: f64,
    pub previous_scores: f64,
    pub motivation_level: u8,
    pub tutoring_sessions: u8,
    pub teacher_quality: u8,
    pub physical_activity: u8,
    pub learning_disabilities: bool,
    pub semester: String,
    pub academic_year: String,
    pub exam_score: f64,
}

/// Outcome classes produced by the prediction service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStatus {
    Success,
    AtRisk,
    Fail,
}

/// Minimal student fields embedded in prediction records
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentSummary {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub grade: String,
    pub class: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub id: i64,
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(flatten)]
    pub input: PredictionInput,
    pub prediction_score: f64,
    pub prediction_status: PredictionStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub student: Option<StudentSummary>,
}

/// Per-status totals for the dashboard tiles.
///
/// Wire keys are snake_case (`at_risk`), unlike the camelCase used elsewhere.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictionStatusCounts {
    pub success: u64,
    pub at_risk: u64,
    pub fail: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassPerformance {
    pub class: String,
    pub average_score: f64,
    #[serde(default)]
    pub student_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: u64,
    pub prediction_stats: PredictionStatusCounts,
    #[serde(default)]
    pub class_performance: Vec<ClassPerformance>,
    #[serde(default)]
    pub recent_predictions: Vec<Prediction>,
}
