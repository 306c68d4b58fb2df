//! Student record endpoints

use super::{error::ClientError, ApiClient, UploadFile};
use crate::retry::with_retry;
use chrono::NaiveDate;
use edupredict_core::{Gender, Student, StudentPage};
use reqwest::{multipart::Form, Method};
use serde::Serialize;

/// Sort direction for list queries
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

/// Filter, sort and paging parameters for the student list.
///
/// Absent filters are omitted from the query string entirely; sort and paging
/// are always sent.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StudentListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    pub sort: String,
    pub order: SortOrder,
    pub page: u32,
    pub limit: u32,
}

impl Default for StudentListQuery {
    fn default() -> Self {
        Self {
            search: None,
            grade: None,
            class: None,
            sort: "name".to_owned(),
            order: SortOrder::Asc,
            page: 1,
            limit: 12,
        }
    }
}

/// Writable student fields for create/update
#[derive(Debug, Clone)]
pub struct StudentUpsert {
    pub name: String,
    pub student_id: String,
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
    pub grade: String,
    pub class: String,
}

impl StudentUpsert {
    fn into_form(self, photo: Option<UploadFile>) -> Result<Form, ClientError> {
        let mut form = Form::new()
            .text("name", self.name)
            .text("studentId", self.student_id)
            .text("gender", self.gender.as_str())
            .text("grade", self.grade)
            .text("class", self.class);
        if let Some(date_of_birth) = self.date_of_birth {
            form = form.text("dateOfBirth", date_of_birth.format("%Y-%m-%d").to_string());
        }
        if let Some(photo) = photo {
            form = form.part("photo", photo.into_part()?);
        }
        Ok(form)
    }
}

impl ApiClient {
    /// List students with filter/sort/paging; retried while the backend is
    /// unreachable, per the client's retry policy
    pub async fn list_students(&self, query: &StudentListQuery) -> Result<StudentPage, ClientError> {
        with_retry(self.retry_policy(), || self.fetch_students(query)).await
    }

    async fn fetch_students(&self, query: &StudentListQuery) -> Result<StudentPage, ClientError> {
        let request = self.request(Method::GET, "/api/students").await?.query(query);
        self.execute(request).await
    }

    /// Fetch a single student record
    pub async fn get_student(&self, id: i64) -> Result<Student, ClientError> {
        let request = self
            .request(Method::GET, &format!("/api/students/{id}"))
            .await?;
        self.execute(request).await
    }

    /// Create a student record, optionally with a photo
    pub async fn create_student(
        &self,
        student: StudentUpsert,
        photo: Option<UploadFile>,
    ) -> Result<Student, ClientError> {
        let request = self
            .request(Method::POST, "/api/students")
            .await?
            .multipart(student.into_form(photo)?);
        self.execute(request).await
    }

    /// Update a student record, optionally replacing the photo
    pub async fn update_student(
        &self,
        id: i64,
        student: StudentUpsert,
        photo: Option<UploadFile>,
    ) -> Result<Student, ClientError> {
        let request = self
            .request(Method::PUT, &format!("/api/students/{id}"))
            .await?
            .multipart(student.into_form(photo)?);
        self.execute(request).await
    }

    /// Delete a student record
    pub async fn delete_student(&self, id: i64) -> Result<(), ClientError> {
        let request = self
            .request(Method::DELETE, &format!("/api/students/{id}"))
            .await?;
        self.execute_unit(request).await
    }
}
