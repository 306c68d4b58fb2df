//! Prediction endpoints

use super::{error::ClientError, ApiClient};
use crate::retry::with_retry;
use edupredict_core::{Prediction, PredictionInput};
use reqwest::Method;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionList {
    pub predictions: Vec<Prediction>,
}

impl ApiClient {
    /// List a student's predictions; retried while the backend is unreachable
    pub async fn list_student_predictions(
        &self,
        student_id: i64,
    ) -> Result<Vec<Prediction>, ClientError> {
        let list = with_retry(self.retry_policy(), || {
            self.fetch_student_predictions(student_id)
        })
        .await?;
        Ok(list.predictions)
    }

    async fn fetch_student_predictions(
        &self,
        student_id: i64,
    ) -> Result<PredictionList, ClientError> {
        let request = self
            .request(Method::GET, &format!("/api/predictions/student/{student_id}"))
            .await?;
        self.execute(request).await
    }

    /// Fetch a single prediction record
    pub async fn get_prediction(&self, id: i64) -> Result<Prediction, ClientError> {
        let request = self
            .request(Method::GET, &format!("/api/predictions/{id}"))
            .await?;
        self.execute(request).await
    }

    /// Submit feature inputs for a student; the input is the JSON body,
    /// field names unchanged
    pub async fn create_prediction(
        &self,
        student_id: i64,
        input: &PredictionInput,
    ) -> Result<Prediction, ClientError> {
        let request = self
            .request(Method::POST, &format!("/api/predictions/student/{student_id}"))
            .await?
            .json(input);
        self.execute(request).await
    }

    /// Re-run a prediction with changed inputs
    pub async fn update_prediction(
        &self,
        id: i64,
        input: &PredictionInput,
    ) -> Result<Prediction, ClientError> {
        let request = self
            .request(Method::PUT, &format!("/api/predictions/{id}"))
            .await?
            .json(input);
        self.execute(request).await
    }

    /// Delete a prediction record
    pub async fn delete_prediction(&self, id: i64) -> Result<(), ClientError> {
        let request = self
            .request(Method::DELETE, &format!("/api/predictions/{id}"))
            .await?;
        self.execute_unit(request).await
    }
}
