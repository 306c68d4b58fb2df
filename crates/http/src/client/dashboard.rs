//! Dashboard aggregate endpoint

use super::{error::ClientError, ApiClient};
use crate::retry::with_retry;
use edupredict_core::DashboardStats;
use reqwest::Method;

impl ApiClient {
    /// Fetch the aggregate stats backing the dashboard screen; retried while
    /// the backend is unreachable
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ClientError> {
        with_retry(self.retry_policy(), || self.fetch_dashboard_stats()).await
    }

    async fn fetch_dashboard_stats(&self) -> Result<DashboardStats, ClientError> {
        let request = self.request(Method::GET, "/api/dashboard/stats").await?;
        self.execute(request).await
    }
}
