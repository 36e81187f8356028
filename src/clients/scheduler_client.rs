use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::error::ApiError;
use crate::models::schedule::{ActiveUser, CalendarData, CalendarQuery, TimeOffEntry};
use crate::service::schedule_form::{delete_path, SCHEDULE_SUBMIT_PATH};

pub const CSRF_HEADER: &str = "X-CSRF-Token";
pub const LOGIN_PATH: &str = "/login";

#[async_trait]
pub trait SchedulerApi: Send + Sync {
    async fn active_users(&self) -> Result<Vec<ActiveUser>, ApiError>;
    async fn upcoming_time_off(&self) -> Result<Vec<TimeOffEntry>, ApiError>;
    async fn calendar_data(&self, query: &CalendarQuery) -> Result<CalendarData, ApiError>;
    async fn save_schedule(&self, fields: &[(String, String)]) -> Result<(), ApiError>;
    async fn delete_schedule(&self, schedule_id: i64) -> Result<(), ApiError>;
}

pub struct SchedulerClient {
    base_url: String,
    csrf_token: String,
    http: reqwest::Client,
}

impl SchedulerClient {
    pub fn new(base_url: String, csrf_token: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            csrf_token,
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn login_url(&self) -> String {
        self.url(LOGIN_PATH)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .header(CSRF_HEADER, &self.csrf_token)
            .send()
            .await
            .map_err(|err| {
                error!("API request failed: {}", err);
                ApiError::from(err)
            })?;
        self.check_status(response.status())?;
        Ok(response)
    }

    fn check_status(&self, status: StatusCode) -> Result<(), ApiError> {
        if status == StatusCode::UNAUTHORIZED {
            let login_url = self.login_url();
            warn!(%login_url, "Session rejected by server");
            return Err(ApiError::Unauthorized { login_url });
        }
        if !status.is_success() {
            error!("API request failed: HTTP error! status: {}", status.as_u16());
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        debug!(path, "GET");
        let response = self.send(self.http.get(self.url(path)).query(params)).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl SchedulerApi for SchedulerClient {
    async fn active_users(&self) -> Result<Vec<ActiveUser>, ApiError> {
        self.get_json("/api/active_users", &[]).await
    }

    async fn upcoming_time_off(&self) -> Result<Vec<TimeOffEntry>, ApiError> {
        self.get_json("/api/upcoming_time_off", &[]).await
    }

    async fn calendar_data(&self, query: &CalendarQuery) -> Result<CalendarData, ApiError> {
        self.get_json("/api/calendar_data", &query.to_params()).await
    }

    async fn save_schedule(&self, fields: &[(String, String)]) -> Result<(), ApiError> {
        debug!(path = SCHEDULE_SUBMIT_PATH, "POST");
        self.send(self.http.post(self.url(SCHEDULE_SUBMIT_PATH)).form(fields))
            .await?;
        Ok(())
    }

    async fn delete_schedule(&self, schedule_id: i64) -> Result<(), ApiError> {
        let path = delete_path(schedule_id);
        debug!(path = %path, "GET");
        self.send(self.http.get(self.url(&path))).await?;
        Ok(())
    }
}
