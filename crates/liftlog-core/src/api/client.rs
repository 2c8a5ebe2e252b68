//! API client for the fitness backend's REST interface.
//!
//! One `ApiClient` handles both the JWT auth endpoints and the resource
//! endpoints (workouts, meals, goals, progress, dashboard, profile). The
//! bearer header is attached by reading the shared token store at send
//! time, so a token refreshed mid-session is picked up by the next request
//! without rebuilding the client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::{AuthError, AuthService, FieldErrors, TokenPair, TokenStore};
use crate::models::{
    Credentials, DashboardStats, Goal, Meal, MeasurementPoint, NutritionPoint, ProgressEntry,
    Registration, TimeRange, UserProfile, WeightPoint, Workout, WorkoutPoint,
};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access: String,
    refresh: String,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
}

/// API client for the fitness backend.
/// Clone is cheap - reqwest::Client and the token store are Arc-backed.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    /// Create a new API client against the given base URL (e.g.
    /// `http://localhost:8000/api`), reading bearer tokens from `tokens`.
    pub fn new(base_url: impl Into<String>, tokens: Arc<TokenStore>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Outbound-request decorator: attach `Authorization: Bearer <access>`
    /// when an access token is present. Reads the store per call.
    fn auth_headers(&self) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = self.tokens.access_token() {
            match header::HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(header::AUTHORIZATION, value);
                }
                Err(e) => warn!(error = %e, "Stored access token is not a valid header value"),
            }
        }
        headers
    }

    /// Send a request, retrying on 429 with exponential backoff and mapping
    /// any non-success status to a typed error.
    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.url(path);
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let mut request = self
                .client
                .request(method.clone(), &url)
                .headers(self.auth_headers());
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request.send().await?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                retries += 1;
                if retries > MAX_RATE_LIMIT_RETRIES {
                    return Err(ApiError::RateLimited);
                }
                warn!(url = %url, retry = retries, backoff_ms, "Rate limited, backing off");
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms *= 2;
                continue;
            }

            if !response.status().is_success() {
                let status = response.status();
                let body_text = response.text().await.unwrap_or_default();
                return Err(ApiError::from_status(status, &body_text));
            }

            return Ok(response);
        }
    }

    async fn parse_json<T: DeserializeOwned>(
        response: reqwest::Response,
        path: &str,
    ) -> Result<T, ApiError> {
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("{}: {}", path, e)))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute::<()>(Method::GET, path, None).await?;
        Self::parse_json(response, path).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.execute(Method::POST, path, Some(body)).await?;
        Self::parse_json(response, path).await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.execute(Method::PUT, path, Some(body)).await?;
        Self::parse_json(response, path).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }

    // ===== Goals =====

    pub async fn fetch_goals(&self) -> Result<Vec<Goal>, ApiError> {
        self.get("/goals/").await
    }

    pub async fn create_goal(&self, goal: &Goal) -> Result<Goal, ApiError> {
        self.post("/goals/", goal).await
    }

    pub async fn update_goal(&self, id: i64, goal: &Goal) -> Result<Goal, ApiError> {
        self.put(&format!("/goals/{}/", id), goal).await
    }

    pub async fn delete_goal(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/goals/{}/", id)).await
    }

    // ===== Meals =====

    pub async fn fetch_meals(&self) -> Result<Vec<Meal>, ApiError> {
        self.get("/nutrition/meals/").await
    }

    pub async fn create_meal(&self, meal: &Meal) -> Result<Meal, ApiError> {
        self.post("/nutrition/meals/", meal).await
    }

    pub async fn update_meal(&self, id: i64, meal: &Meal) -> Result<Meal, ApiError> {
        self.put(&format!("/nutrition/meals/{}/", id), meal).await
    }

    pub async fn delete_meal(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/nutrition/meals/{}/", id)).await
    }

    // ===== Workouts =====

    /// Recent workouts (the backend defaults to the last 7 days).
    pub async fn fetch_workouts(&self) -> Result<Vec<Workout>, ApiError> {
        self.get("/workouts/workouts/").await
    }

    pub async fn fetch_workout_history(&self, range: TimeRange) -> Result<Vec<Workout>, ApiError> {
        self.get(&format!(
            "/workouts/workouts/history/?timeRange={}",
            range.as_param()
        ))
        .await
    }

    pub async fn create_workout(&self, workout: &Workout) -> Result<Workout, ApiError> {
        self.post("/workouts/workouts/", workout).await
    }

    pub async fn update_workout(&self, id: i64, workout: &Workout) -> Result<Workout, ApiError> {
        self.put(&format!("/workouts/workouts/{}/", id), workout)
            .await
    }

    pub async fn delete_workout(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/workouts/workouts/{}/", id)).await
    }

    // ===== Progress =====

    pub async fn fetch_weight_history(&self) -> Result<Vec<WeightPoint>, ApiError> {
        self.get("/progress/progress/weight_history/").await
    }

    pub async fn fetch_nutrition_history(&self) -> Result<Vec<NutritionPoint>, ApiError> {
        self.get("/progress/progress/nutrition_history/").await
    }

    pub async fn fetch_workout_counts(&self) -> Result<Vec<WorkoutPoint>, ApiError> {
        self.get("/progress/progress/workout_history/").await
    }

    pub async fn fetch_measurement_history(&self) -> Result<Vec<MeasurementPoint>, ApiError> {
        self.get("/progress/measurements/measurement_history/")
            .await
    }

    pub async fn create_progress_entry(
        &self,
        entry: &ProgressEntry,
    ) -> Result<ProgressEntry, ApiError> {
        self.post("/progress/progress/", entry).await
    }

    pub async fn update_progress_entry(
        &self,
        id: i64,
        entry: &ProgressEntry,
    ) -> Result<ProgressEntry, ApiError> {
        self.put(&format!("/progress/progress/{}/", id), entry).await
    }

    pub async fn delete_progress_entry(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/progress/progress/{}/", id)).await
    }

    // ===== Dashboard =====

    pub async fn fetch_dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get("/dashboard/stats/").await
    }

    // ===== Profile =====

    pub async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        self.get("/users/profile/").await
    }

    pub async fn update_profile(&self, profile: &UserProfile) -> Result<UserProfile, ApiError> {
        self.put("/users/profile/", profile).await
    }
}

impl AuthService for ApiClient {
    async fn verify_token(&self, token: &str) -> Result<(), ApiError> {
        self.execute(
            Method::POST,
            "/token/verify/",
            Some(&serde_json::json!({ "token": token })),
        )
        .await?;
        Ok(())
    }

    async fn refresh_token(&self, refresh: &str) -> Result<String, ApiError> {
        let response = self
            .execute(
                Method::POST,
                "/token/refresh/",
                Some(&serde_json::json!({ "refresh": refresh })),
            )
            .await?;
        let parsed: RefreshResponse = Self::parse_json(response, "/token/refresh/").await?;
        Ok(parsed.access)
    }

    async fn obtain_token(&self, credentials: &Credentials) -> Result<TokenPair, AuthError> {
        let response = self
            .execute(Method::POST, "/token/", Some(credentials))
            .await?;
        let parsed: TokenResponse = Self::parse_json(response, "/token/").await?;
        Ok(TokenPair {
            access: parsed.access,
            refresh: parsed.refresh,
        })
    }

    async fn register_account(&self, registration: &Registration) -> Result<(), AuthError> {
        let url = self.url("/register/");
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers())
            .json(registration)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(username = %registration.username, "Account registered");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::BAD_REQUEST {
            if let Some(fields) = parse_field_errors(&body) {
                return Err(AuthError::Validation(fields));
            }
        }
        Err(ApiError::from_status(status, &body).into())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.execute::<()>(Method::POST, "/logout/", None).await?;
        Ok(())
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Parse a DRF 400 body of the shape `{"field": ["message", ...], ...}`.
/// Returns None for any other shape (e.g. `{"detail": "..."}`).
fn parse_field_errors(body: &str) -> Option<FieldErrors> {
    serde_json::from_str::<FieldErrors>(body)
        .ok()
        .filter(|fields| !fields.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_token_response() {
        let json = r#"{"access": "a1", "refresh": "r1"}"#;
        let parsed: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access, "a1");
        assert_eq!(parsed.refresh, "r1");
    }

    #[test]
    fn parse_refresh_response() {
        let json = r#"{"access": "new-a2"}"#;
        let parsed: RefreshResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access, "new-a2");
    }

    #[test]
    fn field_errors_parse_from_drf_shape() {
        let body = r#"{"username": ["A user with that username already exists."], "email": ["Enter a valid email address."]}"#;
        let fields = parse_field_errors(body).expect("should parse");
        assert_eq!(fields.len(), 2);
        assert_eq!(
            fields["username"],
            vec!["A user with that username already exists."]
        );
    }

    #[test]
    fn field_errors_reject_other_shapes() {
        assert!(parse_field_errors(r#"{"detail": "Not found."}"#).is_none());
        assert!(parse_field_errors("{}").is_none());
        assert!(parse_field_errors("oops").is_none());
    }

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(
            join_url("http://localhost:8000/api/", "/goals/"),
            "http://localhost:8000/api/goals/"
        );
        assert_eq!(
            join_url("http://localhost:8000/api", "/token/"),
            "http://localhost:8000/api/token/"
        );
    }
}
