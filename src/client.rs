use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use reqwest::header::COOKIE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::ClientError;
use crate::models::{
    BookClassRequest, BookClassResponse, CancelBookingRequest, CancelBookingResponse,
    DailyClassesRequest, DailyClassesResponse, LoginRequest, LoginResponse,
};
use crate::session::{InMemorySessionStore, SessionStore, SessionToken};
use crate::settings::Settings;

pub const DEFAULT_SESSION_COOKIE: &str = "ClientPortal.Auth";

/// Paths of the service endpoints, joined onto the base URL.
///
/// Relative paths keep any prefix of a base URL that ends in `/`
/// (`https://host/portal/`); a leading `/` resolves against the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub login: String,
    pub daily_classes: String,
    pub book_class: String,
    pub cancel_booking: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "ClientPortal2/Auth/Login".to_string(),
            daily_classes: "ClientPortal2/Classes/ClassCalendar/DailyClasses".to_string(),
            book_class: "ClientPortal2/Classes/ClassCalendar/BookClass".to_string(),
            cancel_booking: "ClientPortal2/Classes/ClassCalendar/CancelBooking".to_string(),
        }
    }
}

/// Client for the club booking service.
///
/// Every operation is a single POST with a JSON body. The session cookie set
/// by [`ZdrofitClient::authenticate`] is kept in the [`SessionStore`] and sent
/// with every later call; nothing is retried and nothing authenticates
/// implicitly.
#[derive(Clone)]
pub struct ZdrofitClient {
    http: reqwest::Client,
    base_url: Arc<Url>,
    strict: bool,
    session: Arc<dyn SessionStore>,
    endpoints: Arc<Endpoints>,
    session_cookie: Arc<str>,
}

impl ZdrofitClient {
    pub fn new(base_url: Url, http: reqwest::Client, strict: bool) -> Self {
        Self {
            http,
            base_url: Arc::new(base_url),
            strict,
            session: Arc::new(InMemorySessionStore::new()),
            endpoints: Arc::new(Endpoints::default()),
            session_cookie: Arc::from(DEFAULT_SESSION_COOKIE),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.base_url.clone(), reqwest::Client::new(), settings.strict)
            .with_endpoints(settings.endpoints())
            .with_session_cookie(&settings.session_cookie)
    }

    pub fn with_session_store(mut self, session: Arc<dyn SessionStore>) -> Self {
        self.session = session;
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = Arc::new(endpoints);
        self
    }

    pub fn with_session_cookie(mut self, name: &str) -> Self {
        self.session_cookie = Arc::from(name);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Whether a live session token is held for the base host.
    pub fn authenticated(&self) -> bool {
        self.session.get(&self.host_key()).is_some()
    }

    pub async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let url = self.endpoint(&self.endpoints.login)?;
        debug!(%url, login = %request.login, "authenticating");

        let response = self.http.post(url).json(request).send().await?;
        let response = check_status(response).await?;

        let token = response
            .cookies()
            .find(|cookie| cookie.name() == &*self.session_cookie)
            .map(|cookie| {
                let expires_at = cookie
                    .max_age()
                    .and_then(|age| TimeDelta::from_std(age).ok())
                    .map(|age| Utc::now() + age)
                    .or_else(|| cookie.expires().map(Into::into));
                SessionToken {
                    value: cookie.value().to_string(),
                    expires_at,
                }
            });

        let body = response.text().await?;
        let login: LoginResponse = self.decode(&body)?;

        match token {
            Some(token) => {
                self.session.set(&self.host_key(), token);
                info!(member_id = login.user.member.id, "authenticated");
            }
            None => {
                self.session.remove(&self.host_key());
                warn!(
                    cookie = %self.session_cookie,
                    "login response did not set the session cookie"
                );
            }
        }
        Ok(login)
    }

    pub async fn daily_classes(
        &self,
        request: &DailyClassesRequest,
    ) -> Result<DailyClassesResponse, ClientError> {
        self.post_authenticated(&self.endpoints.daily_classes, request)
            .await
    }

    pub async fn book_class(
        &self,
        request: &BookClassRequest,
    ) -> Result<BookClassResponse, ClientError> {
        self.post_authenticated(&self.endpoints.book_class, request)
            .await
    }

    pub async fn cancel_class_booking(
        &self,
        request: &CancelBookingRequest,
    ) -> Result<CancelBookingResponse, ClientError> {
        self.post_authenticated(&self.endpoints.cancel_booking, request)
            .await
    }

    /// Same as [`ZdrofitClient::daily_classes`] with the date given as
    /// `YYYY-MM-DD`.
    pub async fn daily_classes_on(
        &self,
        club_id: i64,
        date: &str,
    ) -> Result<DailyClassesResponse, ClientError> {
        let request = DailyClassesRequest {
            club_id,
            date: date.parse()?,
        };
        self.daily_classes(&request).await
    }

    async fn post_authenticated<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Serialize,
    {
        let token = self
            .session
            .get(&self.host_key())
            .ok_or(ClientError::NotAuthenticated)?;
        let url = self.endpoint(path)?;
        debug!(%url, "posting authenticated request");

        let response = self
            .http
            .post(url)
            .header(COOKIE, format!("{}={}", self.session_cookie, token.value))
            .json(body)
            .send()
            .await?;
        let response = check_status(response).await?;
        let text = response.text().await?;
        self.decode(&text)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    fn host_key(&self) -> String {
        let host = self.base_url.host_str().unwrap_or_default();
        match self.base_url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    fn decode<T>(&self, body: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Serialize,
    {
        let raw: Value = serde_json::from_str(body)?;
        let value = T::deserialize(&raw)?;
        if self.strict {
            let modelled = serde_json::to_value(&value)?;
            let mut unknown = Vec::new();
            collect_unknown_fields(&raw, &modelled, "", &mut unknown);
            if !unknown.is_empty() {
                return Err(ClientError::UnknownFields(unknown));
            }
        }
        Ok(value)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!(%status, "request rejected");
    Err(ClientError::Status { status, body })
}

/// Records the path of every object key in `raw` that `modelled` lacks.
fn collect_unknown_fields(raw: &Value, modelled: &Value, path: &str, unknown: &mut Vec<String>) {
    match (raw, modelled) {
        (Value::Object(raw), Value::Object(modelled)) => {
            for (key, value) in raw {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                match modelled.get(key) {
                    Some(known) => collect_unknown_fields(value, known, &child, unknown),
                    None => unknown.push(child),
                }
            }
        }
        (Value::Array(raw), Value::Array(modelled)) => {
            for (index, (value, known)) in raw.iter().zip(modelled).enumerate() {
                collect_unknown_fields(value, known, &format!("{path}[{index}]"), unknown);
            }
        }
        _ => {}
    }
}
