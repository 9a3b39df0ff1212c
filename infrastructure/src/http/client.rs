//! reqwest-backed [`Transport`] adapter.
//!
//! Paths are resolved against a base URL. POST requests carry the CSRF
//! token (looked up lazily on the first POST, then cached) and a `Referer`
//! header equal to the base URL. Cookies set by the server are kept in a
//! shared jar so the session and CSRF cookies flow back automatically.

use super::csrf::{CSRF_HEADER, CsrfLookup};
use async_trait::async_trait;
use compass_application::ports::transport::{Transport, TransportError};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::REFERER;
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const DEFAULT_USER_AGENT: &str = concat!("compass/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`HttpTransport`]
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub base_url: String,
    /// Page fetched to discover the CSRF token
    pub csrf_page: String,
    pub timeout: Duration,
    pub user_agent: Option<String>,
    /// Cookies seeded into the jar before the first request (e.g. `sessionid`)
    pub cookies: Vec<(String, String)>,
}

impl HttpSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            csrf_page: "/assessments/start/".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: None,
            cookies: Vec::new(),
        }
    }

    pub fn with_csrf_page(mut self, path: impl Into<String>) -> Self {
        self.csrf_page = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push((name.into(), value.into()));
        self
    }
}

pub struct HttpTransport {
    client: Client,
    jar: Arc<Jar>,
    base: Url,
    csrf_page: String,
    csrf_token: Mutex<Option<String>>,
}

impl HttpTransport {
    pub fn new(settings: HttpSettings) -> Result<Self, TransportError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", settings.base_url, e)))?;

        let jar = Arc::new(Jar::default());
        for (name, value) in &settings.cookies {
            jar.add_cookie_str(&format!("{}={}; Path=/", name, value), &base);
        }

        let client = Client::builder()
            .cookie_provider(jar.clone())
            .timeout(settings.timeout)
            .user_agent(
                settings
                    .user_agent
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            )
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            jar,
            base,
            csrf_page: settings.csrf_page,
            csrf_token: Mutex::new(None),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, TransportError> {
        self.base
            .join(path)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", path, e)))
    }

    /// Cached token, or a fresh lookup on first use
    async fn csrf_token(&self) -> Result<String, TransportError> {
        let mut cached = self.csrf_token.lock().await;
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }

        let html = self.fetch_bootstrap_page().await;
        let cookies = self
            .jar
            .cookies(&self.base)
            .and_then(|v| v.to_str().ok().map(str::to_string));

        let token = CsrfLookup
            .resolve(html.as_deref(), cookies.as_deref())
            .ok_or(TransportError::MissingCsrfToken)?;
        info!("CSRF token resolved from {:?}", token.source);

        *cached = Some(token.value.clone());
        Ok(token.value)
    }

    async fn fetch_bootstrap_page(&self) -> Option<String> {
        let url = self.url(&self.csrf_page).ok()?;
        debug!("Fetching CSRF bootstrap page {}", url);
        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => response.text().await.ok(),
            Ok(response) => {
                warn!(
                    "CSRF bootstrap page returned {}; falling back to cookie",
                    response.status()
                );
                None
            }
            Err(e) => {
                warn!("Could not fetch CSRF bootstrap page: {}", e);
                None
            }
        }
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Value, TransportError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            debug!("Request failed with status {}", status);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: serde_json::from_slice(&bytes).ok(),
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_decode() || e.is_body() {
        TransportError::Decode(e.to_string())
    } else {
        TransportError::Connection(e.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, path: &str) -> Result<Value, TransportError> {
        let url = self.url(path)?;
        debug!("GET {}", url);
        self.execute(self.client.get(url)).await
    }

    async fn post_json(&self, path: &str, body: Option<&Value>) -> Result<Value, TransportError> {
        let url = self.url(path)?;
        let token = self.csrf_token().await?;
        debug!("POST {}", url);

        let mut request = self
            .client
            .post(url)
            .header(CSRF_HEADER, token)
            .header(REFERER, self.base.as_str());
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request).await
    }
}
