use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{CONTENT_TYPE, REFERER};
use url::Url;
use widget_logging::{widget_debug, widget_info, widget_warn};

use crate::csrf::{cookie_value, is_cookie_value};
use crate::wire::{classify_response, ChatRequest};
use crate::{ChatError, ChatReply, FailureKind};

#[derive(Debug, Clone)]
pub struct ChatSettings {
    /// Site origin the widget is embedded in, e.g. `https://events.example.com`.
    pub base_url: String,
    pub endpoint_path: String,
    pub csrf_cookie_name: String,
    pub csrf_header_name: String,
    /// Token seeded into the cookie jar before the first request.
    pub csrf_token: Option<String>,
    /// `None` waits for the server indefinitely.
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            endpoint_path: "/api/chatbot/".to_string(),
            csrf_cookie_name: "csrftoken".to_string(),
            csrf_header_name: "X-CSRFToken".to_string(),
            csrf_token: None,
            request_timeout: None,
            connect_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait ChatTransport: Send + Sync {
    /// Posts one user message and returns the bot reply.
    async fn send(&self, message: &str) -> Result<ChatReply, ChatError>;

    /// Loads whatever session state (cookies) the endpoint expects.
    async fn prime_session(&self) -> Result<(), ChatError> {
        Ok(())
    }
}

/// HTTP transport backed by one reqwest client and its cookie jar.
#[derive(Clone)]
pub struct ReqwestTransport {
    settings: ChatSettings,
    base_url: Url,
    endpoint: Url,
    jar: Arc<Jar>,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: ChatSettings) -> Result<Self, ChatError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| ChatError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let endpoint = base_url
            .join(&settings.endpoint_path)
            .map_err(|err| ChatError::new(FailureKind::InvalidEndpoint, err.to_string()))?;

        let jar = Arc::new(Jar::default());
        let mut builder = reqwest::Client::builder().cookie_provider(jar.clone());
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ChatError::new(FailureKind::Network, err.to_string()))?;

        let transport = Self {
            settings,
            base_url,
            endpoint,
            jar,
            client,
        };
        if let Some(token) = transport.settings.csrf_token.as_deref() {
            transport.seed_cookie(&transport.settings.csrf_cookie_name, token)?;
        }
        Ok(transport)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Stores a cookie for the site as if the server had set it.
    ///
    /// Values with characters a cookie cannot carry unquoted (`;`, spaces,
    /// commas and the like) are rejected rather than truncated by the jar.
    pub fn seed_cookie(&self, name: &str, value: &str) -> Result<(), ChatError> {
        if !is_cookie_value(value) {
            return Err(ChatError::new(
                FailureKind::InvalidSetting,
                format!("{name} value {value:?} is not a valid cookie value"),
            ));
        }
        let cookie = format!("{name}={value}; Path=/");
        self.jar.add_cookie_str(&cookie, &self.base_url);
        Ok(())
    }

    /// Current anti-forgery token from the cookie jar, if the server set one.
    pub fn csrf_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.endpoint)?;
        let header = header.to_str().ok()?;
        cookie_value(header, &self.settings.csrf_cookie_name)
    }
}

#[async_trait::async_trait]
impl ChatTransport for ReqwestTransport {
    async fn send(&self, message: &str) -> Result<ChatReply, ChatError> {
        let body = serde_json::to_vec(&ChatRequest { message })
            .map_err(|err| ChatError::new(FailureKind::Network, err.to_string()))?;

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(REFERER, self.base_url.as_str())
            .body(body);
        match self.csrf_token() {
            Some(token) => {
                request = request.header(self.settings.csrf_header_name.as_str(), token);
            }
            None => widget_warn!(
                "No {} cookie for {}; sending without {}",
                self.settings.csrf_cookie_name,
                self.endpoint,
                self.settings.csrf_header_name
            ),
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        widget_debug!("Chat response status={} bytes={}", status, bytes.len());

        classify_response(status, &bytes)
    }

    async fn prime_session(&self) -> Result<(), ChatError> {
        let response = self
            .client
            .get(self.base_url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        widget_info!(
            "Session primed from {} (csrf token present: {})",
            self.base_url,
            self.csrf_token().is_some()
        );
        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ChatError {
    if err.is_timeout() {
        return ChatError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ChatError::new(FailureKind::MalformedResponse, err.to_string());
    }
    ChatError::new(FailureKind::Network, err.to_string())
}
