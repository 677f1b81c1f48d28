//! HTTP client for the board and compose services.
//!
//! This module provides [`BoardClient`], which owns every outbound request
//! the CLI makes. Each operation issues exactly one request; failures are
//! reported to the caller and never retried.

use std::fmt;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::error::{BoardError, Service};
use super::http_log::HttpLog;
use super::types::{
    CharacterMatrix, ComposeResponse, RenderRequest, TextRequest, TransitionRequest, WriteRequest,
};
use crate::config::Config;
use crate::constants::{
    COMPOSE_PATH, DEFAULT_BOARD_URL, DEFAULT_COMPOSE_URL, HTTP_REQUEST_TIMEOUT, TOKEN_HEADER,
    TRANSITION_PATH,
};
use crate::options::{ComposeStyle, TransitionSpeed, TransitionType};

/// Whether a 409 from the service means "already in that state".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conflict {
    Success,
    Failure,
}

/// A completed request/response pair.
#[derive(Debug)]
struct Exchange {
    status: StatusCode,
    body: Vec<u8>,
}

/// Client for the board read/write service and the compose service.
///
/// Base URLs, the access token, the trace sink and the cancellation token
/// are fixed at construction and shared by every request.
pub struct BoardClient {
    client: Client,
    board_url: String,
    compose_url: String,
    token: String,
    timeout: Duration,
    http_log: HttpLog,
    cancel: CancellationToken,
}

impl fmt::Debug for BoardClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardClient")
            .field("board_url", &self.board_url)
            .field("compose_url", &self.compose_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("http_log", &self.http_log)
            .finish_non_exhaustive()
    }
}

impl BoardClient {
    /// Creates a client for the default endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::MissingToken`] if `token` is blank, or
    /// [`BoardError::Request`] if the HTTP client cannot be created.
    pub fn new(token: &str) -> Result<Self, BoardError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(BoardError::MissingToken);
        }

        let client = Client::builder()
            .build()
            .map_err(|e| BoardError::Request(format!("create HTTP client: {e}")))?;

        Ok(Self {
            client,
            board_url: DEFAULT_BOARD_URL.to_string(),
            compose_url: DEFAULT_COMPOSE_URL.to_string(),
            token: token.to_string(),
            timeout: HTTP_REQUEST_TIMEOUT,
            http_log: HttpLog::disabled(),
            cancel: CancellationToken::new(),
        })
    }

    /// Creates a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, BoardError> {
        Ok(Self::new(&config.token)?
            .with_board_url(&config.board_url)
            .with_compose_url(&config.compose_url))
    }

    /// Overrides the board service base URL.
    pub fn with_board_url(mut self, url: &str) -> Self {
        self.board_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Overrides the compose service base URL.
    pub fn with_compose_url(mut self, url: &str) -> Self {
        self.compose_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Overrides the per-request timeout. An expired timeout is reported as
    /// [`BoardError::Network`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attaches a verbose trace sink.
    pub fn with_http_log(mut self, http_log: HttpLog) -> Self {
        self.http_log = http_log;
        self
    }

    /// Aborts in-flight requests when `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns the board service base URL.
    pub fn board_url(&self) -> &str {
        &self.board_url
    }

    /// Returns the compose service base URL.
    pub fn compose_url(&self) -> &str {
        &self.compose_url
    }

    /// Writes a character matrix to the board.
    ///
    /// A 409 means the board already shows this matrix and is not an error.
    pub async fn send_characters(&self, characters: &CharacterMatrix) -> Result<(), BoardError> {
        let out_of_range = characters.out_of_range_codes();
        if !out_of_range.is_empty() {
            log::warn!("Sending codes outside 0-71: {:?}", out_of_range);
        }
        self.write_board(&WriteRequest { characters }).await
    }

    /// Writes plain text to the board, letting the board service lay it out.
    pub async fn send_text(&self, text: &str) -> Result<(), BoardError> {
        self.write_board(&TextRequest { text }).await
    }

    /// Fetches the current board state as the raw response body.
    pub async fn get_current(&self) -> Result<String, BoardError> {
        let url = format!("{}/", self.board_url);
        let exchange = self
            .execute(Service::Board, Method::GET, &url, None, true)
            .await?;
        let exchange = check_status(Service::Board, exchange, Conflict::Failure)?;
        body_text(exchange)
    }

    /// Renders template text into a character matrix via the compose service.
    ///
    /// The template must already be escape-decoded and alias-resolved.
    pub async fn format_message(
        &self,
        template: &str,
        style: ComposeStyle,
    ) -> Result<CharacterMatrix, BoardError> {
        let url = format!("{}{}", self.compose_url, COMPOSE_PATH);
        let payload = encode(&RenderRequest::new(template, style))?;
        log::debug!(
            "Composing {} bytes of template for {} model",
            template.len(),
            style.model.as_str()
        );

        let exchange = self
            .execute(Service::Compose, Method::POST, &url, Some(payload), false)
            .await?;
        let exchange = check_status(Service::Compose, exchange, Conflict::Failure)?;

        match ComposeResponse::decode(&exchange.body) {
            Some(response) => Ok(response.into_characters()),
            None => Err(BoardError::Decode(format!(
                "{} API returned no characters",
                Service::Compose
            ))),
        }
    }

    /// Sets the board's flip animation.
    pub async fn set_transition(
        &self,
        transition: TransitionType,
        transition_speed: TransitionSpeed,
    ) -> Result<(), BoardError> {
        let url = format!("{}{}", self.board_url, TRANSITION_PATH);
        let payload = encode(&TransitionRequest {
            transition,
            transition_speed,
        })?;
        let exchange = self
            .execute(Service::Board, Method::PUT, &url, Some(payload), true)
            .await?;
        check_status(Service::Board, exchange, Conflict::Failure)?;
        Ok(())
    }

    /// Fetches the board's transition settings as the raw response body.
    pub async fn get_transition(&self) -> Result<String, BoardError> {
        let url = format!("{}{}", self.board_url, TRANSITION_PATH);
        let exchange = self
            .execute(Service::Board, Method::GET, &url, None, true)
            .await?;
        let exchange = check_status(Service::Board, exchange, Conflict::Failure)?;
        body_text(exchange)
    }

    async fn write_board<T: Serialize>(&self, payload: &T) -> Result<(), BoardError> {
        let url = format!("{}/", self.board_url);
        let payload = encode(payload)?;
        let exchange = self
            .execute(Service::Board, Method::POST, &url, Some(payload), true)
            .await?;
        let exchange = check_status(Service::Board, exchange, Conflict::Success)?;
        if exchange.status == StatusCode::CONFLICT {
            log::info!("Board already shows the requested message");
        }
        Ok(())
    }

    /// Sends one request, racing it against the cancellation token.
    async fn execute(
        &self,
        service: Service,
        method: Method,
        url: &str,
        payload: Option<Vec<u8>>,
        authorized: bool,
    ) -> Result<Exchange, BoardError> {
        let mut request = self.client.request(method.clone(), url).timeout(self.timeout);
        if authorized {
            request = request.header(TOKEN_HEADER, &self.token);
        }
        self.http_log.request(url, payload.as_deref().unwrap_or_default());
        if let Some(payload) = payload {
            request = request.header(CONTENT_TYPE, "application/json").body(payload);
        }

        log::debug!("{} {}", method, url);

        let send = async {
            let response = request.send().await.map_err(|e| network_error(service, e))?;
            let status = response.status();
            let response_url = response.url().to_string();
            let body = response
                .bytes()
                .await
                .map_err(|e| network_error(service, e))?;
            Ok::<_, BoardError>((status, response_url, body.to_vec()))
        };

        let (status, response_url, body) = tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                log::warn!("{} {} cancelled", method, url);
                return Err(BoardError::Cancelled);
            }
            result = send => result?,
        };

        log::debug!("{} {} -> {}", method, url, status);
        self.http_log.response(&response_url, status.as_u16(), &body);

        Ok(Exchange { status, body })
    }
}

fn encode<T: Serialize>(payload: &T) -> Result<Vec<u8>, BoardError> {
    serde_json::to_vec(payload).map_err(|e| BoardError::Request(format!("marshal payload: {e}")))
}

fn network_error(service: Service, source: reqwest::Error) -> BoardError {
    if source.is_builder() {
        return BoardError::Request(source.to_string());
    }
    BoardError::Network { service, source }
}

fn check_status(
    service: Service,
    exchange: Exchange,
    conflict: Conflict,
) -> Result<Exchange, BoardError> {
    let status = exchange.status;
    if status.is_success() || (conflict == Conflict::Success && status == StatusCode::CONFLICT) {
        return Ok(exchange);
    }
    Err(BoardError::Status {
        service,
        status,
        body: String::from_utf8_lossy(&exchange.body).trim().to_string(),
    })
}

fn body_text(exchange: Exchange) -> Result<String, BoardError> {
    String::from_utf8(exchange.body)
        .map_err(|e| BoardError::Decode(format!("response body is not UTF-8: {e}")))
}
