//! Communication with the remote board and compose services.
//!
//! - [`client`] - HTTP client ([`BoardClient`])
//! - [`types`] - Request/response bodies
//! - [`error`] - Failure taxonomy ([`BoardError`])
//! - [`http_log`] - Verbose request/response tracing
//!
//! # Wire contracts
//!
//! | Call | Request | Success |
//! |------|---------|---------|
//! | write | `POST {board}/` with `{"characters": [[..]]}` | 2xx or 409 |
//! | read | `GET {board}/` | 2xx |
//! | compose | `POST {compose}/compose` | 2xx |
//! | transition | `GET`/`PUT {board}/transition` | 2xx |
//!
//! Board calls carry the access token header; compose calls do not.

pub mod client;
pub mod error;
pub mod http_log;
pub mod types;

pub use client::BoardClient;
pub use error::{BoardError, Service};
pub use http_log::HttpLog;
pub use types::{CharacterMatrix, ComposeResponse, RenderRequest};
