//! Application-wide constants for vbcli.
//!
//! This module centralizes endpoint locations, wire-level names and the
//! handful of numeric limits the client depends on.
//!
//! # Categories
//!
//! - **Endpoints**: Default base URLs and request paths
//! - **Timeouts**: Network timeouts
//! - **Display**: Fixed grid dimensions per model
//! - **Environment**: Variable names read at startup

use std::time::Duration;

// ============================================================================
// Endpoints
// ============================================================================

/// Default base URL of the board read/write service.
pub const DEFAULT_BOARD_URL: &str = "https://cloud.vestaboard.com";

/// Default base URL of the compose (templating) service.
pub const DEFAULT_COMPOSE_URL: &str = "https://vbml.vestaboard.com";

/// Path appended to the compose base URL.
pub const COMPOSE_PATH: &str = "/compose";

/// Path appended to the board base URL for transition settings.
pub const TRANSITION_PATH: &str = "/transition";

/// Header carrying the board access token.
pub const TOKEN_HEADER: &str = "X-Vestaboard-Token";

// ============================================================================
// Timeouts
// ============================================================================

/// HTTP client request timeout for every board and compose call.
///
/// Expiry is reported as a network failure, not as its own error kind.
pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

// ============================================================================
// Display
// ============================================================================

/// Row count of the note model's fixed grid.
pub const NOTE_HEIGHT: u8 = 3;

/// Column count of the note model's fixed grid.
pub const NOTE_WIDTH: u8 = 15;

/// Highest valid character code on the display.
pub const MAX_CHARACTER_CODE: i64 = 71;

/// Minimum trimmed length before input is considered as a raw matrix.
///
/// Short matrices like `[[1]]` fall below this and are sent through the
/// compose service as text.
pub const RAW_MATRIX_MIN_LEN: usize = 10;

// ============================================================================
// Environment
// ============================================================================

/// Access token for the board service.
pub const ENV_TOKEN: &str = "VESTABOARD_TOKEN";

/// Default display model when `--model` is not given.
pub const ENV_MODEL: &str = "VESTABOARD_MODEL";

/// Override for the board base URL.
pub const ENV_BOARD_URL: &str = "VESTABOARD_BASE_URL";

/// Override for the compose base URL.
pub const ENV_COMPOSE_URL: &str = "VESTABOARD_VBML_URL";

/// Override for the directory holding `config.json`.
pub const ENV_CONFIG_DIR: &str = "VBCLI_CONFIG_DIR";
