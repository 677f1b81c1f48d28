//! vbcli - send messages to a split-flap display from the command line.
//!
//! This crate provides the core functionality for the vbcli binary:
//! turning human-friendly text into the template syntax the compose service
//! understands, and talking to the board and compose services.
//!
//! # Architecture
//!
//! - **Message** - Escape decoding, alias token resolution, raw matrix detection
//! - **Board** - HTTP client for the board and compose services
//! - **Commands** - Subcommand bodies wired to the client
//!
//! # Modules
//!
//! - [`message`] - Text preparation pipeline
//! - [`board`] - Transport client and wire types
//! - [`commands`] - CLI subcommands
//! - [`config`] - Configuration loading
//! - [`options`] - Validated option values

pub mod board;
pub mod commands;
pub mod config;
pub mod constants;
pub mod message;
pub mod options;

// Re-export commonly used types
pub use board::{BoardClient, BoardError, CharacterMatrix, HttpLog};
pub use config::Config;
pub use message::{AliasResolver, AliasTable, MessageInput};
pub use options::{ComposeStyle, Model, StyleFlags, ValidationError};
