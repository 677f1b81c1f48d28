//! CLI subcommand implementations for vbcli.
//!
//! Commands are organized into submodules by what they touch:
//!
//! - [`input`] - Positional argument / stdin resolution
//! - [`send`] - `send`, `send-raw`, `format`, `clear`
//! - [`get`] - `get`
//! - [`transition`] - `set-transition`, `get-transition`
//!
//! Each command takes an already-built [`BoardClient`](crate::board::BoardClient)
//! and writes any output to the writer it is given.

pub mod get;
pub mod input;
pub mod send;
pub mod transition;

#[doc(inline)]
pub use input::{resolve_command_input, StdinKind};
#[doc(inline)]
pub use send::Delivery;
