//! Positional input resolution.
//!
//! A positional argument is used verbatim, except `-` which means "read
//! stdin". Without an argument, piped stdin is read; an interactive
//! terminal is a usage error rather than a silent hang.

use std::io::Read;

use anyhow::{Context, Result};

use crate::options::ValidationError;

/// Where the command's stdin is connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdinKind {
    /// An interactive terminal.
    Terminal,
    /// A pipe, file or other non-interactive source.
    Piped,
}

impl StdinKind {
    /// Detects the process's stdin.
    pub fn detect() -> Self {
        if atty::is(atty::Stream::Stdin) {
            Self::Terminal
        } else {
            Self::Piped
        }
    }
}

/// Resolves the command's input text.
///
/// `arg_name` names the positional in the missing-argument message.
pub fn resolve_command_input(
    arg: Option<&str>,
    stdin: &mut dyn Read,
    stdin_kind: StdinKind,
    arg_name: &str,
) -> Result<String> {
    match arg {
        Some("-") => read_trimmed(stdin),
        Some(value) => Ok(value.to_string()),
        None if stdin_kind == StdinKind::Terminal => Err(ValidationError::new(format!(
            "missing {arg_name} argument (or pipe stdin)"
        ))
        .into()),
        None => read_trimmed(stdin),
    }
}

fn read_trimmed(stdin: &mut dyn Read) -> Result<String> {
    let mut data = String::new();
    stdin.read_to_string(&mut data).context("read input")?;
    Ok(data.trim().to_string())
}
