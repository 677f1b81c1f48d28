//! `get`: print the board's current state.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::board::BoardClient;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentState {
    #[serde(default)]
    current_message: CurrentMessage,
}

#[derive(Deserialize, Default)]
struct CurrentMessage {
    #[serde(default)]
    layout: String,
}

/// Prints the raw state JSON, or just `currentMessage.layout`.
pub async fn get(client: &BoardClient, layout_only: bool, out: &mut dyn Write) -> Result<()> {
    let state = client.get_current().await?;
    let text = if layout_only {
        extract_layout(&state)?
    } else {
        state
    };
    writeln!(out, "{}", text).context("write output")?;
    Ok(())
}

/// Pulls `currentMessage.layout` out of a board state document.
pub fn extract_layout(state: &str) -> Result<String> {
    let state: CurrentState = serde_json::from_str(state).context("decode API response")?;
    if state.current_message.layout.is_empty() {
        anyhow::bail!("currentMessage.layout not found");
    }
    Ok(state.current_message.layout)
}
