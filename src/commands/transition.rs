//! `set-transition` and `get-transition`.

use std::io::Write;

use anyhow::{Context, Result};

use crate::board::BoardClient;
use crate::options::{TransitionSpeed, TransitionType};

/// Validates and applies a transition setting.
pub async fn set(client: &BoardClient, transition_type: &str, speed: &str) -> Result<()> {
    let transition: TransitionType = transition_type.parse()?;
    let speed: TransitionSpeed = speed.parse()?;
    client.set_transition(transition, speed).await?;
    log::info!("Transition set to {:?} ({:?})", transition, speed);
    Ok(())
}

/// Prints the current transition settings as indented JSON.
pub async fn get(client: &BoardClient, out: &mut dyn Write) -> Result<()> {
    let body = client.get_transition().await?;
    writeln!(out, "{}", pretty_print_json(&body)?).context("write output")?;
    Ok(())
}

/// Re-indents a JSON document with two spaces.
pub fn pretty_print_json(raw: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(raw).context("decode API response")?;
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_print_json() {
        let got = pretty_print_json(r#"{"a":1,"b":{"c":2}}"#).unwrap();
        assert!(got.contains("\n  \"a\": 1,"), "expected indented output, got: {got}");
        assert!(got.contains("\n    \"c\": 2"));
    }

    #[test]
    fn test_pretty_print_rejects_invalid() {
        assert!(pretty_print_json("nope").is_err());
    }
}
