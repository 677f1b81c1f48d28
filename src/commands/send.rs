//! `send`, `send-raw`, `format` and `clear`.
//!
//! `send` accepts either a raw character matrix or template text. Raw input
//! goes straight to the board; template text is escape-decoded, has its
//! alias tokens resolved, is composed by the compose service and then sent.

use std::io::Write;

use anyhow::{Context, Result};

use crate::board::BoardClient;
use crate::message::{parse_characters, AliasResolver, AliasTable, MessageInput};
use crate::options::StyleFlags;

/// What to do with a composed matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Send it to the board.
    Send,
    /// Print it as JSON and skip the board.
    PrintOnly,
}

/// Parses `input` as a raw matrix and writes it to the board.
pub async fn send_raw(client: &BoardClient, input: &str) -> Result<()> {
    let characters = parse_characters(input)?;
    log::info!("Sending raw matrix with {} rows", characters.height());
    client.send_characters(&characters).await?;
    Ok(())
}

/// Sends `input`, composing it first unless it is already a raw matrix.
///
/// Raw matrices are always sent, even with [`Delivery::PrintOnly`], and skip
/// style validation.
pub async fn send(
    client: &BoardClient,
    aliases: &AliasTable,
    input: &str,
    flags: &StyleFlags,
    default_model: Option<&str>,
    delivery: Delivery,
    out: &mut dyn Write,
) -> Result<()> {
    let template = match MessageInput::classify(input, &AliasResolver::new(aliases)) {
        MessageInput::Raw(raw) => return send_raw(client, &raw).await,
        MessageInput::Template(template) => template,
    };

    let style = flags.resolve(default_model)?;
    let characters = client.format_message(&template, style).await?;

    match delivery {
        Delivery::PrintOnly => {
            let json = serde_json::to_string(&characters).context("encode formatted output")?;
            writeln!(out, "{}", json).context("write output")?;
        }
        Delivery::Send => {
            client.send_characters(&characters).await?;
            log::info!("Sent composed message with {} rows", characters.height());
        }
    }
    Ok(())
}

/// Blanks the display by composing an empty template.
pub async fn clear(
    client: &BoardClient,
    flags: &StyleFlags,
    default_model: Option<&str>,
) -> Result<()> {
    let style = flags.resolve(default_model)?;
    let characters = client.format_message("", style).await?;
    client.send_characters(&characters).await?;
    Ok(())
}
