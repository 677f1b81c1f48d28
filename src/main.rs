//! vbcli - drive a split-flap display from the command line.
//!
//! This is the main binary entry point. See the `vbcli` library for the
//! core functionality.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use mimalloc::MiMalloc;
use tokio_util::sync::CancellationToken;
use vbcli::commands::{self, Delivery, StdinKind};
use vbcli::{AliasTable, BoardClient, Config, HttpLog, StyleFlags};

/// Global allocator configured per M-MIMALLOC-APPS guideline.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

// CLI
#[derive(Parser)]
#[command(name = "vbcli")]
#[command(version)]
#[command(about = "CLI for interacting with the Vestaboard API")]
struct Cli {
    /// Enable verbose HTTP logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Compose layout flags shared by send, format and clear.
#[derive(Args)]
struct StyleArgs {
    /// Display model: flagship or note (default: $VESTABOARD_MODEL or flagship)
    #[arg(short, long)]
    model: Option<String>,
    /// Vertical alignment: top, center, or bottom
    #[arg(short, long, default_value = "center")]
    align: String,
    /// Horizontal justification: left, center, right, or justified
    #[arg(short, long, default_value = "center")]
    justify: String,
}

impl From<StyleArgs> for StyleFlags {
    fn from(args: StyleArgs) -> Self {
        Self {
            model: args.model,
            align: args.align,
            justify: args.justify,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Send a raw characters payload to the board
    SendRaw {
        /// JSON array of arrays of character codes, or - for stdin
        #[arg(value_name = "CHARACTERS_JSON|-")]
        input: Option<String>,
    },
    /// Render template text via the compose service, then send it
    Send {
        /// Template text, raw characters JSON, or - for stdin
        #[arg(value_name = "MESSAGE|-")]
        message: Option<String>,
        #[command(flatten)]
        style: StyleArgs,
        /// Print the composed characters and skip sending
        #[arg(long)]
        format: bool,
    },
    /// Render template text and print the characters JSON
    Format {
        /// Template text, or - for stdin
        #[arg(value_name = "MESSAGE|-")]
        message: String,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Clear the display (equivalent to `vbcli send ''`)
    Clear {
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Fetch the current display state as JSON
    Get {
        /// Print only currentMessage.layout
        #[arg(short, long)]
        layout: bool,
    },
    /// Set display transition type and speed
    SetTransition {
        /// Transition type: classic, wave, drift, curtain
        #[arg(long = "type", value_name = "TYPE")]
        transition_type: String,
        /// Transition speed: fast or gentle
        #[arg(long)]
        speed: String,
    },
    /// Fetch transition settings as JSON
    GetTransition,
}

/// Cancels `cancel` on Ctrl-C so the in-flight request is abandoned.
fn watch_for_interrupt(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling request");
            cancel.cancel();
        }
    });
}

fn build_client(config: &Config, verbose: bool, cancel: CancellationToken) -> Result<BoardClient> {
    let mut client = BoardClient::from_config(config)?.with_cancellation(cancel);
    if verbose {
        client = client.with_http_log(HttpLog::to_writer(Box::new(std::io::stderr())));
    }
    Ok(client)
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let cancel = CancellationToken::new();
    watch_for_interrupt(cancel.clone());
    let client = build_client(&config, cli.verbose, cancel)?;

    let default_model = config.model.as_deref();
    let aliases = AliasTable::builtin();
    let stdin_kind = StdinKind::detect();
    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::SendRaw { input } => {
            let input = commands::resolve_command_input(
                input.as_deref(),
                &mut stdin,
                stdin_kind,
                "characters-json",
            )?;
            commands::send::send_raw(&client, &input).await
        }
        Commands::Send {
            message,
            style,
            format,
        } => {
            let input =
                commands::resolve_command_input(message.as_deref(), &mut stdin, stdin_kind, "message")?;
            let delivery = if format {
                Delivery::PrintOnly
            } else {
                Delivery::Send
            };
            commands::send::send(
                &client,
                aliases,
                &input,
                &style.into(),
                default_model,
                delivery,
                &mut stdout,
            )
            .await
        }
        Commands::Format { message, style } => {
            let input =
                commands::resolve_command_input(Some(&message), &mut stdin, stdin_kind, "message")?;
            commands::send::send(
                &client,
                aliases,
                &input,
                &style.into(),
                default_model,
                Delivery::PrintOnly,
                &mut stdout,
            )
            .await
        }
        Commands::Clear { style } => {
            commands::send::clear(&client, &style.into(), default_model).await
        }
        Commands::Get { layout } => commands::get::get(&client, layout, &mut stdout).await,
        Commands::SetTransition {
            transition_type,
            speed,
        } => commands::transition::set(&client, &transition_type, &speed).await,
        Commands::GetTransition => commands::transition::get(&client, &mut stdout).await,
    }
}

fn run(cli: Cli) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dispatch(cli))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
