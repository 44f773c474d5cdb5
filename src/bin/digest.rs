// Entry point for a single digest run

use anyhow::Result;
use chat_digest::ai::GeminiClient;
use chat_digest::core::config::AppConfig;
use chat_digest::core::models::{Destination, Selection};
use chat_digest::pipeline::DigestPipeline;
use chat_digest::pipeline::deliver::{DeliverySink, StdoutSink};
use chat_digest::pipeline::summarize::Summarizer;
use chat_digest::pipeline::window::trailing_window_in;
use chat_digest::telegram::login::TerminalPrompter;
use chat_digest::telegram::{TelegramChat, TelegramClient, select_store};
use chrono::Utc;
use clap::Parser;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

/// Summarize a Telegram group chat with Gemini.
#[derive(Debug, Parser)]
#[command(name = "chat-digest", version)]
struct Cli {
    /// Window start: local midnight this many days ago
    #[arg(long, default_value_t = 1)]
    days: u32,

    /// Digest the last N messages instead of a time window
    #[arg(long, conflicts_with = "days")]
    last: Option<usize>,

    /// Where to send the digest
    #[arg(long, value_enum, default_value_t = Destination::Stdout)]
    deliver_to: Destination,

    /// Print the base64 session token (for TG_SESSION) after login
    #[arg(long)]
    print_session: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    chat_digest::setup_logging();
    let cli = Cli::parse();

    let config = AppConfig::from_env().inspect_err(|e| error!("Config error: {}", e))?;

    let run_id = Uuid::new_v4();
    run(cli, config)
        .instrument(info_span!("digest_run", %run_id))
        .await
        .inspect_err(|e| error!("Digest run failed: {:#}", e))
}

async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let client = TelegramClient::connect(&config, select_store(&config)).await?;
    client
        .ensure_authorized(&TerminalPrompter::new(config.language))
        .await?;

    if cli.print_session {
        println!("{}", client.export_session());
    }

    let selection = match cli.last {
        Some(count) => Selection::Last(count),
        None => Selection::Since(trailing_window_in(Utc::now(), config.timezone, cli.days)),
    };

    let summarizer = Summarizer::new(GeminiClient::from_config(&config), config.language);
    let stdout = StdoutSink;
    let sink: &dyn DeliverySink<TelegramChat> = match cli.deliver_to {
        Destination::Stdout => &stdout,
        Destination::Chat | Destination::Saved => &client,
    };

    let mut pipeline = DigestPipeline::new(&client, &summarizer, sink, config.language);
    let digest = pipeline
        .run(&config.tg_invite_hash, &selection, cli.deliver_to)
        .await?;

    info!(
        "Digest of {} messages delivered to {:?}",
        digest.message_count, cli.deliver_to
    );
    Ok(())
}
