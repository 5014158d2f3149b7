use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chatbot::core::config::{self, ChatbotConfig, ResolvedConfig};
use chatbot::core::controller::ConversationController;
use chatbot::transport::HttpTransport;
use chatbot::tui;
use clap::{Parser, Subcommand};
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "chatbot", about = "Terminal chat client", version)]
struct Args {
    /// Chat service base URL (overrides config file and CHATBOT_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Where to write the log
    #[arg(long, default_value = "chatbot.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Send one message and print the reply
    Say {
        #[arg(required = true)]
        message: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> std::io::Result<ExitCode> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Using default configuration: {}", e);
        eprintln!("chatbot: {e}; using defaults");
        ChatbotConfig::default()
    });
    let config = config::resolve(&file_config, args.base_url.as_deref());
    info!("chatbot starting up against {}", config.base_url);

    match args.command {
        Some(Command::Say { message }) => Ok(say(config, &message.join(" ")).await),
        None => {
            tui::run(config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// One-shot exchange: probe, send, print the assistant turn.
async fn say(config: ResolvedConfig, message: &str) -> ExitCode {
    let transport = Arc::new(HttpTransport::new(config.base_url));
    let mut controller = ConversationController::new(transport);
    controller.probe_connection().await;

    if !controller.submit(message).await {
        eprintln!("chatbot: nothing to send");
        return ExitCode::FAILURE;
    }

    match controller.state().messages.last() {
        Some(reply) if reply.is_error => {
            eprintln!("{}", reply.content);
            ExitCode::FAILURE
        }
        Some(reply) => {
            println!("{}", reply.content);
            ExitCode::SUCCESS
        }
        None => ExitCode::FAILURE,
    }
}
