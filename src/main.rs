use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use brujula::config::Config;
use brujula::gateway::server::{ServerConfig, start_server};
use brujula::ui::chat;

#[derive(Parser)]
#[command(name = "brujula")]
#[command(about = "Orientación vocacional conversacional — Expo Carreras", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory to read brujula.toml from (defaults to the working directory)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start an interactive guidance session in the terminal
    Chat,
    /// Run the credential-holding proxy in front of the Gemini API
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Allow cross-origin requests, for local front-end development
        #[arg(long)]
        dev: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let config = Config::load(&config_dir)?;

    match cli.command {
        Command::Chat => chat::run(&config).await,
        Command::Serve { port, dev } => {
            let server = ServerConfig {
                port: port.unwrap_or(config.port),
                api_key: config.api_key.clone(),
                dev_mode: dev,
                ..ServerConfig::default()
            };
            start_server(server).await
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_filter = if verbose { "brujula=debug" } else { "brujula=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
