use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use riffgrade::{
    config::{self, Settings},
    error, info,
    llm::{GeminiProvider, LlmProvider},
    server, success,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the web server
    Serve(ServeOptions),

    /// List the language models available to the configured API key
    Models,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to listen on (overrides SERVER_ADDRESS)
    #[clap(long)]
    addr: Option<String>,

    /// Open the landing page in the default browser
    #[clap(long)]
    open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "riffgrade=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => serve(load_settings().await, opt).await,
        Command::Models => list_models(&load_settings().await).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

async fn load_settings() -> Settings {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!(
            "Invalid configuration: {}\nSet it in the environment or in {}",
            e,
            config::env_file_path().display()
        ),
    }
}

async fn serve(mut settings: Settings, opt: ServeOptions) {
    if let Some(addr) = opt.addr {
        settings.server_address = addr;
    }

    info!(
        "Using model {} with up to {} tracks per analysis",
        settings.gemini.model, settings.track_limit
    );

    if let Err(e) = server::start_api_server(settings, opt.open).await {
        error!("Server failed: {}", e);
    }
}

async fn list_models(settings: &Settings) {
    let provider = GeminiProvider::from_settings(&settings.gemini);
    match provider.list_models().await {
        Ok(models) => {
            success!("Models that support generateContent:");
            for model in models
                .iter()
                .filter(|m| m.supported_methods.iter().any(|s| s == "generateContent"))
            {
                println!("  {}  ({})", model.name, model.display_name);
            }
        }
        Err(e) => error!("Failed to list models: {}", e),
    }
}
