//! riffgrade library
//!
//! Sign in with Spotify, pull your top tracks and their audio features, and let a
//! language model sort them into Easy, Medium and Hard for the instrument you
//! play. The result is served as a plain HTML page.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the web surface
//! - `classifier` - Prompt construction and parsing of the model's tiered answer
//! - `config` - Environment loading and validated settings
//! - `error` - Error taxonomy and its HTTP mapping
//! - `llm` - Language model provider trait and the Gemini implementation
//! - `management` - In-memory session and login state stores
//! - `render` - HTML pages
//! - `server` - Router assembly and the listener
//! - `spotify` - Spotify accounts and Web API client
//! - `types` - Data structures shared across modules
//! - `utils` - Small helpers (token generation, escaping, normalization)
//!
//! # Example
//!
//! ```no_run
//! use riffgrade::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> riffgrade::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     server::start_api_server(settings, false).await
//! }
//! ```

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod llm;
pub mod management;
pub mod render;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the binary and server plumbing level where errors of several
/// kinds meet. Library operations return their own typed errors.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for failures the process cannot recover from, such as missing
/// configuration at startup. Code after this macro does not execute.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
