//! spotifyou - your Spotify listening dashboard in the terminal
//!
//! This library signs a user in to Spotify, reads their top artists and
//! tracks for a chosen time window through a TTL cache, and asks a
//! generative-text model for song suggestions based on seed tracks or a
//! free-text mood.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `app` - Assembly of all services from configuration
//! - `catalog` - Cached top artists / top tracks
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types per collaborator
//! - `management` - Session persistence and the response cache
//! - `recommend` - Prompt building, Gemini client and reply parsing
//! - `selection` - Bounded seed-song selection
//! - `server` - Local HTTP server for OAuth callbacks
//! - `session` - Session provider gating every upstream call
//! - `spotify` - Spotify Web API client and identity backend
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE helpers and table formatting
//!
//! # Example
//!
//! ```
//! use spotifyou::{app::App, config, types::TimeRange};
//!
//! #[tokio::main]
//! async fn main() -> spotifyou::Res<()> {
//!     config::load_env().await?;
//!     let app = App::new(config::Settings::from_env()?);
//!     let artists = app.catalog.top_artists(&TimeRange::ShortTerm, 10).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod recommend;
pub mod selection;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use spotifyou::Res;
///
/// async fn load() -> Res<()> {
///     spotifyou::config::load_env().await?;
///     Ok(())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Waiting for Spotify authorization in your browser...");
/// info!("Seed: \"{}\" by {}", track, artist);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations. Used to provide positive feedback
/// when operations complete successfully.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("Authentication successful!");
/// success!("Suggested Playlist ({} songs)", records.len());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// that require immediate program termination.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It should only be used for fatal errors where
/// recovery is not possible.
///
/// # Example
///
/// ```
/// error!("Cannot load environment. Err: {}", e);
/// error!("No active session. Please run `spotifyou auth`");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues or important notices that don't require program termination.
/// Used for recoverable issues or important information that users should notice.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("Failed to read cache entry {}: {}", key, e);
/// warning!("Error caching data for {}: {}", key, e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
