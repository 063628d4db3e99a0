use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotifyou::{
    app::App,
    catalog::DEFAULT_LIMIT,
    cli,
    config::{self, Settings},
    error,
    types::TimeRange,
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
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in with Spotify
    Auth,

    /// Sign out and forget the stored session
    Logout,

    /// Your short-term top artists and tracks at a glance
    Home,

    /// Your top artists
    Artists(TopOptions),

    /// Your top tracks
    Tracks(TopOptions),

    /// AI recommendations seeded with your recent top songs
    Recommend(RecommendOptions),

    /// AI playlist suggestions for a theme or mood
    Playlist(PlaylistOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TopOptions {
    /// short_term (~4 weeks), medium_term (~6 months) or long_term (years)
    #[clap(long, default_value = "short_term")]
    pub time_range: TimeRange,

    /// Number of entries to fetch
    #[clap(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,

    /// Ignore the cached list and fetch again
    #[clap(long)]
    pub refresh: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    /// Position of a song in your recent top songs; can be repeated (max 5)
    #[clap(long = "pick", num_args = 1)]
    pub picks: Vec<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Theme or mood, e.g. "Chill study music"
    pub theme: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };
    let app = App::new(settings);

    match cli.command {
        Command::Auth => cli::auth(&app).await,
        Command::Logout => cli::logout(&app).await,
        Command::Home => cli::home(&app).await,
        Command::Artists(opt) => {
            cli::artists(&app, opt.time_range, opt.limit, opt.refresh).await
        }
        Command::Tracks(opt) => cli::tracks(&app, opt.time_range, opt.limit, opt.refresh).await,
        Command::Recommend(opt) => cli::recommend(&app, opt.picks).await,
        Command::Playlist(opt) => cli::playlist(&app, opt.theme).await,
        Command::Completions(_) => {}
    }
}
