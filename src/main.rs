use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use huesort::{cli, color::SortMode, config, error, types::PkceToken, utils};
use tokio::sync::Mutex;

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
    /// Authorize with Spotify API
    Auth,

    /// List playlists owned by the current user
    Playlists(PlaylistsOptions),

    /// Sort a playlist's tracks by album-art color
    Sort(SortOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    /// Search for playlists by name
    #[clap(long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SortOptions {
    /// Spotify ID of the playlist to sort
    pub playlist_id: String,

    /// Similarity mode
    #[clap(
        long,
        default_value = "single-color-euclidean",
        value_parser = utils::parse_sort_mode
    )]
    pub mode: SortMode,

    /// Number of colors in the reduced artwork palette
    #[clap(long)]
    pub palette_size: Option<usize>,

    /// Number of dominant colors per signature (defaults to 1 or 3 depending on mode)
    #[clap(long)]
    pub top_k: Option<usize>,

    /// Abort the whole run on the first failing track instead of skipping it
    #[clap(long)]
    pub strict: bool,

    /// Chain each track to its nearest neighbor instead of scoring against a
    /// fixed reference (experimental, O(n²))
    #[clap(long)]
    pub greedy: bool,
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

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Playlists(opt) => cli::playlists(opt.search).await,
        Command::Sort(opt) => {
            cli::sort(
                opt.playlist_id,
                opt.mode,
                opt.palette_size,
                opt.top_k,
                opt.strict,
                opt.greedy,
            )
            .await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
