use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotmag::{
    cli::{self, SourceSelection, SyncOptions},
    config::{self, Settings},
    error,
    spotify::auth::{CallbackListener, CodeSource, PromptForCode},
    warning,
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
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth(AuthOptions),

    /// Add the albums from the magazine pages to the playlist (default)
    Sync(SyncArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Receive the authorization code on the local callback server instead of pasting it
    #[clap(long)]
    callback: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SyncArgs {
    /// Magazine page(s) to read albums from
    #[clap(long, value_enum, default_value = "essentials")]
    source: SourceSelection,

    /// Target playlist, defaults to SPOTMAG_PLAYLIST
    #[clap(long)]
    playlist: Option<String>,

    /// Scrape and search only, leave the playlist untouched
    #[clap(long)]
    dry_run: bool,

    /// Receive the authorization code on the local callback server instead of pasting it
    #[clap(long)]
    callback: bool,
}

impl Default for SyncArgs {
    fn default() -> Self {
        Self {
            source: SourceSelection::Essentials,
            playlist: None,
            dry_run: false,
            callback: false,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn code_source(settings: &Settings, callback: bool) -> Box<dyn CodeSource> {
    if callback {
        Box::new(CallbackListener::new(settings.server_addr.clone()))
    } else {
        Box::new(PromptForCode)
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(Command::Completions(opt)) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        warning!("Cannot load .env file. Err: {}", e);
    }

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Cannot load configuration. Err: {}", e),
    };

    let result = match cli.command.unwrap_or(Command::Sync(SyncArgs::default())) {
        Command::Auth(opt) => {
            let codes = code_source(&settings, opt.callback);
            cli::auth(&settings, codes.as_ref()).await
        }
        Command::Sync(opt) => {
            let options = SyncOptions {
                sources: cli::page_sources(&settings, opt.source),
                playlist: opt.playlist.unwrap_or_else(|| settings.playlist_name.clone()),
                dry_run: opt.dry_run,
            };
            let codes = code_source(&settings, opt.callback);
            cli::sync(&settings, options, codes.as_ref()).await
        }
        Command::Completions(_) => Ok(()),
    };

    if let Err(e) = result {
        if e.is_auth_error() {
            warning!("Run `{} auth` to log in again.", env!("CARGO_PKG_NAME"));
        }
        error!("{}", e);
    }
}
