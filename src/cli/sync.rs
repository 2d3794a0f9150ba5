use std::time::Duration;

use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tabled::Table;

use crate::{
    Res,
    config::Settings,
    info,
    ingest::{self, PageSource},
    management::{FileStore, TokenStore},
    spotify::{ApiClient, Session, auth::CodeSource, auth::OAuthFlow},
    success,
    types::{AlbumQuery, ResolutionTableRow},
    utils, warning,
};

/// Which magazine page(s) to take albums from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceSelection {
    Essentials,
    Reviews,
    All,
}

pub struct SyncOptions {
    pub sources: Vec<PageSource>,
    pub playlist: String,
    pub dry_run: bool,
}

/// Builds the page sources for `selection` from the configured URLs.
pub fn page_sources(settings: &Settings, selection: SourceSelection) -> Vec<PageSource> {
    let essentials = || PageSource::essentials(settings.essentials_url.clone());
    let reviews = || PageSource::reviews(settings.reviews_url.clone());

    match selection {
        SourceSelection::Essentials => vec![essentials()],
        SourceSelection::Reviews => vec![reviews()],
        SourceSelection::All => vec![essentials(), reviews()],
    }
}

/// Scrapes the magazine pages, resolves every album and fills the playlist.
pub async fn sync(settings: &Settings, options: SyncOptions, codes: &dyn CodeSource) -> Res<()> {
    let scraped = scrape_sources(&options.sources).await?;
    if scraped.is_empty() {
        warning!("No albums found on the magazine pages.");
    }

    let store = TokenStore::new(Box::new(FileStore::default_location()));
    let session = Session::start(
        OAuthFlow::new(settings),
        store,
        settings.scopes.clone(),
        codes,
    )
    .await?;
    let mut client = ApiClient::new(settings, session);

    let album_ids = resolve_albums(&mut client, &scraped).await?;

    if options.dry_run {
        info!("Dry run, playlist {} left untouched.", options.playlist);
        return Ok(());
    }

    fill_playlist(&mut client, &options.playlist, &album_ids).await?;
    Ok(())
}

/// Makes sure the playlist named `name` exists, even with nothing to add, and
/// adds the tracks of `album_ids` to it. Returns the number of tracks sent.
pub async fn fill_playlist(client: &mut ApiClient, name: &str, album_ids: &[String]) -> Res<usize> {
    let user_id = client.current_user_id().await?;
    let playlist = client.get_or_create_playlist(&user_id, name).await?;

    if album_ids.is_empty() {
        warning!("No albums to add to {}.", playlist.name);
        return Ok(0);
    }

    info!("Add tracks of {} albums to {}", album_ids.len(), playlist.name);
    let added = client
        .add_albums_to_playlist(&playlist.id, album_ids)
        .await?;

    success!("Added {} tracks to playlist {}", added, playlist.name);
    Ok(added)
}

async fn scrape_sources(sources: &[PageSource]) -> Res<Vec<(String, AlbumQuery)>> {
    let client = Client::new();
    let mut scraped = Vec::new();

    for source in sources {
        let pb = spinner(format!("Fetching {} page...", source.name));
        let result = ingest::fetch_albums(&client, source).await;
        pb.finish_and_clear();

        let albums = result?;
        if albums.is_empty() {
            warning!(
                "No albums found on the {} page, the markup may have changed.",
                source.name
            );
        } else {
            success!("Found {} albums on the {} page", albums.len(), source.name);
        }

        scraped.extend(albums.into_iter().map(|a| (source.name.clone(), a)));
    }

    Ok(scraped)
}

/// Searches every pair and prints the outcome. Returns the distinct album ids
/// in the order they were found.
async fn resolve_albums(
    client: &mut ApiClient,
    scraped: &[(String, AlbumQuery)],
) -> Res<Vec<String>> {
    let pb = spinner("Searching albums...".to_string());
    let mut album_ids = Vec::new();
    let mut rows = Vec::new();

    for (source, query) in scraped {
        pb.set_message(format!("Searching {} - {}", query.artist, query.album));

        let found = match client.search_album(query).await {
            Ok(found) => found,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };

        rows.push(ResolutionTableRow {
            source: source.clone(),
            artist: query.artist.clone(),
            album: query.album.clone(),
            result: found.clone().unwrap_or_else(|| "not found".to_string()),
        });

        if let Some(id) = found {
            album_ids.push(id);
        }
    }

    pb.finish_and_clear();
    if !rows.is_empty() {
        println!("{}", Table::new(rows));
    }

    let resolved = album_ids.len();
    utils::remove_duplicate_ids(&mut album_ids);
    if resolved < scraped.len() {
        warning!("{} of {} albums were not found.", scraped.len() - resolved, scraped.len());
    }

    Ok(album_ids)
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_ESSENTIALS_URL, DEFAULT_PLAYLIST, DEFAULT_REVIEWS_URL};

    fn settings() -> Settings {
        Settings {
            client_id: "id".into(),
            client_secret: "secret".into(),
            redirect_uri: "http://127.0.0.1:8888/callback".into(),
            scopes: vec!["playlist-modify-private".into()],
            auth_url: "https://accounts.example/authorize".into(),
            token_url: "https://accounts.example/api/token".into(),
            api_url: "https://api.example/v1".into(),
            server_addr: "127.0.0.1:8888".into(),
            playlist_name: DEFAULT_PLAYLIST.into(),
            essentials_url: DEFAULT_ESSENTIALS_URL.into(),
            reviews_url: DEFAULT_REVIEWS_URL.into(),
        }
    }

    #[test]
    fn test_page_sources_all() {
        let sources = page_sources(&settings(), SourceSelection::All);
        let names: Vec<_> = sources.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["essentials", "reviews"]);
    }

    #[test]
    fn test_page_sources_use_built_in_urls() {
        let sources = page_sources(&settings(), SourceSelection::Essentials);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].url, DEFAULT_ESSENTIALS_URL);

        let sources = page_sources(&settings(), SourceSelection::Reviews);
        assert_eq!(sources[0].url, DEFAULT_REVIEWS_URL);
    }

    #[test]
    fn test_page_sources_follow_overridden_url() {
        let mut s = settings();
        s.reviews_url = "https://mag.example/reviews".into();

        let sources = page_sources(&s, SourceSelection::All);
        assert_eq!(sources[0].url, DEFAULT_ESSENTIALS_URL);
        assert_eq!(sources[1].url, "https://mag.example/reviews");
    }
}
