//! Scraping of the magazine pages that list the albums to add.
//!
//! The markup of both pages is outside our control, so each page is described
//! by a [`PageSource`] holding its URL and CSS selectors. Only the selectors
//! need to change when a page is redesigned.

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::{Res, error::Error, types::AlbumQuery, utils};

#[derive(Debug, Clone)]
pub struct PageSource {
    pub name: String,
    pub url: String,
    /// Selects one element per listed album.
    pub entry: String,
    /// Artist text, relative to an entry.
    pub artist: String,
    /// Album title text, relative to an entry.
    pub album: String,
}

impl PageSource {
    /// The magazine's list of essential albums.
    pub fn essentials(url: impl Into<String>) -> Self {
        Self {
            name: "essentials".to_string(),
            url: url.into(),
            entry: "article.album-list__item".to_string(),
            artist: ".album-list__artist".to_string(),
            album: ".album-list__title".to_string(),
        }
    }

    /// The magazine's album review index.
    pub fn reviews(url: impl Into<String>) -> Self {
        Self {
            name: "reviews".to_string(),
            url: url.into(),
            entry: "div.review-card".to_string(),
            artist: ".review-card__artist".to_string(),
            album: ".review-card__album".to_string(),
        }
    }
}

fn selector(css: &str) -> Res<Selector> {
    Selector::parse(css).map_err(|e| Error::Scrape(format!("invalid selector {:?}: {:?}", css, e)))
}

fn first_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(|e| utils::collapse_whitespace(&e.text().collect::<String>()))
        .unwrap_or_default()
}

/// Extracts artist/album pairs from a page, in document order.
///
/// Entries missing either text are skipped.
pub fn scrape_albums(html: &str, source: &PageSource) -> Res<Vec<AlbumQuery>> {
    let entry_selector = selector(&source.entry)?;
    let artist_selector = selector(&source.artist)?;
    let album_selector = selector(&source.album)?;

    let document = Html::parse_document(html);
    let mut albums = Vec::new();

    for element in document.select(&entry_selector) {
        let artist = first_text(&element, &artist_selector);
        let album = first_text(&element, &album_selector);

        if !artist.is_empty() && !album.is_empty() {
            albums.push(AlbumQuery { artist, album });
        }
    }

    Ok(albums)
}

/// Downloads the page of `source` and scrapes it.
pub async fn fetch_albums(client: &Client, source: &PageSource) -> Res<Vec<AlbumQuery>> {
    let html = client
        .get(&source.url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    scrape_albums(&html, source)
}
