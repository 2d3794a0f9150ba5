use crate::{
    Res, info,
    spotify::ApiClient,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        GetUserPlaylistsResponse, Playlist,
    },
};

/// Number of playlists fetched when looking for one by name. Playlists beyond
/// the first page are not seen.
pub const PLAYLIST_PAGE_SIZE: &str = "50";

/// Maximum number of URIs the insertion endpoint accepts per request.
pub const TRACK_BATCH_SIZE: usize = 100;

impl ApiClient {
    /// `GET /users/{user_id}/playlists`, first page only.
    pub async fn get_playlists(&mut self, user_id: &str) -> Res<Vec<Playlist>> {
        let res: GetUserPlaylistsResponse = self
            .get(
                &format!("/users/{}/playlists", user_id),
                &[("limit", PLAYLIST_PAGE_SIZE)],
            )
            .await?;
        Ok(res.items)
    }

    /// Creates a private, non-collaborative playlist.
    pub async fn create_playlist(&mut self, user_id: &str, name: &str) -> Res<Playlist> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: "Albums picked from magazine pages.".to_string(),
            public: false,
            collaborative: false,
        };

        self.post(&format!("/users/{}/playlists", user_id), &body)
            .await
    }

    /// Returns the first playlist named exactly `name`, creating it if the
    /// listing has none.
    pub async fn get_or_create_playlist(&mut self, user_id: &str, name: &str) -> Res<Playlist> {
        let playlists = self.get_playlists(user_id).await?;

        if let Some(playlist) = playlists.into_iter().find(|p| p.name == name) {
            info!("Using existing playlist {} ({})", playlist.name, playlist.id);
            return Ok(playlist);
        }

        info!("Creating playlist {}", name);
        self.create_playlist(user_id, name).await
    }

    /// Appends `uris` in order, [`TRACK_BATCH_SIZE`] per request.
    ///
    /// A failing batch aborts the rest; batches already sent stay in the
    /// playlist. Returns the last snapshot id, if anything was sent.
    pub async fn add_tracks(&mut self, playlist_id: &str, uris: &[String]) -> Res<Option<String>> {
        let path = format!("/playlists/{}/tracks", playlist_id);
        let mut snapshot_id = None;

        for chunk in uris.chunks(TRACK_BATCH_SIZE) {
            let body = AddTrackToPlaylistRequest {
                uris: chunk.to_vec(),
            };
            let res: AddTrackToPlaylistResponse = self.post(&path, &body).await?;
            snapshot_id = Some(res.snapshot_id);
        }

        Ok(snapshot_id)
    }

    /// Adds every track of every album, album by album in the given order.
    ///
    /// Returns the number of tracks sent.
    pub async fn add_albums_to_playlist(
        &mut self,
        playlist_id: &str,
        album_ids: &[String],
    ) -> Res<usize> {
        let mut uris = Vec::new();
        for album_id in album_ids {
            let album = self.get_album(album_id).await?;
            uris.extend(album.tracks.items.into_iter().map(|track| track.uri));
        }

        self.add_tracks(playlist_id, &uris).await?;
        Ok(uris.len())
    }
}
