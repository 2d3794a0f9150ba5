use crate::{
    Res,
    spotify::ApiClient,
    types::{AlbumQuery, GetAlbumResponse, SearchResponse},
};

impl ApiClient {
    /// Looks up the album id for an artist/album pair.
    ///
    /// The first search hit is accepted as is; `None` means the search came
    /// back empty.
    pub async fn search_album(&mut self, query: &AlbumQuery) -> Res<Option<String>> {
        let expression = query.search_expression();
        let res: SearchResponse = self
            .get(
                "/search",
                &[("q", expression.as_str()), ("type", "album"), ("limit", "1")],
            )
            .await?;

        Ok(res.albums.items.into_iter().next().map(|album| album.id))
    }

    /// `GET /albums/{id}` including the first page of its tracks.
    pub async fn get_album(&mut self, album_id: &str) -> Res<GetAlbumResponse> {
        self.get(&format!("/albums/{}", album_id), &[]).await
    }
}
