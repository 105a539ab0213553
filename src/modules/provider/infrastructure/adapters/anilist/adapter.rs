//! AniList provider adapter
//!
//! GraphQL-based source of start dates and titles for the mapping pipeline.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{
    modules::{
        mapping::{AnchorDateProvider, AnchorInfo},
        matching::SourceId,
        provider::infrastructure::http_client::RateLimitClient,
    },
    shared::{
        config::TransportConfig,
        errors::{AppError, AppResult},
    },
};

use super::{
    mapper::AniListMapper,
    models::{GraphQlResponse, MediaFormat, MediaResponse},
    queries::MEDIA_START_DATE_QUERY,
};

/// AniList provider adapter with GraphQL API
pub struct AniListAdapter {
    http_client: RateLimitClient,
    base_url: String,
    mapper: AniListMapper,
}

impl AniListAdapter {
    /// Create an adapter from transport settings
    pub fn new(transport: &TransportConfig) -> AppResult<Self> {
        let http_client = RateLimitClient::for_anilist(
            transport.anilist_requests_per_minute,
            transport.request_timeout,
        )?;
        Ok(Self::with_client(http_client, transport.anilist_url.clone()))
    }

    /// Create adapter with custom HTTP client (for testing)
    pub fn with_client(http_client: RateLimitClient, base_url: String) -> Self {
        Self {
            http_client,
            base_url,
            mapper: AniListMapper::new(),
        }
    }

    /// Check if a request can be made now (for testing)
    pub fn can_make_request_now(&self) -> bool {
        self.http_client.can_make_request_now()
    }

    /// Make a GraphQL request to AniList API
    async fn make_graphql_request<T>(&self, query: &str, variables: Value) -> AppResult<Option<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let body = json!({
            "query": query,
            "variables": variables,
        });

        log::debug!("AniList: Sending GraphQL request variables: {}", variables);

        let response: GraphQlResponse<T> = self.http_client.post_json(&self.base_url, &body).await?;

        if !response.errors.is_empty() {
            // Unknown ids come back as GraphQL 404 errors, also inside an HTTP 200
            if response.errors.iter().all(|e| e.status == Some(404)) {
                log::debug!("AniList: GraphQL reports not found for {}", variables);
                return Ok(None);
            }

            let messages: Vec<String> = response
                .errors
                .iter()
                .map(|e| match e.status {
                    Some(status) => format!("{} ({})", e.message, status),
                    None => e.message.clone(),
                })
                .collect();
            log::error!("AniList: GraphQL errors in response: {:?}", messages);
            return Err(AppError::ApiError(format!(
                "AniList GraphQL errors: {}",
                messages.join("; ")
            )));
        }

        Ok(response.data)
    }
}

#[async_trait]
impl AnchorDateProvider for AniListAdapter {
    async fn fetch(&self, source_id: SourceId) -> AppResult<AnchorInfo> {
        log::debug!("AniList: Getting start date for ID '{}'", source_id);

        let data: Option<MediaResponse> = match self
            .make_graphql_request(MEDIA_START_DATE_QUERY, json!({ "id": source_id }))
            .await
        {
            Ok(data) => data,
            // AniList answers unknown ids with HTTP 404
            Err(AppError::NotFound(_)) => None,
            Err(e) => return Err(e),
        };

        match data.and_then(|d| d.media) {
            Some(media) => {
                if media.format == Some(MediaFormat::Movie) {
                    log::info!(
                        "AniList: ID '{}' is a movie, TMDB usually lists no seasons for it",
                        source_id
                    );
                }
                self.mapper.map_to_anchor_info(media)
            }
            None => {
                log::info!("AniList: No anime found for ID '{}'", source_id);
                Ok(AnchorInfo::unknown())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one HTTP 200 with `body` on a local port and return its URL
    async fn serve_once(body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // Read the whole request so the client never sees a reset
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }

    fn adapter(url: String) -> AniListAdapter {
        let client = RateLimitClient::for_anilist(30, Duration::from_secs(5)).unwrap();
        AniListAdapter::with_client(client, url)
    }

    #[tokio::test]
    async fn test_graphql_not_found_is_unknown_media() {
        let url = serve_once(
            r#"{"errors":[{"message":"Not Found.","status":404,"locations":[{"line":2,"column":3}]}],"data":{"Media":null}}"#,
        )
        .await;

        let info = adapter(url).fetch(999_999_999).await.unwrap();
        assert_eq!(info, AnchorInfo::unknown());
    }

    #[tokio::test]
    async fn test_other_graphql_errors_fail() {
        let url = serve_once(
            r#"{"errors":[{"message":"Not Found.","status":404},{"message":"Internal Server Error","status":500}],"data":null}"#,
        )
        .await;

        let result = adapter(url).fetch(1).await;
        assert!(matches!(result, Err(AppError::ApiError(msg)) if msg.contains("Internal Server Error")));
    }

    #[tokio::test]
    async fn test_fetch_maps_media() {
        let url = serve_once(
            r#"{"data":{"Media":{"id":21519,"format":"MOVIE","title":{"romaji":"Kimi no Na wa.","english":"Your Name."},"startDate":{"year":2016,"month":8,"day":26}}}}"#,
        )
        .await;

        let info = adapter(url).fetch(21519).await.unwrap();
        assert_eq!(info.title.as_deref(), Some("Your Name."));
        assert_eq!(info.start_date.unwrap().to_string(), "2016-08-26");
    }

    #[test]
    fn test_adapter_creation() {
        let adapter = AniListAdapter::new(&TransportConfig::new("key")).unwrap();
        assert!(adapter.can_make_request_now());
    }

    #[test]
    fn test_parses_media_envelope() {
        let raw = r#"{
            "data": {
                "Media": {
                    "id": 20958,
                    "format": "TV",
                    "startDate": { "year": 2017, "month": 4, "day": 1 },
                    "title": { "romaji": "Shingeki no Kyojin 2", "english": "Attack on Titan Season 2" }
                }
            }
        }"#;
        let response: GraphQlResponse<MediaResponse> = serde_json::from_str(raw).unwrap();
        assert!(response.errors.is_empty());
        let media = response.data.unwrap().media.unwrap();
        let info = AniListMapper::new().map_to_anchor_info(media).unwrap();
        assert_eq!(info.start_date.unwrap().to_string(), "2017-04-01");
    }

    #[test]
    fn test_parses_not_found_envelope() {
        let raw = r#"{
            "errors": [{ "message": "Not Found.", "status": 404, "locations": [{ "line": 2, "column": 3 }] }],
            "data": { "Media": null }
        }"#;
        let response: GraphQlResponse<MediaResponse> = serde_json::from_str(raw).unwrap();
        assert_eq!(response.errors[0].status, Some(404));
        assert!(response.data.unwrap().media.is_none());
    }
}
