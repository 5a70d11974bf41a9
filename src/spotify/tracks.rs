use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::{SpotifyClient, TrackSource};
use crate::{
    config::MAX_TRACK_LIMIT,
    error::SpotifyError,
    types::{
        AudioFeatures, AudioFeaturesResponse, RecentlyPlayedResponse, SpotifyTrack,
        TopTracksResponse, TrackQuery, TrackSourceKind, TrackSummary,
    },
    utils,
};

/// Popularity assumed when Spotify does not report one.
const DEFAULT_POPULARITY: u32 = 50;
/// Upper bound for the estimated energy.
const MAX_ESTIMATED_ENERGY: f64 = 0.8;
const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Estimated audio features for a track whose real features are unavailable.
///
/// Only the energy depends on the track: `min(popularity / 100, 0.8)`, with a
/// missing popularity counted as 50. Every other field is the fixed default.
pub fn fallback_features(popularity: Option<u32>) -> AudioFeatures {
    let popularity = popularity.unwrap_or(DEFAULT_POPULARITY);
    AudioFeatures {
        energy: (popularity as f64 / 100.0).min(MAX_ESTIMATED_ENERGY),
        ..AudioFeatures::default()
    }
}

#[async_trait]
impl TrackSource for SpotifyClient {
    async fn fetch_tracks(
        &self,
        access_token: &str,
        query: &TrackQuery,
    ) -> Result<Vec<TrackSummary>, SpotifyError> {
        let limit = query.limit.clamp(1, MAX_TRACK_LIMIT);

        let tracks = match query.source {
            TrackSourceKind::Top => self.top_tracks(access_token, limit, query).await?,
            TrackSourceKind::Recent => self.recently_played(access_token, limit).await?,
        };

        debug!(count = tracks.len(), source = ?query.source, "fetched track listing");

        // join_all yields results in input order, whatever order they complete in
        let results = join_all(
            tracks
                .iter()
                .map(|track| self.summarize(access_token, track)),
        )
        .await;

        let estimated = results.iter().filter(|(_, estimated)| *estimated).count();
        if estimated > 0 {
            info!(
                estimated,
                total = results.len(),
                "audio features unavailable for some tracks, using estimates"
            );
        }

        Ok(results.into_iter().map(|(summary, _)| summary).collect())
    }
}

impl SpotifyClient {
    async fn top_tracks(
        &self,
        access_token: &str,
        limit: u32,
        query: &TrackQuery,
    ) -> Result<Vec<SpotifyTrack>, SpotifyError> {
        let url = format!("{}/me/top/tracks", self.api_url);
        let res = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .query(&[
                ("limit", limit.to_string()),
                ("time_range", query.time_range.as_str().to_string()),
            ])
            .send()
            .await?;

        let body: TopTracksResponse = decode(res).await?;
        Ok(body.items)
    }

    async fn recently_played(
        &self,
        access_token: &str,
        limit: u32,
    ) -> Result<Vec<SpotifyTrack>, SpotifyError> {
        let url = format!("{}/me/player/recently-played", self.api_url);
        let res = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;

        let body: RecentlyPlayedResponse = decode(res).await?;
        let mut tracks: Vec<SpotifyTrack> = body.items.into_iter().map(|i| i.track).collect();
        utils::remove_duplicate_tracks(&mut tracks);
        Ok(tracks)
    }

    /// Builds the summary for one track; the flag is set when features were estimated.
    async fn summarize(&self, access_token: &str, track: &SpotifyTrack) -> (TrackSummary, bool) {
        let (features, estimated) = match self.audio_features(access_token, track).await {
            Ok(features) => (features, false),
            Err(e) => {
                debug!(track = %track.name, error = %e, "audio features lookup failed");
                (fallback_features(track.popularity), true)
            }
        };

        let artist = track
            .artists
            .first()
            .map(|a| a.name.clone())
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        (TrackSummary::new(track.name.clone(), artist, features), estimated)
    }

    async fn audio_features(
        &self,
        access_token: &str,
        track: &SpotifyTrack,
    ) -> Result<AudioFeatures, SpotifyError> {
        let Some(id) = track.id.as_deref() else {
            return Err(SpotifyError::Decode("track has no id".to_string()));
        };

        let url = format!("{}/audio-features/{}", self.api_url, id);
        let res = self.client.get(&url).bearer_auth(access_token).send().await?;

        let raw: AudioFeaturesResponse = decode(res).await?;
        Ok(raw.into())
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, SpotifyError> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(SpotifyError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = res.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| SpotifyError::Decode(e.to_string()))
}
