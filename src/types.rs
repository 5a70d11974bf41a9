use std::fmt;

use serde::{Deserialize, Serialize};

/// Bearer credential returned by the Spotify token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub scope: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    ShortTerm,
    MediumTerm,
    #[default]
    LongTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

/// Where the tracks to analyze come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackSourceKind {
    #[default]
    Top,
    Recent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackQuery {
    pub source: TrackSourceKind,
    pub limit: u32,
    pub time_range: TimeRange,
}

/// Acoustic descriptors of a track, either from Spotify or estimated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AudioFeatures {
    pub tempo: f64,
    pub key: i32,
    pub mode: i32,
    pub time_signature: i32,
    pub acousticness: f64,
    pub energy: f64,
}

impl Default for AudioFeatures {
    fn default() -> Self {
        Self {
            tempo: 120.0,
            key: 0,
            mode: 1,
            time_signature: 4,
            acousticness: 0.3,
            energy: 0.5,
        }
    }
}

/// One track as handed to the classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSummary {
    pub name: String,
    pub artist: String,
    pub tempo: f64,
    pub key: i32,
    pub mode: i32,
    pub time_signature: i32,
    pub acousticness: f64,
    pub energy: f64,
}

impl TrackSummary {
    pub fn new(name: impl Into<String>, artist: impl Into<String>, features: AudioFeatures) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
            tempo: features.tempo,
            key: features.key,
            mode: features.mode,
            time_signature: features.time_signature,
            acousticness: features.acousticness,
            energy: features.energy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationEntry {
    pub title: String,
    pub artist: String,
    pub difficulty: Difficulty,
    pub rationale: String,
}

/// Songs grouped by tier, always in the order Easy, Medium, Hard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    tiers: [Vec<ClassificationEntry>; 3],
}

impl Classification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry to its tier.
    ///
    /// Returns `false` and leaves the tier untouched when the same song
    /// (case-insensitive title and artist) is already listed there.
    pub fn push(&mut self, entry: ClassificationEntry) -> bool {
        let tier = &mut self.tiers[entry.difficulty.index()];
        let duplicate = tier.iter().any(|e| {
            e.title.eq_ignore_ascii_case(&entry.title) && e.artist.eq_ignore_ascii_case(&entry.artist)
        });
        if duplicate {
            return false;
        }
        tier.push(entry);
        true
    }

    pub fn tier(&self, difficulty: Difficulty) -> &[ClassificationEntry] {
        &self.tiers[difficulty.index()]
    }

    pub fn entries(&self) -> impl Iterator<Item = &ClassificationEntry> {
        self.tiers.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.tiers.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What the analysis page shows: parsed tiers or the reason there are none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Classified(Classification),
    Failed(String),
}

// Spotify Web API payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub items: Vec<SpotifyTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentlyPlayedResponse {
    pub items: Vec<PlayHistoryItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayHistoryItem {
    pub track: SpotifyTrack,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTrack {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub popularity: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

/// Audio features as returned by `/audio-features/{id}`; any field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioFeaturesResponse {
    #[serde(default)]
    pub tempo: Option<f64>,
    #[serde(default)]
    pub key: Option<i32>,
    #[serde(default)]
    pub mode: Option<i32>,
    #[serde(default)]
    pub time_signature: Option<i32>,
    #[serde(default)]
    pub acousticness: Option<f64>,
    #[serde(default)]
    pub energy: Option<f64>,
}

impl From<AudioFeaturesResponse> for AudioFeatures {
    fn from(raw: AudioFeaturesResponse) -> Self {
        let defaults = AudioFeatures::default();
        AudioFeatures {
            tempo: raw.tempo.filter(|t| t.is_finite() && *t > 0.0).unwrap_or(defaults.tempo),
            key: raw.key.filter(|k| (0..=11).contains(k)).unwrap_or(defaults.key),
            mode: raw.mode.filter(|m| *m == 0 || *m == 1).unwrap_or(defaults.mode),
            time_signature: raw
                .time_signature
                .filter(|t| *t > 0)
                .unwrap_or(defaults.time_signature),
            acousticness: raw.acousticness.unwrap_or(defaults.acousticness),
            energy: raw.energy.unwrap_or(defaults.energy),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}
