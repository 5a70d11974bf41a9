use crate::types::{Difficulty, TrackSummary};

/// Builds the single instruction sent to the model.
///
/// The track list is embedded as pretty-printed JSON in provider order, so
/// the same tracks always produce the same prompt.
pub fn build_prompt(summaries: &[TrackSummary], instrument: &str) -> String {
    let songs = serde_json::to_string_pretty(summaries).unwrap_or_else(|_| "[]".to_string());
    let tiers = Difficulty::ALL
        .iter()
        .map(|d| format!("# {}", d))
        .collect::<Vec<_>>()
        .join(", then ");

    format!(
        r###"You are an experienced {instrument} teacher. Rate how hard each of the following songs is to play on {instrument} for a beginner to intermediate player. Consider tempo, key and chord changes, time signature, and the techniques the song requires.

Songs with their audio features (key is a pitch class 0-11 where 0 = C, mode 1 = major and 0 = minor, tempo in BPM):
{songs}

Answer in Markdown using exactly this structure and nothing else:
- Three top-level headings, in this order: {tiers}.
- Under each heading, one second-level heading per song in the form "## Title - Artist".
- Under each song heading, one to two sentences explaining the rating for {instrument}, referring to tempo, key or chords, or technique.
- A heading with no songs stays empty; do not add placeholder songs.

Every song listed above must be categorized exactly once. If a song is ambiguous, put it in the tier that fits it best. Do not add an introduction, a summary, or any other sections."###,
        instrument = instrument,
        songs = songs,
        tiers = tiers,
    )
}
