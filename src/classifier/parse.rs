use super::markup::{Block, to_blocks};
use crate::types::{Classification, ClassificationEntry, Difficulty};

const TITLE_SEPARATORS: [&str; 3] = [" - ", " – ", " — "];

/// Parses the model's answer into tiers.
///
/// Expects a top-level heading per tier and a sub-heading per song, with the
/// rationale below it. Anything that does not fit (text before the first
/// tier, unknown sections, songs outside a tier, repeated songs) is skipped;
/// garbage in gives empty tiers out, never an error.
pub fn parse_classification(response: &str) -> Classification {
    let mut walker = Walker::default();
    for block in to_blocks(response) {
        walker.visit(block);
    }
    walker.finish()
}

#[derive(Default)]
struct Walker {
    result: Classification,
    tier_level: Option<u8>,
    tier: Option<Difficulty>,
    entry: Option<PendingEntry>,
}

struct PendingEntry {
    level: u8,
    title: String,
    artist: String,
    difficulty: Difficulty,
    rationale: Vec<String>,
}

impl Walker {
    fn visit(&mut self, block: Block) {
        match block {
            Block::Heading { level, text } => self.heading(level, text),
            Block::Text(text) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.rationale.push(text);
                }
            }
        }
    }

    fn heading(&mut self, level: u8, text: String) {
        let at_tier_level = self.tier_level.is_none_or(|tl| level <= tl);

        if at_tier_level {
            if let Some(difficulty) = tier_of(&text) {
                self.flush();
                self.tier_level.get_or_insert(level);
                self.tier = Some(difficulty);
                return;
            }
        }

        let Some(tier_level) = self.tier_level else {
            // preamble before the first tier
            return;
        };

        if level <= tier_level {
            // some other section ("Summary", "Notes") ends the current tier
            self.flush();
            self.tier = None;
            return;
        }

        if let Some(entry) = self.entry.as_mut() {
            if level > entry.level {
                // deeper headings belong to the song's rationale
                entry.rationale.push(text);
                return;
            }
        }

        self.flush();
        if let Some(difficulty) = self.tier {
            self.entry = song_entry(level, &text, difficulty);
        }
    }

    fn flush(&mut self) {
        if let Some(entry) = self.entry.take() {
            self.result.push(ClassificationEntry {
                title: entry.title,
                artist: entry.artist,
                difficulty: entry.difficulty,
                rationale: entry.rationale.join(" "),
            });
        }
    }

    fn finish(mut self) -> Classification {
        self.flush();
        self.result
    }
}

/// Words allowed next to the tier name before a subtitle ("Easy Songs - ...").
const TIER_FILLERS: [&str; 7] = ["songs", "song", "tracks", "tier", "level", "difficulty", "pieces"];

/// Which tier a heading names, if any.
///
/// Accepts "Easy", "Easy Songs", "🟢 Medium Difficulty" and the like. With a
/// subtitle ("Easy - Beginner Friendly") only the part before the separator
/// counts, and it must be the tier name alone, so "Hard Times - Paramore"
/// stays a song.
fn tier_of(text: &str) -> Option<Difficulty> {
    let subtitle_at = TITLE_SEPARATORS
        .iter()
        .filter_map(|sep| text.find(sep))
        .min();

    match subtitle_at {
        Some(idx) => {
            let mut name = words(&text[..idx]);
            let difficulty = difficulty_named(&name.next()?)?;
            name.all(|w| TIER_FILLERS.contains(&w.as_str()))
                .then_some(difficulty)
        }
        None => difficulty_named(&words(text).next()?),
    }
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

fn difficulty_named(word: &str) -> Option<Difficulty> {
    match word {
        "easy" => Some(Difficulty::Easy),
        "medium" => Some(Difficulty::Medium),
        "hard" => Some(Difficulty::Hard),
        _ => None,
    }
}

fn song_entry(level: u8, text: &str, difficulty: Difficulty) -> Option<PendingEntry> {
    let text = strip_numbering(text);
    let (title, artist) = split_title_artist(text);
    let title = title.trim_matches(|c| c == '"' || c == '\'' || c == '“' || c == '”');
    if title.is_empty() {
        return None;
    }

    Some(PendingEntry {
        level,
        title: title.to_string(),
        artist: artist.to_string(),
        difficulty,
        rationale: Vec::new(),
    })
}

/// Splits "Title - Artist" at the last separator; titles may contain dashes themselves.
pub fn split_title_artist(text: &str) -> (&str, &str) {
    let split = TITLE_SEPARATORS
        .iter()
        .filter_map(|sep| text.rfind(sep).map(|idx| (idx, sep.len())))
        .max_by_key(|(idx, _)| *idx);

    match split {
        Some((idx, len)) => (text[..idx].trim(), text[idx + len..].trim()),
        None => (text.trim(), ""),
    }
}

/// Drops a leading "1." or "2)" list number.
fn strip_numbering(text: &str) -> &str {
    let digits = text.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return text;
    }
    let rest = &text[digits..];
    match rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
        Some(rest) if rest.starts_with(' ') => rest.trim_start(),
        _ => text,
    }
}
