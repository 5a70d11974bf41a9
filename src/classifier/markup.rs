//! Line-level structure of the lightweight markup the model answers in.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Text(String),
}

/// Splits Markdown-ish text into headings and text lines.
///
/// Blank lines and code fence markers are dropped. Heading text loses its
/// closing `#`s, emphasis markers and a trailing colon; text lines lose list
/// bullets.
pub fn to_blocks(markdown: &str) -> Vec<Block> {
    markdown
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("```"))
        .map(|line| match heading(line) {
            Some((level, text)) => Block::Heading { level, text },
            None => Block::Text(strip_bullet(line).to_string()),
        })
        .filter(|block| !matches!(block, Block::Text(t) if t.is_empty()))
        .collect()
}

fn heading(line: &str) -> Option<(u8, String)> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }

    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        // "#hashtag", not a heading
        return None;
    }

    Some((level as u8, clean_heading(rest)))
}

fn clean_heading(text: &str) -> String {
    let text = text.trim().trim_end_matches('#').trim();
    let text = strip_emphasis(text);
    text.trim().trim_end_matches(':').trim().to_string()
}

fn strip_emphasis(text: &str) -> String {
    text.replace("**", "").replace("__", "")
}

fn strip_bullet(line: &str) -> &str {
    for bullet in ["- ", "* ", "+ ", "> "] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return rest.trim();
        }
    }
    line
}
