//! HTML pages.
//!
//! Every piece of text that did not originate in this file (model output,
//! track names, query parameters, error causes) goes through
//! [`utils::escape_html`]. The pages carry no script; tiers expand and
//! collapse with `<details>`.

use axum::http::StatusCode;

use crate::{
    types::{AnalysisOutcome, Classification, ClassificationEntry, Difficulty},
    utils::{self, escape_html},
};

const STYLE: &str = r#"
body {
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    max-width: 900px;
    margin: 30px auto;
    padding: 20px;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    min-height: 100vh;
}
.container {
    background: white;
    padding: 40px;
    border-radius: 10px;
    box-shadow: 0 10px 40px rgba(0,0,0,0.2);
}
h1 { color: #333; margin-bottom: 10px; }
.subtitle { color: #666; margin-bottom: 30px; }
.btn {
    background: #1DB954;
    color: white;
    padding: 12px 26px;
    border: none;
    border-radius: 25px;
    font-size: 16px;
    text-decoration: none;
    display: inline-block;
    font-weight: bold;
    cursor: pointer;
}
.btn:hover { background: #1ed760; }
.back-btn { background: #667eea; border-radius: 5px; }
.back-btn:hover { background: #5568d3; }
details.tier { margin: 18px 0; border-radius: 8px; border: 1px solid #ddd; }
details.tier summary { padding: 12px 16px; font-size: 20px; font-weight: bold; cursor: pointer; }
details.easy summary { background: #e6f7ec; color: #1b7a3d; }
details.medium summary { background: #fff5e0; color: #9a6400; }
details.hard summary { background: #fde8e8; color: #a52828; }
.count { font-weight: normal; color: #666; font-size: 16px; }
.song { padding: 10px 16px; border-top: 1px solid #eee; }
.song h3 { margin: 0 0 4px 0; color: #333; font-size: 17px; }
.song .artist { color: #777; font-weight: normal; }
.song p { margin: 0; color: #444; line-height: 1.6; }
.empty { padding: 10px 16px; color: #999; font-style: italic; }
.notice { padding: 16px; background: #fff5e0; border-radius: 8px; color: #6b4a00; white-space: pre-wrap; }
form.rerun { margin: 24px 0; }
form.rerun input[type=text] { padding: 8px; font-size: 15px; border-radius: 5px; border: 1px solid #ccc; }
"#;

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
    <div class="container">
{body}
    </div>
</body>
</html>
"#,
        title = escape_html(title),
        style = STYLE,
        body = body,
    )
}

/// Landing page with the login link.
pub fn render_landing() -> String {
    page(
        "riffgrade",
        r#"        <h1>🎸 riffgrade</h1>
        <p class="subtitle">Find out which songs from your Spotify are easy to play on your instrument.</p>
        <a href="/login" class="btn">Login with Spotify</a>"#,
    )
}

/// Analysis results, or the reason there are none.
///
/// `session_id` feeds the form that re-runs the analysis for another
/// instrument; without it the form is left out.
pub fn render_analysis(outcome: &AnalysisOutcome, instrument: &str, session_id: Option<&str>) -> String {
    let heading = format!("Your {}-Friendly Songs", utils::title_case(instrument));
    let mut body = format!("        <h1>🎸 {}</h1>\n", escape_html(&heading));

    match outcome {
        AnalysisOutcome::Classified(classification) if classification.is_empty() => {
            body.push_str(
                r#"        <div class="notice">No songs could be classified. Listen to a few more tracks on Spotify and try again.</div>"#,
            );
            body.push('\n');
        }
        AnalysisOutcome::Classified(classification) => {
            body.push_str(&format!(
                "        <p class=\"subtitle\">{} songs sorted by how hard they are to play.</p>\n",
                classification.len()
            ));
            body.push_str(&render_tiers(classification));
        }
        AnalysisOutcome::Failed(message) => {
            body.push_str(&format!(
                "        <div class=\"notice\">{}</div>\n",
                escape_html(message)
            ));
        }
    }

    if let Some(session_id) = session_id {
        body.push_str(&format!(
            r#"        <form class="rerun" method="get" action="/analyze">
            <input type="hidden" name="session_id" value="{session_id}">
            <label>Try another instrument: <input type="text" name="instrument" value="{instrument}" maxlength="40"></label>
            <button type="submit" class="btn">Analyze</button>
        </form>
"#,
            session_id = escape_html(session_id),
            instrument = escape_html(instrument),
        ));
    }

    body.push_str(r#"        <a href="/" class="btn back-btn">← Start Over</a>"#);
    page(&heading, &body)
}

fn render_tiers(classification: &Classification) -> String {
    let mut out = String::new();
    for difficulty in Difficulty::ALL {
        let entries = classification.tier(difficulty);
        let class = difficulty.as_str().to_lowercase();
        // non-empty tiers start expanded
        let open = if entries.is_empty() { "" } else { " open" };

        out.push_str(&format!(
            "        <details class=\"tier {class}\" id=\"tier-{class}\"{open}>\n            <summary>{name} <span class=\"count\">({count})</span></summary>\n",
            class = class,
            open = open,
            name = difficulty.as_str(),
            count = entries.len(),
        ));

        if entries.is_empty() {
            out.push_str("            <div class=\"empty\">No songs in this tier.</div>\n");
        }
        for entry in entries {
            out.push_str(&render_entry(entry));
        }

        out.push_str("        </details>\n");
    }
    out
}

fn render_entry(entry: &ClassificationEntry) -> String {
    let artist = if entry.artist.is_empty() {
        String::new()
    } else {
        format!(" <span class=\"artist\">– {}</span>", escape_html(&entry.artist))
    };

    format!(
        "            <div class=\"song\">\n                <h3>{title}{artist}</h3>\n                <p>{rationale}</p>\n            </div>\n",
        title = escape_html(&entry.title),
        artist = artist,
        rationale = escape_html(&entry.rationale),
    )
}

/// Error page for rejected or failed requests.
pub fn render_error(status: StatusCode, message: &str) -> String {
    let title = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    let body = format!(
        r#"        <h1>{title}</h1>
        <div class="notice">{message}</div>
        <p><a href="/" class="btn back-btn">← Start Over</a></p>"#,
        title = escape_html(&title),
        message = escape_html(message),
    );
    page(&title, &body)
}
