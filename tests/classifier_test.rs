mod common;

use std::sync::{Arc, atomic::Ordering};

use riffgrade::{
    classifier::{
        Block, DifficultyClassifier, LlmClassifier, build_prompt, parse_classification,
        split_title_artist, to_blocks,
    },
    llm::{CompletionOptions, LlmError},
    types::Difficulty,
};

use common::{FakeLlm, summary};

const WELL_FORMED: &str = "\
# Easy

## Riptide - Vance Joy
Slow strumming over four open chords at a relaxed 100 BPM.

## Wonderwall - Oasis
Capo on 2 and the same few chord shapes throughout.

# Medium

## Hotel California - Eagles
Barre chords in B minor and a long, intricate outro solo.

# Hard

## Through the Fire and Flames - DragonForce
Extremely fast tempo with sweep picking and tapping.

## Eruption - Van Halen
Two-hand tapping and fast legato runs.
Requires a lot of precision.
";

#[test]
fn test_prompt_embeds_instrument_and_tracks() {
    let songs = vec![
        summary("Slow Song", "Quiet Band", 80.0),
        summary("Fast Song", "Loud Band", 160.0),
    ];
    let prompt = build_prompt(&songs, "ukulele");

    assert!(prompt.contains("ukulele"));
    assert!(prompt.contains("\"name\": \"Slow Song\""));
    assert!(prompt.contains("\"artist\": \"Loud Band\""));
    assert!(prompt.contains("\"tempo\": 160.0"));
    assert!(prompt.contains("exactly once"));
    assert!(prompt.contains("## Title - Artist"));

    // Tiers are requested in the fixed order
    let easy = prompt.find("# Easy").unwrap();
    let medium = prompt.find("# Medium").unwrap();
    let hard = prompt.find("# Hard").unwrap();
    assert!(easy < medium && medium < hard);

    // Tracks keep their order in the prompt
    assert!(prompt.find("Slow Song").unwrap() < prompt.find("Fast Song").unwrap());

    // Same input, same prompt
    assert_eq!(prompt, build_prompt(&songs, "ukulele"));
}

#[test]
fn test_to_blocks() {
    let blocks = to_blocks("```markdown\n# **Easy**:\n\n## Song - Artist\n- Simple chords.\n```\n");
    assert_eq!(
        blocks,
        vec![
            Block::Heading {
                level: 1,
                text: "Easy".to_string()
            },
            Block::Heading {
                level: 2,
                text: "Song - Artist".to_string()
            },
            Block::Text("Simple chords.".to_string()),
        ]
    );

    // "#tag" is not a heading
    assert_eq!(to_blocks("#tag"), vec![Block::Text("#tag".to_string())]);
}

#[test]
fn test_parse_well_formed_response() {
    let result = parse_classification(WELL_FORMED);

    assert_eq!(result.len(), 5);
    assert_eq!(result.tier(Difficulty::Easy).len(), 2);
    assert_eq!(result.tier(Difficulty::Medium).len(), 1);
    assert_eq!(result.tier(Difficulty::Hard).len(), 2);

    let riptide = &result.tier(Difficulty::Easy)[0];
    assert_eq!(riptide.title, "Riptide");
    assert_eq!(riptide.artist, "Vance Joy");
    assert_eq!(riptide.difficulty, Difficulty::Easy);
    assert!(riptide.rationale.starts_with("Slow strumming"));

    // Multi-line rationale is joined
    let eruption = &result.tier(Difficulty::Hard)[1];
    assert_eq!(
        eruption.rationale,
        "Two-hand tapping and fast legato runs. Requires a lot of precision."
    );

    // Each song lands in exactly one tier
    let mut titles: Vec<&str> = result.entries().map(|e| e.title.as_str()).collect();
    titles.sort();
    titles.dedup();
    assert_eq!(titles.len(), 5);
}

#[test]
fn test_parse_empty_and_malformed() {
    for input in [
        "",
        "   \n\n",
        "I'm sorry, I can't help with that.",
        "## Orphan Song - Nobody\nNo tier above me.",
        "# Summary\n## Song - Artist\nText",
    ] {
        let result = parse_classification(input);
        assert!(result.is_empty(), "expected no entries for {:?}", input);
        for difficulty in Difficulty::ALL {
            assert!(result.tier(difficulty).is_empty());
        }
    }
}

#[test]
fn test_parse_empty_tier() {
    let result = parse_classification("# Easy\n## A - B\nFine.\n# Medium\n# Hard\n## C - D\nTough.");
    assert_eq!(result.tier(Difficulty::Easy).len(), 1);
    assert!(result.tier(Difficulty::Medium).is_empty());
    assert_eq!(result.tier(Difficulty::Hard).len(), 1);
}

#[test]
fn test_parse_drops_duplicates_within_tier() {
    let text = "# Easy\n## Song - Artist\nOne.\n## song - artist\nTwo.\n# Hard\n## Song - Artist\nThree.";
    let result = parse_classification(text);

    assert_eq!(result.tier(Difficulty::Easy).len(), 1);
    assert_eq!(result.tier(Difficulty::Easy)[0].rationale, "One.");
    assert_eq!(result.tier(Difficulty::Hard).len(), 1);
}

#[test]
fn test_parse_with_preamble_and_summary() {
    let text = "\
# Guitar Difficulty Analysis
Here is my analysis.

## Easy Songs
### 1. Song A - Artist A
Simple.

## Medium Difficulty
### Song B - Artist B
Moderate.

## Hard
### Song C - Artist C
#### Technique notes
Fast alternate picking.

## Final Thoughts
### Practice Tip - Me
Start slow.
";
    let result = parse_classification(text);

    assert_eq!(result.len(), 3);
    assert_eq!(result.tier(Difficulty::Easy)[0].title, "Song A");
    assert_eq!(result.tier(Difficulty::Medium)[0].artist, "Artist B");

    // Deeper headings fold into the rationale
    assert_eq!(
        result.tier(Difficulty::Hard)[0].rationale,
        "Technique notes Fast alternate picking."
    );
}

#[test]
fn test_parse_song_named_like_a_tier() {
    let text = "# Easy\n## Hard Times - Paramore\nUpbeat but simple chords.\n## Hard to Handle\nNo artist given.";
    let result = parse_classification(text);

    let easy = result.tier(Difficulty::Easy);
    assert_eq!(easy.len(), 2);
    assert_eq!(easy[0].title, "Hard Times");
    assert_eq!(easy[1].title, "Hard to Handle");
    assert_eq!(easy[1].artist, "");
    assert!(result.tier(Difficulty::Hard).is_empty());
}

#[test]
fn test_parse_tier_headings_with_subtitles() {
    let text = "\
# Easy - Beginner Friendly
## Slow Song - Quiet Band
Open chords at 80 BPM.
# Medium - Some Practice
## Mid Song - Middle Band
A couple of barre chords.
# Hard - Advanced
## Fast Song - Loud Band
Fast alternate picking.
";
    let result = parse_classification(text);

    assert_eq!(result.len(), 3);
    assert_eq!(result.tier(Difficulty::Easy)[0].title, "Slow Song");
    assert_eq!(result.tier(Difficulty::Medium)[0].title, "Mid Song");
    assert_eq!(result.tier(Difficulty::Hard)[0].title, "Fast Song");
}

#[test]
fn test_parse_subtitled_tier_after_plain_ones() {
    let text = "# Easy\n## Slow Song - Quiet Band\nSimple.\n# Medium\n# Hard – Advanced Players\n## Fast Song - Loud Band\nQuick.";
    let result = parse_classification(text);

    assert_eq!(result.tier(Difficulty::Easy).len(), 1);
    assert!(result.tier(Difficulty::Medium).is_empty());
    assert_eq!(result.tier(Difficulty::Hard).len(), 1);
    assert_eq!(result.tier(Difficulty::Hard)[0].artist, "Loud Band");
}

#[test]
fn test_parse_decorated_tier_headings() {
    let text = "\
Here you go!
# 🎸 Guitar Difficulty - Your Top Tracks
## 🟢 **Easy Songs**:
### Slow Song - Quiet Band
Simple.
## 🟡 Medium Difficulty – Needs Practice
### Mid Song - Middle Band
Barre chords.
## 🔴 Hard (Advanced)
### Fast Song - Loud Band
Sweep picking.
";
    let result = parse_classification(text);

    assert_eq!(result.len(), 3);
    assert_eq!(result.tier(Difficulty::Easy)[0].title, "Slow Song");
    assert_eq!(result.tier(Difficulty::Medium)[0].title, "Mid Song");
    assert_eq!(result.tier(Difficulty::Hard)[0].title, "Fast Song");
}

#[test]
fn test_parse_deeper_heading_continues_rationale() {
    let text = "\
# Easy
### Slow Song - Quiet Band
Relaxed tempo.
## Other Song - Band
Two chords.
### Technique
Strumming only.
";
    let result = parse_classification(text);

    let easy = result.tier(Difficulty::Easy);
    let titles: Vec<&str> = easy.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Slow Song", "Other Song"]);
    assert_eq!(easy[1].rationale, "Two chords. Technique Strumming only.");
}

#[test]
fn test_split_title_artist() {
    assert_eq!(split_title_artist("Song - Artist"), ("Song", "Artist"));
    assert_eq!(
        split_title_artist("Song - 2011 Remaster - Artist"),
        ("Song - 2011 Remaster", "Artist")
    );
    assert_eq!(split_title_artist("Song – Artist"), ("Song", "Artist"));
    assert_eq!(split_title_artist("Just A Title"), ("Just A Title", ""));
}

#[tokio::test]
async fn test_classifier_calls_model_once() {
    let llm = Arc::new(FakeLlm::answering(WELL_FORMED));
    let classifier = LlmClassifier::new(llm.clone(), CompletionOptions::default());

    let songs = vec![summary("Riptide", "Vance Joy", 100.0)];
    let result = classifier.classify(&songs, "guitar").await.unwrap();

    assert_eq!(result.len(), 5);
    assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    assert!(llm.prompts.lock().unwrap()[0].contains("Riptide"));
}

#[tokio::test]
async fn test_classifier_skips_model_without_tracks() {
    let llm = Arc::new(FakeLlm::answering(WELL_FORMED));
    let classifier = LlmClassifier::new(llm.clone(), CompletionOptions::default());

    let result = classifier.classify(&[], "guitar").await.unwrap();

    assert!(result.is_empty());
    assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_classifier_propagates_model_errors() {
    let llm = Arc::new(FakeLlm::failing("quota exceeded"));
    let classifier = LlmClassifier::new(llm, CompletionOptions::default());

    let songs = vec![summary("Song", "Artist", 120.0)];
    let err = classifier.classify(&songs, "guitar").await.unwrap_err();

    assert!(matches!(err, LlmError::Connection(ref m) if m == "quota exceeded"));
}
