//! End-to-end tests for teaser rendering.
//!
//! Uses a realistic post and site settings from `tests/fixtures/`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;

use newsdesk_excerpt::byline::{byline, BylineOptions};
use newsdesk_excerpt::config::CleanRead;
use newsdesk_excerpt::excerpt::{excerpt_source, ExcerptSource};
use newsdesk_excerpt::social::social_links;
use newsdesk_excerpt::{build_excerpt, split_sentences, trim_to_sentences, Post, Settings, View};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_post() -> Post {
    let path = fixture_path("post.yaml");
    let yaml = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e));
    Post::from_yaml(&yaml).expect("Failed to parse post fixture")
}

fn load_settings() -> Settings {
    Settings::load(&fixture_path("settings.yaml")).expect("Failed to parse settings fixture")
}

const FIRST: &str = "The city council voted 7-2 on Tuesday to approve a $40 million transit plan.";
const SECOND: &str = "Mayor Dr. Lena Ortiz called it \"a turning point.\"";
const THIRD: &str = "Critics, led by Sen. Mark D. Hill, said the U.S. Department of Transportation had not yet committed funds.";

#[test]
fn test_sentences_survive_abbreviations_and_shortcodes() {
    let post = load_post();
    assert_eq!(trim_to_sentences(&post.content, 3), format!("{FIRST} {SECOND} {THIRD}"));
}

#[test]
fn test_archive_excerpt_uses_configured_sentence_count() {
    let post = load_post();
    let settings = load_settings();

    assert_eq!(
        build_excerpt(&post, &settings.excerpt, View::Archive),
        format!(
            r#"<p>{FIRST} {SECOND} <a href="https://news.example/2024/03/transit-plan">Read more</a></p>"#
        )
    );
}

#[test]
fn test_home_excerpt_uses_more_marker() {
    let post = load_post();
    let settings = load_settings();

    let (source, _) = excerpt_source(&post, &settings.excerpt, View::Home);
    assert_eq!(source, ExcerptSource::MoreTag);
    assert_eq!(
        build_excerpt(&post, &settings.excerpt, View::Home),
        format!(
            r#"<p>{FIRST} {SECOND} {THIRD} <a href="https://news.example/2024/03/transit-plan#more-1207" class="more-link">Read more</a></p>"#
        )
    );
}

#[test]
fn test_excerpt_never_contains_markup_remnants() {
    let post = load_post();
    let settings = load_settings();

    for view in [View::Home, View::Archive, View::Single] {
        let html = build_excerpt(&post, &settings.excerpt, view);
        assert!(!html.contains("caption"), "shortcode leaked in {view:?}: {html}");
        assert!(!html.contains("<img"), "tag leaked in {view:?}: {html}");
        assert!(!html.contains("<!--"), "comment leaked in {view:?}: {html}");
    }
}

#[test]
fn test_full_content_sentence_count() {
    let post = load_post();
    let clean = newsdesk_excerpt::markup::clean_text(&post.content);
    let sentences = split_sentences(&clean);
    assert_eq!(sentences.len(), 5);
    assert_eq!(sentences[4], "Construction starts in June.");
}

#[test]
fn test_byline_with_coauthors() {
    let post = load_post();
    let settings = load_settings();
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();

    let options = BylineOptions {
        exclude_date: false,
        view: View::Single,
        clean_read: settings.clean_read,
    };
    let html = byline(&post, options, now);

    assert!(html.contains(r#"rel="author">Ann Reporter</a> <span class="and">and</span> <a"#));
    assert!(html.contains("Bo Writer (Wire Service)</a>"));
    assert!(html.contains(r#"<span class="time-ago">30 mins ago</span>"#));
    assert!(html.contains("Edit This Post"));
    assert!(html.ends_with(r##"<a href="#" class="clean-read">View as "Clean Read"</a>"##));
}

#[test]
fn test_byline_for_old_post_shows_date() {
    let post = load_post();
    let now = post.published + Duration::days(3);
    let options = BylineOptions {
        clean_read: CleanRead::Disabled,
        ..BylineOptions::default()
    };
    assert!(byline(&post, options, now).contains(">March 1, 2024</time>"));
}

#[test]
fn test_social_bar_from_settings() {
    let post = load_post();
    let settings = load_settings();
    let html = social_links(&post, &settings.social);

    assert!(html.contains(r#"data-via="newsdesk""#));
    assert!(html.contains(r#"data-related="annreports:Follow the author of this article""#));
    assert!(html.contains(r#"data-count="none""#));
    assert!(html.contains(r#"action="like""#));
    assert!(html.contains("window.print()"));
    assert!(!html.contains("st_email"));
}
