//! Integration tests for the CV enhancer

use cv_enhancer::config::{Config, OutputFormat};
use cv_enhancer::cv::model::FieldRef;
use cv_enhancer::cv::store::{load_cv, save_cv};
use cv_enhancer::diff::{compute_diff, DiffStats, Span, SpanKind};
use cv_enhancer::enhance::enhancer::{Enhancer, EnhancementRequest};
use cv_enhancer::enhance::prompts::{EnhanceField, EnhancementContext};
use cv_enhancer::output::RendererSet;
use std::path::Path;
use tempfile::TempDir;

fn fixture_cv_path() -> &'static Path {
    Path::new("tests/fixtures/sample_cv.json")
}

#[test]
fn test_load_fixture_cv() {
    let cv = load_cv(fixture_cv_path()).unwrap();

    assert_eq!(cv.personal_info.full_name, "Selam Tesfaye");
    assert_eq!(cv.experience.len(), 1);
    assert!(cv.experience[0].description.contains("Worked on"));
    assert_eq!(cv.skills.len(), 2);
}

#[test]
fn test_field_ref_addresses_fixture_fields() {
    let cv = load_cv(fixture_cv_path()).unwrap();

    let summary = FieldRef::Summary.get(&cv).unwrap();
    assert!(summary.contains("worked on several research projects"));

    let experience = FieldRef::ExperienceDescription(0).get(&cv).unwrap();
    assert!(experience.contains("network monitoring dashboards"));

    assert!(FieldRef::EducationDescription(5).get(&cv).is_err());
}

#[tokio::test]
async fn test_offline_enhancement_produces_reviewable_diff() {
    let cv = load_cv(fixture_cv_path()).unwrap();
    let original = FieldRef::ExperienceDescription(0).get(&cv).unwrap().to_string();

    let enhancer = Enhancer::offline(&Config::default()).unwrap();
    let request = EnhancementRequest {
        field: EnhanceField::Experience,
        content: original.clone(),
        context: EnhancementContext::default(),
    };

    let enhancement = enhancer.enhance(&request).await;

    assert!(enhancement.enhanced.contains("spearheaded"));
    assert!(enhancement.enhanced.contains("facilitated"));
    assert!(enhancement.enhanced.contains("critical"));

    let spans = compute_diff(&enhancement.original, &enhancement.enhanced);

    // The enhanced text is reproducible from the unchanged and inserted spans
    let rebuilt: Vec<&str> = spans
        .iter()
        .filter(|span| span.kind != SpanKind::Removed)
        .map(|span| span.text.as_str())
        .collect();
    let enhanced_tokens: Vec<&str> = enhancement.enhanced.split_whitespace().collect();
    assert_eq!(rebuilt, enhanced_tokens);

    let stats = DiffStats::from_spans(&spans);
    assert!(stats.inserted > 0);
    assert!(stats.removed > 0);
    assert!(stats.unchanged > 0);
}

#[tokio::test]
async fn test_enhance_and_apply_roundtrip() {
    let dir = TempDir::new().unwrap();
    let cv_path = dir.path().join("cv.json");

    let mut cv = load_cv(fixture_cv_path()).unwrap();
    save_cv(&cv_path, &cv).unwrap();

    let enhancer = Enhancer::offline(&Config::default()).unwrap();
    let field_ref = FieldRef::Summary;
    let request = EnhancementRequest {
        field: EnhanceField::Summary,
        content: field_ref.get(&cv).unwrap().to_string(),
        context: EnhancementContext {
            target_program: Some("MSc Robotics at TU Delft".to_string()),
            ..Default::default()
        },
    };

    let enhancement = enhancer.enhance(&request).await;
    field_ref.set(&mut cv, enhancement.enhanced.clone()).unwrap();
    cv.touch();
    save_cv(&cv_path, &cv).unwrap();

    let reloaded = load_cv(&cv_path).unwrap();
    let summary = FieldRef::Summary.get(&reloaded).unwrap();

    assert!(summary.contains("spearheaded"));
    assert!(summary.contains("MSc Robotics at TU Delft"));
    assert_ne!(reloaded.last_modified, "2025-05-12T09:30:00Z");
}

#[tokio::test]
async fn test_failed_enhancement_renders_all_unchanged() {
    // An enhancement that returns the original text verbatim (the API
    // failure contract) must produce a diff with no highlights.
    let original = "Led the data migration project.";
    let spans = compute_diff(original, original);

    assert!(spans.iter().all(|span| span.kind == SpanKind::Unchanged));

    let stats = DiffStats::from_spans(&spans);
    assert_eq!(stats.inserted, 0);
    assert_eq!(stats.removed, 0);
    assert_eq!(stats.similarity(), 1.0);
}

#[test]
fn test_fixture_summary_diff_rendering() {
    let original = std::fs::read_to_string("tests/fixtures/summary.txt").unwrap();
    let enhanced = original
        .replace("worked on", "spearheaded")
        .replace("helped", "facilitated");

    let spans = compute_diff(&original, &enhanced);
    let renderers = RendererSet::with_options(false, false, false, false);

    let plain = renderers.render(&spans, &OutputFormat::Plain).unwrap();
    assert!(plain.contains("[-worked-]"));
    assert!(plain.contains("{+spearheaded+}"));

    let markdown = renderers.render(&spans, &OutputFormat::Markdown).unwrap();
    assert!(markdown.contains("~~worked~~"));
    assert!(markdown.contains("**spearheaded**"));

    let json = renderers.render(&spans, &OutputFormat::Json).unwrap();
    let parsed: Vec<Span> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, spans);

    let html = renderers.render(&spans, &OutputFormat::Html).unwrap();
    assert!(html.contains("<span class=\"added\">spearheaded </span>"));
    assert!(html.contains("<span class=\"removed\">worked </span>"));
}

#[test]
fn test_config_roundtrip_in_tempdir() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::load_from(&path).unwrap();
    assert!(path.exists());

    config.diff.lookahead = 5;
    config.output.format = OutputFormat::Markdown;
    config.save_to(&path).unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.diff.lookahead, 5);
    assert_eq!(reloaded.output.format, OutputFormat::Markdown);
}
