//! Tests for batch generation and editing.

use super::*;
use crate::config::AgentConfig;
use crate::test_support::{ScriptedProvider, card_json, sample_config};
use std::fs;
use tempfile::TempDir;

fn topics(pairs: &[(&str, Option<&str>)]) -> TopicMap {
    pairs
        .iter()
        .map(|(t, c)| (t.to_string(), c.map(str::to_string)))
        .collect()
}

fn generator(provider: ScriptedProvider) -> CardGenerator<ScriptedProvider> {
    CardGenerator::new(sample_config("gpt-4o"), None, provider).unwrap()
}

fn editor(provider: ScriptedProvider) -> CardEditor<ScriptedProvider> {
    let config = AgentConfig::from_yaml(
        "model: gpt-4o\nsystem_prompt: \"Edit to {word_limit} words.\"\ngenerator_retries: 0\n",
    )
    .unwrap();
    CardEditor::new(config, None, 40, provider).unwrap()
}

fn md_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".md"))
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_generate_batch_visits_topics_in_order() {
    let temp = TempDir::new().unwrap();
    let provider = ScriptedProvider::new()
        .respond(card_json("Zeta / Social"))
        .respond(card_json("Alpha / Legal"))
        .respond(card_json("Mid / Economic"));
    let g = generator(provider);
    let map = topics(&[
        ("Zeta", Some("Social")),
        ("Alpha", Some("Legal")),
        ("Mid", Some("Economic")),
    ]);
    let mut seen = Vec::new();

    let items = generate_batch(&g, "Fintech", &map, 25, temp.path(), |item| {
        seen.push((item.sequence, item.card_identifier.clone()))
    })
    .await
    .unwrap();

    assert_eq!(
        g.binding().provider().prompts(),
        vec![
            "Fintech|Zeta|Social|25",
            "Fintech|Alpha|Legal|25",
            "Fintech|Mid|Economic|25",
        ]
    );
    assert_eq!(items.len(), 3);
    assert_eq!(
        seen,
        vec![
            (1, "Zeta / Social".to_string()),
            (2, "Alpha / Legal".to_string()),
            (3, "Mid / Economic".to_string()),
        ]
    );
    assert_eq!(
        md_files(temp.path()),
        vec!["alpha_legal.md", "mid_economic.md", "zeta_social.md"]
    );
    assert_eq!(items[0].file_name, "zeta_social.md");
    assert!(items.iter().all(|i| i.source.is_none()));
}

#[tokio::test]
async fn test_generate_batch_stops_at_first_failure() {
    let temp = TempDir::new().unwrap();
    let provider = ScriptedProvider::new()
        .respond(card_json("One / Social"))
        .fail("HTTP 503")
        .respond(card_json("Three / Legal"));
    let g = generator(provider);
    let map = topics(&[
        ("One", Some("Social")),
        ("Two", Some("Technical")),
        ("Three", Some("Legal")),
    ]);
    let mut reported = 0;

    let err = generate_batch(&g, "Fintech", &map, 40, temp.path(), |_| reported += 1)
        .await
        .unwrap_err();

    assert!(matches!(err, TrendCardError::Provider(_)));
    assert_eq!(g.binding().provider().requests().len(), 2);
    assert_eq!(reported, 1);
    assert_eq!(md_files(temp.path()), vec!["one_social.md"]);
}

#[tokio::test]
async fn test_generate_batch_schema_failure_aborts_remaining_items() {
    let temp = TempDir::new().unwrap();
    let mut config = sample_config("gpt-4o");
    config.generator_retries = Some(1);
    let provider = ScriptedProvider::new()
        .respond("{}")
        .respond("still not a card")
        .respond(card_json("Never / Reached"));
    let g = CardGenerator::new(config, None, provider).unwrap();
    let map = topics(&[("First", Some("Social")), ("Second", Some("Legal"))]);

    let err = generate_batch(&g, "Fintech", &map, 40, temp.path(), |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, TrendCardError::SchemaValidation { attempts: 2, .. }));
    assert_eq!(g.binding().provider().requests().len(), 2);
    assert!(md_files(temp.path()).is_empty());
}

#[tokio::test]
async fn test_generate_batch_open_component() {
    let temp = TempDir::new().unwrap();
    let g = generator(ScriptedProvider::new().respond(card_json("Open / Technical")));
    let map = topics(&[("Open", None)]);

    generate_batch(&g, "Fintech", &map, 40, temp.path(), |_| {})
        .await
        .unwrap();

    let prompt = &g.binding().provider().prompts()[0];
    assert!(prompt.contains(crate::generator::UNSPECIFIED_COMPONENT));
}

#[tokio::test]
async fn test_generate_batch_empty_map() {
    let temp = TempDir::new().unwrap();
    let g = generator(ScriptedProvider::new());

    let items = generate_batch(&g, "Fintech", &[], 40, temp.path(), |_| {})
        .await
        .unwrap();

    assert!(items.is_empty());
    assert!(g.binding().provider().requests().is_empty());
}

#[tokio::test]
async fn test_edit_batch_reads_in_order_and_appends_suffix() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let first = input.path().join("first.md");
    let second = input.path().join("second.md");
    fs::write(&first, "first card text").unwrap();
    fs::write(&second, "second card text").unwrap();
    let provider = ScriptedProvider::new()
        .respond(card_json("Gen Z / Social"))
        .respond(card_json("Embedded Finance / Economic"));
    let e = editor(provider);
    let mut counts = Vec::new();

    let items = edit_batch(
        &e,
        &[first.clone(), second.clone()],
        output.path(),
        "edited",
        |item| counts.push(item.word_counts.get("description")),
    )
    .await
    .unwrap();

    assert_eq!(
        e.binding().provider().prompts(),
        vec!["first card text", "second card text"]
    );
    assert_eq!(
        md_files(output.path()),
        vec!["embedded_finance_economic_edited.md", "gen_z_social_edited.md"]
    );
    assert_eq!(items[0].source.as_deref(), Some(first.as_path()));
    assert_eq!(items[1].sequence, 2);
    assert_eq!(counts, vec![Some(4), Some(4)]);
}

#[tokio::test]
async fn test_edit_batch_missing_file_aborts() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let present = input.path().join("present.md");
    let last = input.path().join("last.md");
    fs::write(&present, "text").unwrap();
    fs::write(&last, "text").unwrap();
    let provider = ScriptedProvider::new()
        .respond(card_json("Present / Social"))
        .respond(card_json("Last / Legal"));
    let e = editor(provider);
    let files = vec![present, input.path().join("missing.md"), last];

    let err = edit_batch(&e, &files, output.path(), "edited", |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, TrendCardError::Filesystem(_)));
    assert_eq!(e.binding().provider().requests().len(), 1);
    assert_eq!(md_files(output.path()), vec!["present_social_edited.md"]);
}

#[test]
fn test_parse_topic_map_preserves_order() {
    let yaml = "Zeta: Social\nAlpha: Legal\nQuantum-Safe Payments: ~\n2030 Outlook: Economic\n";

    let map = parse_topic_map(yaml).unwrap();

    assert_eq!(
        map,
        topics(&[
            ("Zeta", Some("Social")),
            ("Alpha", Some("Legal")),
            ("Quantum-Safe Payments", None),
            ("2030 Outlook", Some("Economic")),
        ])
    );
}

#[test]
fn test_parse_topic_map_empty_document() {
    assert!(parse_topic_map("").unwrap().is_empty());
}

#[test]
fn test_parse_topic_map_rejects_sequence() {
    let err = parse_topic_map("- Zeta\n- Alpha\n").unwrap_err();
    assert!(err.to_string().contains("mapping"));
}

#[test]
fn test_parse_topic_map_rejects_nested_component() {
    let err = parse_topic_map("Zeta:\n  nested: true\n").unwrap_err();
    assert!(err.to_string().contains("Zeta"));
}

#[test]
fn test_load_topic_map_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("topics.yaml");
    fs::write(&path, "Embedded Finance: Economic\n").unwrap();

    let map = load_topic_map(&path).unwrap();

    assert_eq!(map, topics(&[("Embedded Finance", Some("Economic"))]));
}
