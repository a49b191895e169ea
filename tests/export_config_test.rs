//! HTML export and configuration loading from disk.
//!
//! Run: cargo test --test export_config_test

#![allow(clippy::unwrap_used)]

use std::io::Write;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use tempfile::NamedTempFile;

use diamond_viz::config::{ENV_API_URI, ENV_FALLBACK_SEED};
use diamond_viz::form::FormEvent;
use diamond_viz::insights::PanelView;
use diamond_viz::output::{FOOTER_TEXT, PAGE_TITLE};
use diamond_viz::prelude::*;
use diamond_viz::Error;

// ============================================================================
// HTML export
// ============================================================================

#[test]
fn export_page_with_prediction_and_fallback_insights() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/predict");
        then.status(200).json_body(json!({"predicted_price": 8500}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/insights");
        then.status(503);
    });

    let api = HttpClient::new(server.base_url(), Duration::from_secs(5)).unwrap();
    let mut page = Page::with_fields(42, FormFields::new("1.5", "Ideal", "E", "VS1"));
    let predict = page.apply(PageEvent::Form(FormEvent::Submit)).unwrap();
    let outcome = execute(&api, &predict);
    page.apply(outcome);
    let fetch = page.apply(PageEvent::ToggleInsights).unwrap();
    let outcome = execute(&api, &fetch);
    page.apply(outcome);

    let PanelView::Ready { data, source } = page.insights().view() else {
        panic!("insights should be ready");
    };
    let exporter = HtmlExporter::new()
        .prediction(
            page.form().validation().attributes().unwrap(),
            page.form().price().unwrap(),
        )
        .insights(data.clone(), source);

    let file = NamedTempFile::new().unwrap();
    exporter.write_to_file(file.path()).unwrap();
    let html = std::fs::read_to_string(file.path()).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(&format!("<title>{PAGE_TITLE}</title>")));
    assert!(html.contains("$8,500"));
    assert!(html.contains("Understanding the 4 Cs of Diamonds"));
    assert!(html.contains(FOOTER_TEXT));
    assert_eq!(html.matches("<svg").count(), 4);
    // one circle per fallback scatter point
    assert_eq!(html.matches("<circle").count(), 100);
    assert!(html.contains("Average Price: $3,458"));
}

#[test]
fn export_without_prediction_shows_placeholder() {
    let html = HtmlExporter::new().render();
    assert!(html.contains("Enter diamond details and click predict to see the price"));
    assert_eq!(html.matches("<svg").count(), 0);
}

// ============================================================================
// Configuration
// ============================================================================

fn config_file(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[test]
fn config_file_values_are_loaded() {
    let file = config_file(
        "api:\n  base_url: http://models.internal:8080\n  timeout_ms: 2500\ninsights:\n  seed: 9\n  show_on_start: true\nui:\n  vim_keys: false\n",
    );

    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.api.base_url, "http://models.internal:8080");
    assert_eq!(config.timeout(), Duration::from_millis(2500));
    assert_eq!(config.insights.seed, 9);
    assert!(config.insights.show_on_start);
    assert!(!config.ui.vim_keys);
}

#[test]
fn environment_overrides_file() {
    let file = config_file("api:\n  base_url: http://from-file:5000\ninsights:\n  seed: 9\n");
    let mut config = Config::load(file.path()).unwrap();

    config
        .apply_env(|key| match key {
            k if k == ENV_API_URI => Some("https://from-env".to_string()),
            k if k == ENV_FALLBACK_SEED => Some("123".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.api.base_url, "https://from-env");
    assert_eq!(config.insights.seed, 123);
}

#[test]
fn config_parse_error_reports_line() {
    let file = config_file("api:\n  timeout_ms: 100\n  timeout_ms: [oops\n");

    let err = Config::load(file.path()).unwrap_err();

    match err {
        Error::ConfigParse { line, .. } => assert!(line >= 2, "line {line}"),
        other => panic!("expected parse error, got {other}"),
    }
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::resolve(Some(&dir.path().join("absent.yaml"))).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound(_)));
}
