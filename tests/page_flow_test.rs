//! Page flow against a mock prediction service.
//!
//! Drives the page view-model the way a front-end does: events in,
//! commands out, commands executed through the real HTTP client.
//!
//! Run: cargo test --test page_flow_test

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use approx::assert_relative_eq;
use httpmock::prelude::*;
use serde_json::json;

use diamond_viz::form::{FormEvent, Phase, ResultView, PREDICTION_FAILED_MESSAGE};
use diamond_viz::grade::Cut;
use diamond_viz::insights::PanelView;
use diamond_viz::model::DataSource;
use diamond_viz::prelude::*;

fn client(base_url: &str) -> HttpClient {
    HttpClient::new(base_url, Duration::from_secs(5)).unwrap()
}

/// Nothing listens on port 1.
fn unreachable_client() -> HttpClient {
    client("http://127.0.0.1:1")
}

/// Apply `event`, run whatever command it yields, and apply the outcome.
fn step(api: &dyn PriceApi, page: &mut Page, event: PageEvent) -> bool {
    match page.apply(event) {
        Some(command) => {
            let outcome = execute(api, &command);
            page.apply(outcome);
            true
        }
        None => false,
    }
}

fn price_text(page: &Page) -> Option<String> {
    match page.form().display() {
        ResultView::Price { text, .. } => Some(text),
        _ => None,
    }
}

// ============================================================================
// Prediction
// ============================================================================

#[test]
fn predict_ideal_one_and_a_half_carat() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/predict")
            .query_param("carat", "1.5")
            .query_param("cut", "Ideal")
            .query_param("color", "E")
            .query_param("clarity", "VS1");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"predicted_price": 8500}));
    });

    let api = client(&server.base_url());
    let mut page = Page::new(42);
    page.apply(PageEvent::Form(FormEvent::EditCarat("1.5".into())));
    page.apply(PageEvent::Form(FormEvent::SelectCut("Ideal".into())));
    page.apply(PageEvent::Form(FormEvent::SelectColor("E".into())));
    page.apply(PageEvent::Form(FormEvent::SelectClarity("VS1".into())));
    assert!(page.form().can_submit());

    assert!(step(&api, &mut page, PageEvent::Form(FormEvent::Submit)));

    mock.assert();
    assert_eq!(page.form().phase(), Phase::Success);
    assert_eq!(price_text(&page).as_deref(), Some("$8,500"));
}

#[test]
fn zero_carat_never_reaches_the_server() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/predict");
        then.status(200).json_body(json!({"predicted_price": 1}));
    });

    let api = client(&server.base_url());
    let mut page = Page::with_fields(42, FormFields::new("0", "Ideal", "E", "VS1"));

    assert!(!page.form().can_submit());
    let errors: Vec<String> = page
        .form()
        .validation()
        .errors()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(errors, vec!["Carat must be greater than 0".to_string()]);

    assert!(!step(&api, &mut page, PageEvent::Form(FormEvent::Submit)));
    mock.assert_hits(0);
    assert_eq!(page.form().display(), ResultView::Placeholder);
}

#[test]
fn server_rejection_shows_generic_message_and_keeps_price() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/predict").query_param("carat", "1");
        then.status(200).json_body(json!({"predicted_price": 12345}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/predict").query_param("carat", "2");
        then.status(422)
            .json_body(json!({"detail": "Model unavailable"}));
    });

    let api = client(&server.base_url());
    let mut page = Page::with_fields(42, FormFields::new("1", "Good", "G", "SI1"));
    step(&api, &mut page, PageEvent::Form(FormEvent::Submit));
    assert_eq!(price_text(&page).as_deref(), Some("$12,345"));

    page.apply(PageEvent::Form(FormEvent::EditCarat("2".into())));
    step(&api, &mut page, PageEvent::Form(FormEvent::Submit));

    assert_eq!(page.form().phase(), Phase::Failed);
    assert_eq!(page.form().error(), Some(PREDICTION_FAILED_MESSAGE));
    assert_eq!(price_text(&page).as_deref(), Some("$12,345"));
}

#[test]
fn unreachable_service_fails_prediction() {
    let api = unreachable_client();
    let mut page = Page::with_fields(42, FormFields::new("0.7", "Premium", "D", "IF"));

    step(&api, &mut page, PageEvent::Form(FormEvent::Submit));

    assert_eq!(page.form().phase(), Phase::Failed);
    assert_eq!(page.form().error(), Some(PREDICTION_FAILED_MESSAGE));
}

#[test]
fn stale_response_is_dropped() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/predict").query_param("carat", "1");
        then.status(200).json_body(json!({"predicted_price": 1000}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/predict").query_param("carat", "3");
        then.status(200).json_body(json!({"predicted_price": 30000}));
    });

    let api = client(&server.base_url());
    let mut page = Page::with_fields(42, FormFields::new("1", "Ideal", "E", "VS1"));

    let first = page.apply(PageEvent::Form(FormEvent::Submit)).unwrap();
    page.apply(PageEvent::Form(FormEvent::EditCarat("3".into())));
    let second = page.apply(PageEvent::Form(FormEvent::Submit)).unwrap();

    // the newer request completes first, then the older one straggles in
    let newer = execute(&api, &second);
    let older = execute(&api, &first);
    page.apply(newer);
    page.apply(older);

    assert_eq!(price_text(&page).as_deref(), Some("$30,000"));
}

// ============================================================================
// Insights
// ============================================================================

#[test]
fn insights_fall_back_when_service_is_down() {
    let api = unreachable_client();
    let mut page = Page::new(7);

    assert!(step(&api, &mut page, PageEvent::ToggleInsights));
    assert_eq!(page.toggle_label(), "Hide Insights");

    let PanelView::Ready { data, source } = page.insights().view() else {
        panic!("insights should be ready");
    };
    assert_eq!(source, DataSource::Fallback);
    assert_eq!(data.carat_data.len(), 100);
    assert_relative_eq!(data.carat_data[0].carat, 0.20, epsilon = 1e-9);
    assert_relative_eq!(data.carat_data[99].carat, 5.15, epsilon = 1e-9);

    let ideal = data
        .cut_data
        .iter()
        .find(|r| r.grade == Cut::Ideal)
        .unwrap();
    assert_relative_eq!(ideal.avg_price, 3458.0);
    assert_eq!(data.color_data.len(), 7);
    assert_eq!(data.clarity_data.len(), 8);
}

#[test]
fn insights_fall_back_on_malformed_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/insights");
        then.status(200)
            .json_body(json!({"caratData": "nope"}));
    });

    let api = client(&server.base_url());
    let mut page = Page::new(7);
    step(&api, &mut page, PageEvent::ToggleInsights);

    let PanelView::Ready { source, .. } = page.insights().view() else {
        panic!("insights should be ready");
    };
    assert_eq!(source, DataSource::Fallback);
}

#[test]
fn live_insights_are_used_and_fetched_once() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/insights");
        then.status(200).json_body(json!({
            "caratData": [{"carat": 0.5, "price": 1500}, {"carat": 1.0, "price": 5200}],
            "cutData": [{"cut": "Very Good", "avgPrice": 3982}],
            "colorData": [{"color": "G", "avgPrice": 3999}],
            "clarityData": [{"clarity": "VS2", "avgPrice": 3925}]
        }));
    });

    let api = client(&server.base_url());
    let mut page = Page::new(7);
    step(&api, &mut page, PageEvent::ToggleInsights);
    step(&api, &mut page, PageEvent::ToggleInsights);
    assert!(!page.insights().is_visible());
    step(&api, &mut page, PageEvent::ToggleInsights);

    mock.assert_hits(1);
    let PanelView::Ready { data, source } = page.insights().view() else {
        panic!("insights should be ready");
    };
    assert_eq!(source, DataSource::Live);
    assert_eq!(data.carat_data.len(), 2);
    assert_eq!(data.cut_data[0].grade, Cut::VeryGood);

    let charts = InsightCharts::new(data);
    let [(_, scatter), (_, cut), _, _] = charts.render_svg();
    assert!(scatter.contains("Carat: 0.5"));
    assert!(cut.contains("Average Price: $3,982"));
}
