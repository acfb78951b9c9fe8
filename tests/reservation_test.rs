use std::sync::Arc;

use serde_json::{json, Value};

use dimora_client::core::time::MockTimeProvider;
use dimora_client::infrastructure::browser::{MockCall, MockDriver};
use dimora_client::{ClientOptions, Delays, DimoraClient, Error, ScheduleFilter, ScheduleItem};

const SESSION_JSON: &str = r#"[{"name":"JSESSIONID","value":"abc123","domain":".dimora.jp","path":"/"}]"#;

fn fast_options() -> ClientOptions {
    ClientOptions {
        delays: Delays {
            login_settle_ms: 10,
            filter_settle_ms: 1,
            results_wait_ms: 1,
            reserve_settle_ms: 1,
            selector_timeout_ms: 100,
        },
        ..ClientOptions::default()
    }
}

/// Runs a search returning exactly one program and hands back its item. The
/// driver's evaluate queue is drained afterwards, ready for the reservation
/// under test.
async fn searched_item(driver: &Arc<MockDriver>) -> ScheduleItem {
    driver.push_evaluate(Value::Bool(true)); // expand
    driver.push_evaluate(Value::Bool(true)); // fill keyword
    driver.push_evaluate(Value::Bool(true)); // submit
    driver.push_evaluate(json!([{
        "title": "ニュース7",
        "url": "program/12345",
        "dateText": "12/23（土）22:00～22:54",
        "broadcasterName": "NHK総合"
    }]));

    let client = DimoraClient::new(driver.clone(), Some(SESSION_JSON), fast_options())
        .unwrap()
        .with_time_provider(Arc::new(MockTimeProvider::fixed(2024, 6, 1)));
    let mut items = client.search(&ScheduleFilter::new("ニュース")).await.unwrap();
    items.remove(0)
}

#[tokio::test]
async fn test_confirmed_reservation_resolves_success() {
    let driver = Arc::new(MockDriver::new());
    let item = searched_item(&driver).await;

    driver.push_evaluate(Value::Bool(true)); // open detail panel
    driver.push_evaluate(Value::Bool(true)); // confirm
    driver.push_evaluate(json!("この番組は予約済みです"));

    item.record_once().await.unwrap();

    // The reservation navigated to the item's normalized URL.
    assert!(driver
        .calls()
        .iter()
        .any(|c| *c == MockCall::Navigate("https://dimora.jp/program/12345".to_string())));
}

#[tokio::test]
async fn test_any_other_confirmation_text_is_a_rejection_carrying_it() {
    let driver = Arc::new(MockDriver::new());
    let item = searched_item(&driver).await;

    driver.push_evaluate(Value::Bool(true));
    driver.push_evaluate(Value::Bool(true));
    driver.push_evaluate(json!("録画機器と通信できませんでした"));

    let result = item.record_once().await;

    match result {
        Err(Error::ReservationRejected(text)) => {
            assert_eq!(text, "録画機器と通信できませんでした");
        }
        other => panic!("expected ReservationRejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_detail_button_fails_the_reservation() {
    let driver = Arc::new(MockDriver::new());
    let item = searched_item(&driver).await;

    driver.push_evaluate(Value::Bool(false)); // detail button absent

    let result = item.record_once().await;
    assert!(matches!(result, Err(Error::Reservation(_))));
}

#[tokio::test]
async fn test_missing_confirmation_element_fails_the_reservation() {
    let driver = Arc::new(MockDriver::new());
    let item = searched_item(&driver).await;

    driver.push_evaluate(Value::Bool(true));
    driver.push_evaluate(Value::Bool(true));
    driver.with_missing_selector("#reservedEtcText");

    let result = item.record_once().await;
    assert!(matches!(result, Err(Error::Reservation(_))));
}

#[tokio::test]
async fn test_evaluation_fault_surfaces_as_a_reservation_error() {
    let driver = Arc::new(MockDriver::new());
    let item = searched_item(&driver).await;

    driver.push_evaluate_error("execution context was destroyed");

    let result = item.record_once().await;
    assert!(matches!(result, Err(Error::Reservation(_))));
}
