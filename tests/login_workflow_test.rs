use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

use dimora_client::infrastructure::browser::{BrowserCookie, MockCall, MockDriver};
use dimora_client::{ClientOptions, Delays, Error, LoginChallenger};

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

fn session_cookie() -> BrowserCookie {
    BrowserCookie {
        name: "JSESSIONID".to_string(),
        value: "abc123".to_string(),
        url: None,
        domain: Some(".dimora.jp".to_string()),
        path: Some("/".to_string()),
        expires: None,
        http_only: Some(true),
        secure: Some(true),
        same_site: None,
    }
}

#[tokio::test]
async fn test_finish_before_start_is_rejected_without_browser_interaction() {
    let driver = Arc::new(MockDriver::new());
    let mut challenger = LoginChallenger::new(driver.clone(), fast_options());

    let result = challenger.finish("user", "pass", "answer").await;

    assert!(matches!(result, Err(Error::NotInitialized(_))));
    assert!(driver.calls().is_empty());
}

#[tokio::test]
async fn test_start_returns_the_captcha_image() {
    let image_bytes = b"fake jpeg bytes".to_vec();
    let data_url = format!("data:image/jpeg;base64,{}", STANDARD.encode(&image_bytes));

    let driver = Arc::new(MockDriver::new());
    driver.push_evaluate(Value::String(data_url));

    let mut challenger = LoginChallenger::new(driver.clone(), fast_options());
    let challenge = challenger.start().await.unwrap();

    assert_eq!(challenge.image(), image_bytes.as_slice());
    assert_eq!(
        driver.calls()[0],
        MockCall::Navigate("https://dimora.jp/login/".to_string())
    );
}

#[tokio::test]
async fn test_start_without_captcha_image_fails() {
    let driver = Arc::new(MockDriver::new());
    driver.push_evaluate(Value::Null);

    let mut challenger = LoginChallenger::new(driver, fast_options());
    let result = challenger.start().await;

    assert!(matches!(result, Err(Error::ElementNotFound(_))));
}

#[tokio::test]
async fn test_finish_captures_the_cookie_jar_as_a_session() {
    let image_bytes = b"img".to_vec();
    let data_url = format!("data:image/jpeg;base64,{}", STANDARD.encode(&image_bytes));

    let driver = Arc::new(MockDriver::new());
    driver.push_evaluate(Value::String(data_url));
    driver.push_evaluate(Value::Bool(true)); // fill form
    driver.push_evaluate(Value::Bool(true)); // submit
    driver.set_cookie_jar(vec![session_cookie()]);

    let mut challenger = LoginChallenger::new(driver.clone(), fast_options());
    challenger.start().await.unwrap();
    let session = challenger.finish("user", "pass", "answer").await.unwrap();

    assert_eq!(session.len(), 1);

    // The captured session round-trips through its serialized form.
    let serialized = session.to_json().unwrap();
    let reparsed = dimora_client::SessionData::from_json(&serialized).unwrap();
    assert_eq!(session, reparsed);

    // The form was filled with the supplied credentials.
    let evaluates = driver.evaluate_calls();
    assert_eq!(evaluates[1].1["loginId"], "user");
    assert_eq!(evaluates[1].1["captchaAnswer"], "answer");
}

#[tokio::test]
async fn test_finish_rejects_an_empty_cookie_jar() {
    let image_bytes = b"img".to_vec();
    let data_url = format!("data:image/jpeg;base64,{}", STANDARD.encode(&image_bytes));

    let driver = Arc::new(MockDriver::new());
    driver.push_evaluate(Value::String(data_url));
    driver.push_evaluate(Value::Bool(true));
    driver.push_evaluate(Value::Bool(true));

    let mut challenger = LoginChallenger::new(driver, fast_options());
    challenger.start().await.unwrap();
    let result = challenger.finish("user", "pass", "answer").await;

    assert!(matches!(result, Err(Error::Submission(_))));
}

#[tokio::test]
async fn test_finish_cannot_be_replayed() {
    let image_bytes = b"img".to_vec();
    let data_url = format!("data:image/jpeg;base64,{}", STANDARD.encode(&image_bytes));

    let driver = Arc::new(MockDriver::new());
    driver.push_evaluate(Value::String(data_url));
    driver.push_evaluate(Value::Bool(true));
    driver.push_evaluate(Value::Bool(true));
    driver.set_cookie_jar(vec![session_cookie()]);

    let mut challenger = LoginChallenger::new(driver, fast_options());
    challenger.start().await.unwrap();
    challenger.finish("user", "pass", "answer").await.unwrap();

    let replay = challenger.finish("user", "pass", "answer").await;
    assert!(matches!(replay, Err(Error::NotInitialized(_))));
}
