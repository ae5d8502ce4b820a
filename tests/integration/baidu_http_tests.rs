/*!
 * Baidu client against a local stand-in endpoint
 */

use std::time::Duration;

use doc_translate::errors::ProviderError;
use doc_translate::providers::{Baidu, BaiduCredentials, Provider};
use doc_translate::translation::TranslationRequest;

use crate::common::log_capture;
use crate::common::stub_server::{closed_endpoint, StubReply, StubServer};

const APP_ID: &str = "20240001";
const SECRET: &str = "s3cr3t-key-do-not-log";

fn client(endpoint: &str, timeout_secs: u64) -> Baidu {
    let credentials = BaiduCredentials::new(APP_ID, SECRET).expect("credentials");
    Baidu::new(credentials, endpoint, timeout_secs)
}

fn bonjour() -> StubReply {
    StubReply::Json(r#"{"from":"en","to":"fra","trans_result":[{"src":"Hello","dst":"Bonjour"}]}"#.to_string())
}

#[tokio::test]
async fn test_translate_shouldPostSignedForm() {
    let stub = StubServer::start(bonjour()).await;
    let baidu = client(&stub.url, 5);

    let request = TranslationRequest::auto_detect("Hello", "fr").unwrap();
    let translated = baidu.translate(&request).await.unwrap();

    assert_eq!(translated, "Bonjour");

    let forms = stub.forms();
    assert_eq!(forms.len(), 1);
    let form = &forms[0];
    assert_eq!(form["q"], "Hello");
    assert_eq!(form["from"], "auto");
    assert_eq!(form["to"], "fra");
    assert_eq!(form["appid"], APP_ID);
    assert!(form["salt"].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(form["sign"], Baidu::sign(APP_ID, "Hello", &form["salt"], SECRET));
}

#[tokio::test]
async fn test_translate_twice_shouldUseFreshSaltAndSign() {
    log_capture::install();

    let stub = StubServer::start(bonjour()).await;
    let baidu = client(&stub.url, 5);
    let request = TranslationRequest::auto_detect("Hello", "fr").unwrap();

    let first = baidu.translate(&request).await.unwrap();
    let second = baidu.translate(&request).await.unwrap();
    assert_eq!(first, second);

    let forms = stub.forms();
    assert_eq!(forms.len(), 2);
    assert_ne!(forms[0]["salt"], forms[1]["salt"]);
    assert_ne!(forms[0]["sign"], forms[1]["sign"]);

    for form in &forms {
        assert_eq!(form["sign"], Baidu::sign(APP_ID, "Hello", &form["salt"], SECRET));
        assert!(!log_capture::contains(&form["sign"]));
    }
    assert!(!log_capture::contains(SECRET));
}

#[tokio::test]
async fn test_translate_unicodeText_shouldSignUtf8Bytes() {
    let stub = StubServer::start(StubReply::Json(
        r#"{"trans_result":[{"src":"你好","dst":"Hello"}]}"#.to_string(),
    ))
    .await;
    let baidu = client(&stub.url, 5);

    let request = TranslationRequest::auto_detect("你好", "en").unwrap();
    assert_eq!(baidu.translate(&request).await.unwrap(), "Hello");

    let form = &stub.forms()[0];
    assert_eq!(form["q"], "你好");
    assert_eq!(form["sign"], Baidu::sign(APP_ID, "你好", &form["salt"], SECRET));
}

#[tokio::test]
async fn test_translate_apiError_shouldCarryCodeAndMessage() {
    let stub = StubServer::start(StubReply::Json(
        r#"{"error_code":"54001","error_msg":"Invalid Sign"}"#.to_string(),
    ))
    .await;
    let baidu = client(&stub.url, 5);

    let request = TranslationRequest::auto_detect("Hello", "fr").unwrap();
    let err = baidu.translate(&request).await.unwrap_err();

    assert!(matches!(
        err,
        ProviderError::ApiError { ref code, ref message } if code == "54001" && message == "Invalid Sign"
    ));
}

#[tokio::test]
async fn test_translate_httpError_shouldCarryStatus() {
    let stub = StubServer::start(StubReply::Status(502, "bad gateway".to_string())).await;
    let baidu = client(&stub.url, 5);

    let request = TranslationRequest::auto_detect("Hello", "fr").unwrap();
    let err = baidu.translate(&request).await.unwrap_err();

    assert!(matches!(err, ProviderError::HttpError { status_code: 502, .. }));
}

#[tokio::test]
async fn test_translate_slowEndpoint_shouldTimeOut() {
    let stub = StubServer::start(StubReply::Delayed(
        Duration::from_secs(3),
        r#"{"trans_result":[{"dst":"late"}]}"#.to_string(),
    ))
    .await;
    let baidu = client(&stub.url, 1);

    let request = TranslationRequest::auto_detect("Hello", "fr").unwrap();
    let err = baidu.translate(&request).await.unwrap_err();

    assert!(matches!(err, ProviderError::Timeout(1)));
}

#[tokio::test]
async fn test_translate_closedPort_shouldBeConnectionError() {
    let endpoint = closed_endpoint().await;
    let baidu = client(&endpoint, 5);

    let request = TranslationRequest::auto_detect("Hello", "fr").unwrap();
    let err = baidu.translate(&request).await.unwrap_err();

    assert!(matches!(err, ProviderError::ConnectionError(_)));
}

#[tokio::test]
async fn test_testConnection_shouldTranslateProbeWord() {
    let stub = StubServer::start(StubReply::Json(
        r#"{"trans_result":[{"src":"hello","dst":"你好"}]}"#.to_string(),
    ))
    .await;
    let baidu = client(&stub.url, 5);

    baidu.test_connection().await.unwrap();

    let form = &stub.forms()[0];
    assert_eq!(form["from"], "en");
    assert_eq!(form["to"], "zh");
}
