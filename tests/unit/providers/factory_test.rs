use doc_translate::app_config::{TranslationConfig, TranslationProvider};
use doc_translate::errors::AppError;
use doc_translate::providers::create_provider;

#[test]
fn test_create_provider_baidu() {
    let mut config = TranslationConfig::default();
    config.baidu.app_id = "2015063000000001".to_string();
    config.baidu.secret_key = "12345678".to_string();

    let provider = create_provider(&config).unwrap();
    assert_eq!(provider.name(), "baidu");
}

#[test]
fn test_create_provider_baiduWithoutCredentials() {
    let config = TranslationConfig::default();
    assert!(matches!(create_provider(&config), Err(AppError::Config(_))));
}

#[tokio::test]
async fn test_create_provider_mock() {
    let config = TranslationConfig {
        provider: TranslationProvider::Mock,
        ..Default::default()
    };

    let provider = create_provider(&config).unwrap();
    assert_eq!(provider.name(), "mock");
    assert!(provider.test_connection().await.is_ok());
}
