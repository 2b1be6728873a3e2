//! Request shapes and error classification of the typed endpoints.

use phrase_client::model::{
    CreateKey, CreatePhraseLocale, CreatePhraseProject, CreateTranslation, DownloadLocaleOptions,
};
use phrase_client::{ClientConfig, PhraseApiClient, PhraseError};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> PhraseApiClient {
    PhraseApiClient::new(ClientConfig::new("secret").with_base_url(server.uri())).unwrap()
}

#[tokio::test]
async fn test_rate_limit_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/projects"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let error = client(&server).projects().await.unwrap_err();

    assert_eq!(error.status(), Some(429));
    assert_eq!(error.to_string(), "Code [429] : rate limited");
}

#[tokio::test]
async fn test_missing_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/projects/p1"))
        .respond_with(ResponseTemplate::new(200).insert_header("ETag", "\"v1\""))
        .mount(&server)
        .await;

    let client = client(&server);
    let error = client.project("p1").await.unwrap_err();

    assert!(matches!(error, PhraseError::MissingContentType));
    assert_eq!(client.caches().etags().entry_count(), 0);
}

#[tokio::test]
async fn test_unsupported_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/projects/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<project/>", "application/xml"))
        .mount(&server)
        .await;

    let error = client(&server).project("p1").await.unwrap_err();

    assert!(matches!(error, PhraseError::UnsupportedContentType(ct) if ct == "application/xml"));
}

#[tokio::test]
async fn test_delete_reports_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/projects/p1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/projects/p1/keys/k1"))
        .and(query_param("branch", "feature"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/projects/p1/locales/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let client = client(&server);

    assert!(client.delete_project("p1").await.unwrap());
    assert!(!client.delete_key("p1", "k1", Some("feature")).await.unwrap());
    assert_eq!(
        client
            .delete_locale("p1", "missing", None)
            .await
            .unwrap_err()
            .status(),
        Some(404)
    );
}

#[tokio::test]
async fn test_create_project_sends_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/projects"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({ "name": "Mobile", "main_format": "properties" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": "p1", "name": "Mobile" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let project = CreatePhraseProject {
        main_format: Some("properties".into()),
        ..CreatePhraseProject::new("Mobile")
    };
    let created = client(&server).create_project(&project).await.unwrap();

    assert_eq!(created.id, "p1");
}

#[tokio::test]
async fn test_create_locale_and_translation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/projects/p1/locales"))
        .and(body_json(json!({ "name": "German", "code": "de-DE", "branch": "feature" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "id": "l1", "name": "German", "code": "de-DE" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v2/projects/p1/translations"))
        .and(body_json(json!({
            "locale_id": "l1",
            "key_id": "k1",
            "content": "Hallo",
            "unverified": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "t1",
            "content": "Hallo",
            "unverified": true,
            "locale": { "id": "l1", "name": "German", "code": "de-DE" },
            "key": { "id": "k1", "name": "greeting" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let locale = CreatePhraseLocale {
        branch: Some("feature".into()),
        ..CreatePhraseLocale::new("German", "de-DE")
    };
    let locale = client.create_locale("p1", &locale).await.unwrap();

    let translation = CreateTranslation {
        unverified: Some(true),
        ..CreateTranslation::new(&locale.id, "k1", "Hallo")
    };
    let translation = client.create_translation("p1", &translation).await.unwrap();

    assert_eq!(translation.key.name, "greeting");
    assert_eq!(translation.locale.code, "de-DE");
}

#[tokio::test]
async fn test_create_and_search_keys() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/projects/p1/keys"))
        .and(body_json(json!({ "name": "greeting", "tags": "home,onboarding" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "k1",
            "name": "greeting",
            "tags": ["home", "onboarding"]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v2/projects/p1/keys/search"))
        .and(body_json(json!({ "locale_id": "de", "q": "name:greeting" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": "k1", "name": "greeting" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let key = CreateKey {
        tags: vec!["home".into(), "onboarding".into()],
        ..CreateKey::new("greeting")
    };
    let created = client.create_key("p1", &key).await.unwrap();
    let found = client
        .search_keys("p1", Some("de"), Some("name:greeting"), None)
        .await
        .unwrap();

    assert_eq!(created.tags, vec!["home", "onboarding"]);
    assert_eq!(found[0].id, created.id);
}

#[tokio::test]
async fn test_download_locale_as_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/projects/p1/locales/de/download"))
        .and(query_param("file_format", "json"))
        .and(query_param("tags", "checkout"))
        .and(query_param("include_empty_translations", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "checkout.pay": { "message": "Bezahlen" },
            "checkout.cancel": { "message": "Abbrechen", "description": "Secondary button" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = DownloadLocaleOptions {
        include_empty_translations: true,
        tags: Some("checkout".into()),
        ..DownloadLocaleOptions::default()
    };
    let messages = client(&server)
        .download_locale("p1", "de", Some(&options))
        .await
        .unwrap();

    assert_eq!(messages["checkout.pay"].message, "Bezahlen");
    assert_eq!(
        messages["checkout.cancel"].description.as_deref(),
        Some("Secondary button")
    );
}

#[tokio::test]
async fn test_translations_by_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/projects/p1/keys/k1/translations"))
        .and(query_param("branch", "feature"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "t1",
            "content": "Test",
            "locale": { "id": "l1", "name": "en", "code": "en-US" },
            "key": { "id": "k1", "name": "translation.key" }
        }])))
        .mount(&server)
        .await;

    let translations = client(&server)
        .translations_by_key("p1", "k1", Some("feature"))
        .await
        .unwrap();

    assert_eq!(translations.len(), 1);
    assert_eq!(translations[0].key.name, "translation.key");
    assert_eq!(translations[0].locale.name, "en");
}

#[tokio::test]
async fn test_identifiers_are_path_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/projects/p1/tags/a%2Fb"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "name": "a/b", "keys_count": 0 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let tag = client(&server).tag("p1", "a/b", None).await.unwrap();

    assert_eq!(tag.name, "a/b");
}

#[tokio::test]
async fn test_bytes_endpoint_rejects_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/projects/p1/locales/de/download"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let error = client(&server)
        .download_locale_as_properties("p1", "de", false, None, None)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        PhraseError::UnexpectedPayload {
            expected: "bytes",
            found: "object"
        }
    ));
}
