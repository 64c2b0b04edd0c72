// JSON:API client integration tests against a local mock server.
#![allow(missing_docs)]

use drupal_verify_config::DrupalConfig;
use drupal_verify_jsonapi::{BasicAuth, Document, JsonApiClient, JsonApiUrl, build_basic_auth};
use drupal_verify_shared::{ErrorCode, Result};
use drupal_verify_testkit::{OrFail, init_test_tracing, load_bundled};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENRE_PATH: &str = "/jsonapi/taxonomy_term/genre";

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct GenreAttributes {
    name: String,
}

fn client_for(server: &MockServer) -> Result<JsonApiClient> {
    let config = DrupalConfig::new(server.uri())?.with_timeout_ms(5_000)?;
    JsonApiClient::new(&config)
}

fn fixture(name: &str) -> Value {
    load_bundled(name).or_fail(name)
}

async fn mount_genres(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(GENRE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("genre-collection.json")))
        .mount(server)
        .await;
}

async fn authorization_headers(server: &MockServer) -> Vec<Option<String>> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| {
            request
                .headers
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                .map(ToString::to_string)
        })
        .collect()
}

#[tokio::test]
async fn credentials_are_sent_as_basic_auth() -> Result<()> {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GENRE_PATH))
        .and(header("authorization", "Basic YWRtaW46bW9v"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("genre-collection.json")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let request = client.request("taxonomy_term", "genre").with_basic_auth("admin", "moo");
    let response = client.get(&request).await?;

    assert_eq!(response.len(), 2);
    Ok(())
}

#[tokio::test]
async fn configured_credentials_seed_every_request() -> Result<()> {
    let server = MockServer::start().await;
    mount_genres(&server).await;

    let config = DrupalConfig::new(server.uri())?.with_basic_auth("admin", "moo");
    let client = JsonApiClient::new(&config)?;
    client.get(&client.request("taxonomy_term", "genre")).await?;

    assert_eq!(
        authorization_headers(&server).await,
        vec![Some("Basic YWRtaW46bW9v".to_string())]
    );
    Ok(())
}

#[tokio::test]
async fn blank_usernames_send_no_authorization_header() -> Result<()> {
    let server = MockServer::start().await;
    mount_genres(&server).await;
    let client = client_for(&server)?;

    let requests = [
        client.request("taxonomy_term", "genre").with_basic_auth("", "moo"),
        client.request("taxonomy_term", "genre").with_basic_auth(" \t ", "moo"),
        client.request("taxonomy_term", "genre"),
    ];
    for request in &requests {
        client.get(request).await?;
    }

    assert_eq!(authorization_headers(&server).await, vec![None, None, None]);
    Ok(())
}

#[tokio::test]
async fn get_resource_passes_explicit_credentials_verbatim() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GENRE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("raw body"))
        .mount(&server)
        .await;
    let client = client_for(&server)?;
    let url = JsonApiUrl::new(server.uri(), "taxonomy_term", "genre").to_url()?;

    let auth: Option<BasicAuth> = build_basic_auth(Some(" admin "), None);
    let body = client.get_resource(&url, auth.as_ref()).await?;

    assert_eq!(body.as_ref(), b"raw body");
    // " admin " with an empty password.
    assert_eq!(
        authorization_headers(&server).await,
        vec![Some("Basic IGFkbWluIDo=".to_string())]
    );
    Ok(())
}

#[tokio::test]
async fn non_ok_status_fails_without_decoding() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GENRE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("<html>denied</html>"))
        .mount(&server)
        .await;
    let client = client_for(&server)?;

    let error = client
        .get(&client.request("taxonomy_term", "genre"))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::new("jsonapi", "unexpected_status"));
    assert_eq!(error.metadata_value("status"), Some("403"));
    assert!(
        error
            .metadata_value("url")
            .is_some_and(|url| url.ends_with(GENRE_PATH))
    );
    Ok(())
}

#[tokio::test]
async fn other_success_statuses_are_rejected() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    let client = client_for(&server)?;

    let error = client
        .get(&client.request("taxonomy_term", "genre"))
        .await
        .unwrap_err();

    assert_eq!(error.metadata_value("status"), Some("204"));
    Ok(())
}

#[tokio::test]
async fn filters_are_sent_as_bracketed_query_params() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GENRE_PATH))
        .and(query_param("filter[name]", "Photographs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "type": "taxonomy_term--genre",
                "id": "0b7e6c11-27a4-4a8e-9f5b-2f4d8f4d1c01",
                "attributes": { "name": "Photographs" }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server)?;

    let request = client
        .request("taxonomy_term", "genre")
        .with_filter("name", "Photographs");
    let genre = client
        .get_single_as::<Document<GenreAttributes>>(&request)
        .await?
        .single()?;

    assert_eq!(genre.attributes.name, "Photographs");
    assert_eq!(genre.kind.bundle(), "genre");
    Ok(())
}

#[tokio::test]
async fn single_result_queries_enforce_cardinality() -> Result<()> {
    let server = MockServer::start().await;
    mount_genres(&server).await;
    Mock::given(method("GET"))
        .and(path("/jsonapi/taxonomy_term/subject"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;
    let client = client_for(&server)?;

    let error = client
        .get_single(&client.request("taxonomy_term", "genre"))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::new("jsonapi", "cardinality_mismatch"));
    assert_eq!(error.metadata_value("found"), Some("2"));

    let error = client
        .get_single(&client.request("taxonomy_term", "subject"))
        .await
        .unwrap_err();
    assert_eq!(error.metadata_value("found"), Some("0"));

    let empty = client.get(&client.request("taxonomy_term", "subject")).await?;
    assert!(empty.is_empty());
    Ok(())
}

#[tokio::test]
async fn invalid_bodies_carry_the_request_url() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": 42 })))
        .mount(&server)
        .await;
    let client = client_for(&server)?;

    let error = client
        .get(&client.request("node", "islandora_object"))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::new("jsonapi", "unexpected_data_shape"));
    assert!(error.metadata_value("url").is_some());
    Ok(())
}

#[tokio::test]
async fn slow_responses_map_to_timeout_errors() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GENRE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixture("genre-collection.json"))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    let config = DrupalConfig::new(server.uri())?.with_timeout_ms(50)?;
    let client = JsonApiClient::new(&config)?;

    let error = client
        .get(&client.request("taxonomy_term", "genre"))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::timeout());
    assert!(error.class.is_retriable());
    assert!(
        error
            .metadata_value("url")
            .is_some_and(|url| url.ends_with(GENRE_PATH))
    );
    Ok(())
}

#[tokio::test]
async fn unreachable_servers_map_to_io_errors() -> Result<()> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").or_fail("bind probe port");
    let port = listener.local_addr().or_fail("probe port").port();
    drop(listener);

    let config = DrupalConfig::new(format!("http://127.0.0.1:{port}"))?;
    let client = JsonApiClient::new(&config)?;
    let error = client
        .get(&client.request("taxonomy_term", "genre"))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::io());
    assert!(error.class.is_retriable());
    assert!(error.metadata_value("url").is_some());
    Ok(())
}
