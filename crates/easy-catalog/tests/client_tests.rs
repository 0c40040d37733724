//! HTTP-level tests for the catalog client against a mock contents API.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use easy_catalog::{CatalogClient, CatalogSource};
use easy_common::config::CatalogConfig;
use easy_common::error::EasyError;
use easy_common::types::ServiceName;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock server plus the runtime that drives it. The blocking client is
/// called from the test thread, outside the runtime.
struct Harness {
    server: MockServer,
    runtime: tokio::runtime::Runtime,
}

impl Harness {
    fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("runtime");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    fn client(&self) -> CatalogClient {
        CatalogClient::new(CatalogConfig {
            api_base: self.server.uri(),
            raw_base: format!("{}/raw", self.server.uri()),
            timeout_secs: 5,
            ..CatalogConfig::default()
        })
        .expect("client")
    }
}

fn name(raw: &str) -> ServiceName {
    ServiceName::parse(raw).expect("name")
}

#[test]
fn list_available_filters_sorts_and_dedups() {
    let h = Harness::start();
    h.mount(
        Mock::given(method("GET"))
            .and(path("/contents/services"))
            .and(query_param("ref", "main"))
            .and(header("accept", "application/vnd.github.v3+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "redis", "type": "dir", "sha": "1"},
                {"name": "README.md", "type": "file"},
                {"name": ".github", "type": "dir"},
                {"name": "kafka", "type": "dir"},
                {"name": "redis", "type": "dir"},
                {"name": "postgres", "type": "dir"}
            ]))),
    );

    let client = h.client();
    let first = client.list_available().expect("list");
    let second = client.list_available().expect("list again");

    assert_eq!(first, vec!["kafka", "postgres", "redis"]);
    assert_eq!(first, second);
}

#[test]
fn list_available_non_2xx_is_unreachable() {
    let h = Harness::start();
    h.mount(
        Mock::given(method("GET"))
            .and(path("/contents/services"))
            .respond_with(ResponseTemplate::new(403)),
    );

    let err = h.client().list_available().unwrap_err();
    assert!(matches!(err, EasyError::CatalogUnreachable { .. }), "got {err}");
    assert!(err.to_string().contains("403"));
}

#[test]
fn list_available_object_body_is_malformed() {
    let h = Harness::start();
    h.mount(
        Mock::given(method("GET"))
            .and(path("/contents/services"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "rate limited"})),
            ),
    );

    let err = h.client().list_available().unwrap_err();
    assert!(matches!(err, EasyError::CatalogMalformed { .. }), "got {err}");
}

#[test]
fn list_available_non_json_body_is_malformed() {
    let h = Harness::start();
    h.mount(
        Mock::given(method("GET"))
            .and(path("/contents/services"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>")),
    );

    let err = h.client().list_available().unwrap_err();
    assert!(matches!(err, EasyError::CatalogMalformed { .. }), "got {err}");
}

#[test]
fn list_available_entries_missing_type_are_malformed() {
    let h = Harness::start();
    h.mount(
        Mock::given(method("GET"))
            .and(path("/contents/services"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "redis"}]))),
    );

    let err = h.client().list_available().unwrap_err();
    assert!(matches!(err, EasyError::CatalogMalformed { .. }), "got {err}");
}

#[test]
fn list_available_connection_refused_is_unreachable() {
    let client = CatalogClient::new(CatalogConfig {
        api_base: "http://127.0.0.1:9".into(),
        timeout_secs: 5,
        ..CatalogConfig::default()
    })
    .expect("client");

    let err = client.list_available().unwrap_err();
    assert!(matches!(err, EasyError::CatalogUnreachable { .. }), "got {err}");
}

#[test]
fn list_files_returns_plain_files_only() {
    let h = Harness::start();
    h.mount(
        Mock::given(method("GET"))
            .and(path("/contents/services/redis"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "docker-compose.yml", "type": "file"},
                {"name": "env.sample", "type": "file"},
                {"name": "conf", "type": "dir"}
            ]))),
    );

    let files = h.client().list_files(&name("redis")).expect("files");
    assert_eq!(files, vec!["docker-compose.yml", "env.sample"]);
}

#[test]
fn list_files_404_is_service_not_in_catalog() {
    let h = Harness::start();
    h.mount(
        Mock::given(method("GET"))
            .and(path("/contents/services/ghost"))
            .respond_with(ResponseTemplate::new(404)),
    );

    let err = h.client().list_files(&name("ghost")).unwrap_err();
    assert!(
        matches!(err, EasyError::ServiceNotInCatalog { ref service } if service == "ghost"),
        "got {err}"
    );
}

#[test]
fn fetch_file_content_returns_raw_bytes() {
    let h = Harness::start();
    h.mount(
        Mock::given(method("GET"))
            .and(path("/raw/services/redis/docker-compose.yml"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"services:\n  redis: {}\n".to_vec())),
    );

    let bytes = h
        .client()
        .fetch_file_content(&name("redis"), "docker-compose.yml")
        .expect("fetch");
    assert_eq!(bytes, b"services:\n  redis: {}\n");
}

#[test]
fn fetch_file_content_non_2xx_is_download_failed() {
    let h = Harness::start();
    h.mount(
        Mock::given(method("GET"))
            .and(path("/raw/services/redis/missing.txt"))
            .respond_with(ResponseTemplate::new(500)),
    );

    let err = h
        .client()
        .fetch_file_content(&name("redis"), "missing.txt")
        .unwrap_err();
    assert!(matches!(err, EasyError::DownloadFailed { .. }), "got {err}");
}
