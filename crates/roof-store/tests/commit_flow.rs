//! # Integration tests for the Firestore document store
//!
//! A `tiny_http` server stands in for the Firestore REST endpoint. Each test
//! records what the store sent and answers with a canned status.

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use roof_config::FirebaseConfig;
use roof_core::{
    AssessmentDraft, AuthError, BearerSource, CollectionPath, DocumentStore, Identity, StoreError,
};
use roof_store::FirestoreStore;
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Captured {
    url: String,
    authorization: Option<String>,
    body: serde_json::Value,
}

type Recorded = Arc<Mutex<Vec<Captured>>>;

fn spawn_server(status: u16, reply: &'static str) -> (String, Recorded) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind fake server");
    let port = server
        .server_addr()
        .to_ip()
        .map(|a| a.port())
        .expect("ip listener");
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&recorded);

    std::thread::spawn(move || {
        for mut request in server.incoming_requests() {
            let mut raw = String::new();
            let _ = request.as_reader().read_to_string(&mut raw);
            let authorization = request
                .headers()
                .iter()
                .find(|h| h.field.equiv("Authorization"))
                .map(|h| h.value.to_string());
            log.lock().expect("log lock").push(Captured {
                url: request.url().to_string(),
                authorization,
                body: serde_json::from_str(&raw).unwrap_or_default(),
            });
            let response = tiny_http::Response::from_string(reply).with_status_code(status);
            let _ = request.respond(response);
        }
    });

    (format!("http://127.0.0.1:{port}"), recorded)
}

struct FixedBearer(Result<Option<String>, AuthError>);

#[async_trait]
impl BearerSource for FixedBearer {
    async fn bearer_token(&self) -> Result<Option<String>, AuthError> {
        self.0.clone()
    }
}

fn store(base: &str, bearer: Result<Option<String>, AuthError>) -> FirestoreStore {
    let config = FirebaseConfig {
        api_key: "test-key".into(),
        project_id: "rooftop-test".into(),
        firestore_endpoint: base.to_string(),
        ..Default::default()
    };
    FirestoreStore::new(&config, Duration::from_secs(5), Arc::new(FixedBearer(bearer)))
        .expect("store")
}

fn signed_in() -> Result<Option<String>, AuthError> {
    Ok(Some("id-token-1".into()))
}

fn assessments() -> CollectionPath {
    CollectionPath::assessments("demo-app").expect("valid namespace")
}

fn sample_document() -> roof_core::NewDocument {
    let draft = AssessmentDraft {
        address: "123 Main St".into(),
        contact: "Jane Doe".into(),
        phone: "555-1234".into(),
        notes: String::new(),
    };
    draft
        .to_record(&Identity::new("uid-1", "jane@example.com"))
        .expect("complete draft")
        .to_document()
        .expect("encodes")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn insert_commits_create_with_server_timestamp() {
    let (base, recorded) = spawn_server(200, r#"{"writeResults":[{}],"commitTime":"x"}"#);
    let store = store(&base, signed_in());

    let id = store
        .insert(&assessments(), sample_document())
        .await
        .expect("insert succeeds");

    assert_eq!(id.len(), 20);
    let requests = recorded.lock().expect("log lock");
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(
        request.url,
        "/v1/projects/rooftop-test/databases/(default)/documents:commit"
    );
    assert_eq!(request.authorization.as_deref(), Some("Bearer id-token-1"));

    let expected_name = format!(
        "projects/rooftop-test/databases/(default)/documents/artifacts/demo-app/public/data/assessments/{id}"
    );
    assert_eq!(
        request.body,
        json!({"writes": [{
            "update": {
                "name": expected_name,
                "fields": {
                    "address": {"stringValue": "123 Main St"},
                    "contact": {"stringValue": "Jane Doe"},
                    "phone": {"stringValue": "555-1234"},
                    "notes": {"stringValue": ""},
                    "requesterEmail": {"stringValue": "jane@example.com"},
                    "requesterId": {"stringValue": "uid-1"},
                    "status": {"stringValue": "pending"},
                },
            },
            "currentDocument": {"exists": false},
            "updateTransforms": [
                {"fieldPath": "submittedAt", "setToServerValue": "REQUEST_TIME"}
            ],
        }]})
    );
}

#[tokio::test]
async fn signed_out_insert_never_reaches_the_server() {
    let (base, recorded) = spawn_server(200, "{}");
    let store = store(&base, Ok(None));

    let err = store
        .insert(&assessments(), sample_document())
        .await
        .expect_err("no bearer");

    assert_eq!(err, StoreError::Unauthenticated);
    assert!(recorded.lock().expect("log lock").is_empty());
}

#[tokio::test]
async fn rejected_refresh_is_unauthenticated() {
    let (base, recorded) = spawn_server(200, "{}");
    let store = store(&base, Err(AuthError::Rejected("TOKEN_EXPIRED".into())));

    let err = store
        .insert(&assessments(), sample_document())
        .await
        .expect_err("refresh rejected");

    assert_eq!(err, StoreError::Unauthenticated);
    assert!(recorded.lock().expect("log lock").is_empty());
}

#[tokio::test]
async fn rules_rejection_is_permission_denied() {
    let (base, _) = spawn_server(
        403,
        r#"{"error":{"code":403,"message":"Missing or insufficient permissions.","status":"PERMISSION_DENIED"}}"#,
    );
    let store = store(&base, signed_in());

    let err = store
        .insert(&assessments(), sample_document())
        .await
        .expect_err("denied");

    assert_eq!(
        err,
        StoreError::PermissionDenied("Missing or insufficient permissions.".into())
    );
}

#[tokio::test]
async fn server_failure_is_a_write_error() {
    let (base, _) = spawn_server(
        503,
        r#"{"error":{"code":503,"message":"The service is currently unavailable.","status":"UNAVAILABLE"}}"#,
    );
    let store = store(&base, signed_in());

    let err = store
        .insert(&assessments(), sample_document())
        .await
        .expect_err("unavailable");

    assert_eq!(
        err,
        StoreError::Write("HTTP 503: The service is currently unavailable.".into())
    );
}

#[tokio::test]
async fn unreachable_store_is_a_network_error() {
    let port = {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind");
        server.server_addr().to_ip().map(|a| a.port()).expect("ip")
    };
    let store = store(&format!("http://127.0.0.1:{port}"), signed_in());

    let err = store
        .insert(&assessments(), sample_document())
        .await
        .expect_err("nothing listening");
    assert!(matches!(err, StoreError::Network(_)));
}
