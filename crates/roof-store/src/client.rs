use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use roof_config::FirebaseConfig;
use roof_core::{BearerSource, CollectionPath, DocumentStore, NewDocument, StoreError};
use serde_json::{Value, json};

use crate::{doc_id, error, value};

/// Document store gateway over the Firestore REST API.
pub struct FirestoreStore {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    database: String,
    bearer: Arc<dyn BearerSource>,
}

impl FirestoreStore {
    /// # Errors
    ///
    /// Returns `StoreError::Network` if the HTTP client cannot be constructed.
    pub fn new(
        config: &FirebaseConfig,
        timeout: Duration,
        bearer: Arc<dyn BearerSource>,
    ) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| error::network("build http client", &e))?;
        Ok(Self {
            http,
            endpoint: config.firestore_endpoint.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            database: config.database.clone(),
            bearer,
        })
    }

    /// `projects/{project}/databases/{database}/documents`
    fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.project_id, self.database
        )
    }

    fn commit_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/{}/documents:commit",
            self.endpoint,
            urlencoding::encode(&self.project_id),
            self.database
        )
    }

    /// Body of a commit that creates `name` with `document`'s fields.
    fn commit_body(name: &str, document: &NewDocument) -> Value {
        let transforms: Vec<Value> = document
            .server_timestamps
            .iter()
            .map(|field| {
                json!({
                    "fieldPath": value::field_path(field),
                    "setToServerValue": "REQUEST_TIME",
                })
            })
            .collect();

        let mut write = json!({
            "update": {
                "name": name,
                "fields": value::encode_fields(&document.fields),
            },
            "currentDocument": { "exists": false },
        });
        if !transforms.is_empty() {
            write["updateTransforms"] = Value::Array(transforms);
        }

        json!({ "writes": [write] })
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn insert(
        &self,
        collection: &CollectionPath,
        document: NewDocument,
    ) -> Result<String, StoreError> {
        let token = self
            .bearer
            .bearer_token()
            .await
            .map_err(error::from_auth)?
            .ok_or(StoreError::Unauthenticated)?;

        let id = doc_id::generate()?;
        let name = format!("{}/{collection}/{id}", self.documents_root());
        let body = Self::commit_body(&name, &document);

        tracing::debug!(%collection, document = %id, "committing new document");
        let resp = self
            .http
            .post(self.commit_url())
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| error::network("commit", &e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(error::from_response(status.as_u16(), &body));
        }

        tracing::info!(%collection, document = %id, "document inserted");
        Ok(id)
    }
}
