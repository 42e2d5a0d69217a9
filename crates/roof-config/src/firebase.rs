//! Firebase connection configuration.

use serde::{Deserialize, Serialize};

fn default_auth_endpoint() -> String {
    "https://identitytoolkit.googleapis.com".into()
}

fn default_token_endpoint() -> String {
    "https://securetoken.googleapis.com".into()
}

fn default_firestore_endpoint() -> String {
    "https://firestore.googleapis.com".into()
}

fn default_database() -> String {
    "(default)".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FirebaseConfig {
    /// Web API key of the Firebase project.
    #[serde(default)]
    pub api_key: String,

    /// Firebase/Google Cloud project ID.
    #[serde(default)]
    pub project_id: String,

    /// Auth domain (e.g., `my-project.firebaseapp.com`).
    #[serde(default)]
    pub auth_domain: String,

    #[serde(default)]
    pub storage_bucket: String,

    #[serde(default)]
    pub messaging_sender_id: String,

    /// Firebase app ID (e.g., `1:123:web:abc`).
    #[serde(default)]
    pub app_id: String,

    /// Identity Toolkit base URL. Point at the auth emulator for local runs.
    #[serde(default = "default_auth_endpoint")]
    pub auth_endpoint: String,

    /// Secure Token base URL used to refresh sessions.
    #[serde(default = "default_token_endpoint")]
    pub token_endpoint: String,

    /// Firestore REST base URL.
    #[serde(default = "default_firestore_endpoint")]
    pub firestore_endpoint: String,

    /// Firestore database ID.
    #[serde(default = "default_database")]
    pub database: String,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            project_id: String::new(),
            auth_domain: String::new(),
            storage_bucket: String::new(),
            messaging_sender_id: String::new(),
            app_id: String::new(),
            auth_endpoint: default_auth_endpoint(),
            token_endpoint: default_token_endpoint(),
            firestore_endpoint: default_firestore_endpoint(),
            database: default_database(),
        }
    }
}

impl FirebaseConfig {
    /// Check if the minimum connection parameters are present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.project_id.is_empty()
    }

    /// Endpoint fields paired with their config key, for validation.
    pub fn endpoints(&self) -> [(&'static str, &str); 3] {
        [
            ("firebase.auth_endpoint", &self.auth_endpoint),
            ("firebase.token_endpoint", &self.token_endpoint),
            ("firebase.firestore_endpoint", &self.firestore_endpoint),
        ]
    }
}
