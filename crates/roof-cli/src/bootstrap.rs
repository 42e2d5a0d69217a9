use std::sync::Arc;

use anyhow::Context;
use roof_auth::FirebaseIdentity;
use roof_config::RoofConfig;
use roof_core::CollectionPath;
use roof_store::FirestoreStore;

/// Gateways and collection the session is mounted with.
pub struct Services {
    pub identity: Arc<FirebaseIdentity>,
    pub store: Arc<FirestoreStore>,
    pub collection: CollectionPath,
}

/// Load `.env`, then the layered config, and refuse to start on gaps.
pub fn load_config() -> anyhow::Result<RoofConfig> {
    load_dotenv()?;

    let config = RoofConfig::load().context("failed to load configuration")?;
    config.validate().context(
        "incomplete configuration: set ROOF_FIREBASE__API_KEY, ROOF_FIREBASE__PROJECT_ID and \
         ROOF_DEPLOYMENT__NAMESPACE, or add them to .rooftop/config.toml",
    )?;
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        tracing::debug!(path = %env_path.display(), "loaded dotenv file");
    }
    Ok(())
}

/// Construct the identity and document store gateways from `config`.
pub fn connect(config: &RoofConfig) -> anyhow::Result<Services> {
    let identity = Arc::new(
        FirebaseIdentity::from_config(&config.firebase, &config.general)
            .context("failed to set up the identity gateway")?,
    );
    let store = Arc::new(
        FirestoreStore::new(
            &config.firebase,
            config.general.request_timeout(),
            identity.clone(),
        )
        .context("failed to set up the document store")?,
    );
    let collection = config
        .deployment
        .assessments_collection()
        .context("invalid deployment namespace")?;

    tracing::info!(
        project = %config.firebase.project_id,
        %collection,
        persist_session = config.general.persist_session,
        "gateways ready"
    );

    Ok(Services {
        identity,
        store,
        collection,
    })
}
