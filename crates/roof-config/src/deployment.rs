//! Deployment namespace configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeploymentConfig {
    /// Namespace segment of the assessment collection path. Deployments
    /// sharing a namespace share one collection.
    #[serde(default)]
    pub namespace: String,
}

impl DeploymentConfig {
    pub fn is_configured(&self) -> bool {
        !self.namespace.trim().is_empty()
    }

    /// Collection that assessment requests of this deployment are written to.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the namespace is empty or nested.
    pub fn assessments_collection(
        &self,
    ) -> Result<roof_core::CollectionPath, roof_core::CoreError> {
        roof_core::CollectionPath::assessments(&self.namespace)
    }
}
