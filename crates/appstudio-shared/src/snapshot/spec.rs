//!
//! # ApplicationSnapshot Spec
//!
//! Desired deployable state of an application: the container image of each
//! of its components at one point in time.
//!
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSnapshotSpec {
    /// name of the Application resource, in the same namespace, this snapshot targets
    pub application: String,

    /// user-visible name, not used for any functional behaviour
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,

    /// user-visible description, not used for any functional behaviour
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_description: String,

    /// how the snapshot was constructed
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub snapshot_type: String,

    /// components to deploy as part of this snapshot
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ApplicationSnapshotComponent>,

    #[serde(default)]
    pub artifacts: SnapshotArtifacts,
}

impl ApplicationSnapshotSpec {
    pub fn new(application: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            ..Default::default()
        }
    }

    pub fn add_component(
        mut self,
        name: impl Into<String>,
        container_image: impl Into<String>,
    ) -> Self {
        self.components.push(ApplicationSnapshotComponent {
            name: name.into(),
            container_image: container_image.into(),
        });
        self
    }

    /// first component with `name`; names are expected but not required to be unique
    pub fn component(&self, name: &str) -> Option<&ApplicationSnapshotComponent> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn container_images(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.container_image.as_str())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSnapshotComponent {
    pub name: String,
    /// image to deploy for this component
    pub container_image: String,
}

/// Links from a snapshot to other AppStudio resources.
///
/// `unstable_fields` holds any JSON document. Nothing here is validated and its
/// layout carries no backwards compatibility guarantee.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotArtifacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unstable_fields: Option<serde_json::Value>,
}

#[cfg(test)]
mod test {

    use serde_json::json;

    use super::*;

    #[test]
    fn test_spec_json() {
        let spec = ApplicationSnapshotSpec::new("petstore")
            .add_component("api", "quay.io/acme/api@sha256:1234")
            .add_component("web", "quay.io/acme/web:v2");

        assert_eq!(
            serde_json::to_value(&spec).expect("serialize"),
            json!({
                "application": "petstore",
                "components": [
                    {"name": "api", "containerImage": "quay.io/acme/api@sha256:1234"},
                    {"name": "web", "containerImage": "quay.io/acme/web:v2"}
                ],
                "artifacts": {}
            })
        );

        assert_eq!(
            spec.component("web").map(|c| c.container_image.as_str()),
            Some("quay.io/acme/web:v2")
        );
        assert!(spec.component("db").is_none());
        assert_eq!(spec.container_images().count(), 2);
    }

    #[test]
    fn test_spec_optional_fields() {
        let spec: ApplicationSnapshotSpec = serde_json::from_value(json!({
            "application": "petstore",
            "displayName": "Pet Store",
            "type": "manual",
            "artifacts": {
                "unstableFields": {"commits": [{"image": "api", "sha": "abc123"}]}
            }
        }))
        .expect("parse");

        assert_eq!(spec.display_name, "Pet Store");
        assert_eq!(spec.snapshot_type, "manual");
        assert!(spec.display_description.is_empty());
        assert!(spec.components.is_empty());
        assert_eq!(
            spec.artifacts.unstable_fields,
            Some(json!({"commits": [{"image": "api", "sha": "abc123"}]}))
        );
    }

    #[test]
    fn test_application_is_required() {
        let result = serde_json::from_value::<ApplicationSnapshotSpec>(json!({"components": []}));
        assert!(result.is_err());

        let schema = serde_json::to_value(schemars::schema_for!(ApplicationSnapshotSpec))
            .expect("schema");
        assert_eq!(schema["required"], json!(["application"]));
    }
}
