//! apiextensions.k8s.io/v1beta1 CRD types
//!
//! `k8s-openapi` only ships the v1 flavour of CustomResourceDefinition. v1beta1
//! still carries the legacy single `version` field, a top-level `validation`
//! schema and the conversion webhook config directly on `conversion`, so the
//! object graph is modelled here. Schema nodes and a few leaf types are
//! structurally identical between v1 and v1beta1 and are reused from
//! `k8s-openapi`.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ListMeta, ObjectMeta};
use k8s_openapi::ByteString;
use kube::core::TypeMeta;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
    CustomResourceDefinitionCondition, CustomResourceSubresources, CustomResourceValidation,
    JSONSchemaProps, JSONSchemaPropsOrArray, JSONSchemaPropsOrBool, JSONSchemaPropsOrStringArray,
};

/// API group these types belong to
pub const SCHEME_GROUP: &str = "apiextensions.k8s.io";

/// API version these types belong to
pub const SCHEME_VERSION: &str = "v1beta1";

/// `apiVersion` string written on the wire
pub const SCHEME_GROUP_VERSION: &str = "apiextensions.k8s.io/v1beta1";

/// CustomResourceDefinition represents a resource that should be exposed on the API server.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CustomResourceDefinition {
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,

    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Describes how the user wants the resources to appear
    #[serde(default)]
    pub spec: CustomResourceDefinitionSpec,

    /// Indicates the actual state of the CustomResourceDefinition
    #[serde(default)]
    pub status: CustomResourceDefinitionStatus,
}

impl k8s_openapi::Resource for CustomResourceDefinition {
    const API_VERSION: &'static str = SCHEME_GROUP_VERSION;
    const GROUP: &'static str = SCHEME_GROUP;
    const KIND: &'static str = "CustomResourceDefinition";
    const VERSION: &'static str = SCHEME_VERSION;
    const URL_PATH_SEGMENT: &'static str = "customresourcedefinitions";
    type Scope = k8s_openapi::ClusterResourceScope;
}

impl k8s_openapi::ListableResource for CustomResourceDefinition {
    const LIST_KIND: &'static str = "CustomResourceDefinitionList";
}

impl k8s_openapi::Metadata for CustomResourceDefinition {
    type Ty = ObjectMeta;

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

/// CustomResourceDefinitionList is a list of CustomResourceDefinition objects.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CustomResourceDefinitionList {
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,

    #[serde(default)]
    pub metadata: ListMeta,

    #[serde(default)]
    pub items: Vec<CustomResourceDefinition>,
}

/// CustomResourceDefinitionSpec describes how a user wants their resource to appear
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomResourceDefinitionSpec {
    /// Group is the group this resource belongs in
    #[serde(default)]
    pub group: String,

    /// Legacy single version of this resource. Superseded by `versions`; when
    /// both are set, `version` must match the first entry of `versions`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    /// Names are the names used to describe this custom resource
    #[serde(default)]
    pub names: CustomResourceDefinitionNames,

    /// Whether this resource is cluster or namespace scoped. `""` reads as unset.
    #[serde(
        default,
        deserialize_with = "deserialize_scope",
        skip_serializing_if = "Option::is_none"
    )]
    pub scope: Option<ResourceScope>,

    /// Validation describes the validation methods for CustomResources.
    /// Mutually exclusive with per-version schemas.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<CustomResourceValidation>,

    /// Subresources describes the subresources for CustomResource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subresources: Option<CustomResourceSubresources>,

    /// All versions of this resource. The first entry is the primary version.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<CustomResourceDefinitionVersion>,

    /// How custom resources are converted between versions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion: Option<CustomResourceConversion>,

    /// Columns printed by `kubectl get`. Mutually exclusive with per-version columns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_printer_columns: Vec<CustomResourceColumnDefinition>,

    /// Whether fields not specified in the validation schema are kept when persisting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_unknown_fields: Option<bool>,

    /// Fields not modelled above, passed through untouched
    #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

fn deserialize_scope<'de, D>(deserializer: D) -> Result<Option<ResourceScope>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some("Cluster") => Ok(Some(ResourceScope::Cluster)),
        Some("Namespaced") => Ok(Some(ResourceScope::Namespaced)),
        Some(other) => Err(serde::de::Error::unknown_variant(
            other,
            &["Cluster", "Namespaced"],
        )),
    }
}

/// Scope of a custom resource
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceScope {
    /// Resource exists once per cluster
    Cluster,
    /// Resource exists once per namespace
    Namespaced,
}

/// CustomResourceDefinitionNames indicates the names to serve this CustomResourceDefinition.
///
/// An empty string means the name is unset.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomResourceDefinitionNames {
    /// Plural name of the resource to serve, e.g. "widgets"
    #[serde(default)]
    pub plural: String,

    /// Singular name of the resource. Defaults to lowercased `kind`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub singular: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub short_names: Vec<String>,

    /// Serialized kind of the resource, e.g. "Widget"
    #[serde(default)]
    pub kind: String,

    /// Serialized kind of the list for this resource. Defaults to `<kind>List`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub list_kind: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

/// One served version of a custom resource
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomResourceDefinitionVersion {
    /// Version name, e.g. "v1", "v2beta1"
    pub name: String,

    /// Whether this version is served via REST APIs
    #[serde(default)]
    pub served: bool,

    /// Whether this version is used when persisting custom resources.
    /// Exactly one version must be the storage version.
    #[serde(default)]
    pub storage: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_warning: Option<String>,

    /// Schema used for validation, pruning and defaulting of this version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<CustomResourceValidation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subresources: Option<CustomResourceSubresources>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_printer_columns: Vec<CustomResourceColumnDefinition>,

    #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

/// A column printed by `kubectl get`
///
/// Unlike v1, the path key is spelled `JSONPath` on the wire.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CustomResourceColumnDefinition {
    pub name: String,

    /// OpenAPI type of the column, e.g. "string", "date"
    #[serde(rename = "type")]
    pub type_: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Relative importance; 0 is shown in the standard view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,

    /// Simple JSONPath evaluated against each custom resource
    #[serde(rename = "JSONPath")]
    pub json_path: String,
}

/// How custom resources are converted between versions
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomResourceConversion {
    /// Conversion strategy (None or Webhook)
    pub strategy: ConversionStrategy,

    /// Webhook to call when strategy is Webhook
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_client_config: Option<WebhookClientConfig>,

    /// Ordered list of preferred ConversionReview versions the webhook expects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conversion_review_versions: Vec<String>,

    #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

/// Conversion strategy between custom resource versions
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConversionStrategy {
    /// Only `apiVersion` is changed, the rest of the object is kept as-is
    #[default]
    None,
    /// A conversion webhook is called for every conversion
    Webhook,
}

/// How to reach a webhook backend
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebhookClientConfig {
    /// Location of the webhook in standard URL form. Exclusive with `service`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Reference to the in-cluster service backing the webhook
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceReference>,

    /// PEM encoded CA bundle used to validate the webhook's server certificate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_bundle: Option<ByteString>,

    #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

/// Reference to a Service
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ServiceReference {
    pub namespace: String,

    pub name: String,

    /// URL path requests are sent to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Port on the service hosting the webhook. Defaults to 443.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,

    #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

/// Status of a CustomResourceDefinition
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomResourceDefinitionStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<CustomResourceDefinitionCondition>,

    /// Names actually being used to serve discovery
    #[serde(default)]
    pub accepted_names: CustomResourceDefinitionNames,

    /// Versions of this resource that have ever been persisted, in order
    #[serde(default)]
    pub stored_versions: Vec<String>,

    #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

#[cfg(test)]
#[path = "v1beta1_test.rs"]
mod tests;
