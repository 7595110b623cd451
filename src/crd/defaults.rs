//! Field defaults for v1beta1 CustomResourceDefinitions
//!
//! ## Defaulting rules
//! - scope: Namespaced
//! - names.singular: lowercased kind
//! - names.listKind: `<kind>List`
//! - versions / version: each derived from the other when only one is set
//! - conversion: strategy None; Webhook strategy gets `conversionReviewVersions: [v1beta1]`
//! - preserveUnknownFields: true
//! - status.storedVersions: the storage version, if any
//! - webhook service port: 443
//!
//! Defaulting never fails and is idempotent.

use tracing::debug;

use super::v1beta1::{
    ConversionStrategy, CustomResourceConversion, CustomResourceDefinition,
    CustomResourceDefinitionSpec, CustomResourceDefinitionVersion, ResourceScope,
    ServiceReference, SCHEME_VERSION,
};

/// Default port of a webhook service reference
pub const DEFAULT_SERVICE_PORT: i32 = 443;

/// Default scope of a custom resource
pub const DEFAULT_SCOPE: ResourceScope = ResourceScope::Namespaced;

/// Default `preserveUnknownFields` for v1beta1
pub const DEFAULT_PRESERVE_UNKNOWN_FIELDS: bool = true;

/// Set defaults on a CustomResourceDefinition
///
/// Defaults the spec, then records the storage version in
/// `status.storedVersions` if nothing has been recorded yet.
pub fn set_defaults_custom_resource_definition(crd: &mut CustomResourceDefinition) {
    set_defaults_custom_resource_definition_spec(&mut crd.spec);

    if crd.status.stored_versions.is_empty() {
        if let Some(storage) = crd.spec.versions.iter().find(|v| v.storage) {
            debug!(version = %storage.name, "Defaulting status.storedVersions");
            crd.status.stored_versions.push(storage.name.clone());
        }
    }
}

/// Set defaults on a CustomResourceDefinitionSpec
///
/// The legacy `version` and the `versions` list are each derived from the
/// other when only one is set. When both are set they are left alone, even
/// if they disagree; catching that is validation's job.
pub fn set_defaults_custom_resource_definition_spec(spec: &mut CustomResourceDefinitionSpec) {
    if spec.scope.is_none() {
        spec.scope = Some(DEFAULT_SCOPE);
    }

    if spec.names.singular.is_empty() {
        spec.names.singular = spec.names.kind.to_lowercase();
    }

    if spec.names.list_kind.is_empty() && !spec.names.kind.is_empty() {
        spec.names.list_kind = format!("{}List", spec.names.kind);
    }

    // No versions list: build one from the deprecated version field
    if spec.versions.is_empty() && !spec.version.is_empty() {
        debug!(version = %spec.version, "Deriving versions from legacy version field");
        spec.versions = vec![CustomResourceDefinitionVersion {
            name: spec.version.clone(),
            served: true,
            storage: true,
            ..Default::default()
        }];
    }

    // version mirrors the first entry of versions
    if spec.version.is_empty() {
        if let Some(first) = spec.versions.first() {
            spec.version = first.name.clone();
        }
    }

    let conversion = spec
        .conversion
        .get_or_insert_with(CustomResourceConversion::default);

    if conversion.strategy == ConversionStrategy::Webhook
        && conversion.conversion_review_versions.is_empty()
    {
        conversion.conversion_review_versions = vec![SCHEME_VERSION.to_string()];
    }

    if spec.preserve_unknown_fields.is_none() {
        spec.preserve_unknown_fields = Some(DEFAULT_PRESERVE_UNKNOWN_FIELDS);
    }
}

/// Set defaults on a webhook ServiceReference
pub fn set_defaults_service_reference(service: &mut ServiceReference) {
    if service.port.is_none() {
        service.port = Some(DEFAULT_SERVICE_PORT);
    }
}

#[cfg(test)]
#[path = "defaults_test.rs"]
mod tests;
