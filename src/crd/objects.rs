//! Whole-object defaulting and registration
//!
//! Walks a decoded CustomResourceDefinition and applies every field defaulter
//! to the nested structures it owns: the object itself, the conversion
//! webhook's service reference, and every OpenAPI schema (the legacy top-level
//! `validation` as well as per-version schemas).

use kube::core::GroupVersionKind;
use tracing::debug;

use super::defaults::{set_defaults_custom_resource_definition, set_defaults_service_reference};
use super::schema::set_defaults_json_schema_props;
use super::v1beta1::{
    CustomResourceDefinition, CustomResourceDefinitionList, SCHEME_GROUP, SCHEME_VERSION,
};
use crate::scheme::Defaulters;

/// Kind of the CRD list type
pub const LIST_KIND: &str = "CustomResourceDefinitionList";

/// Register the v1beta1 defaulting functions
///
/// This is the only entry point a host needs: afterwards every
/// CustomResourceDefinition or CustomResourceDefinitionList passed through
/// `defaulters` is fully defaulted.
pub fn add_defaulting_funcs(defaulters: &mut Defaulters) {
    defaulters.register_resource(set_object_defaults_custom_resource_definition);
    defaulters.register(
        GroupVersionKind::gvk(SCHEME_GROUP, SCHEME_VERSION, LIST_KIND),
        set_object_defaults_custom_resource_definition_list,
    );
}

/// Apply all defaults reachable from a CustomResourceDefinition
pub fn set_object_defaults_custom_resource_definition(crd: &mut CustomResourceDefinition) {
    debug!(name = ?crd.metadata.name, "Defaulting CustomResourceDefinition");

    set_defaults_custom_resource_definition(crd);

    if let Some(service) = crd
        .spec
        .conversion
        .as_mut()
        .and_then(|conversion| conversion.webhook_client_config.as_mut())
        .and_then(|client_config| client_config.service.as_mut())
    {
        set_defaults_service_reference(service);
    }

    if let Some(validation) = crd.spec.validation.as_mut() {
        set_defaults_json_schema_props(validation.open_api_v3_schema.as_mut());
    }

    for version in &mut crd.spec.versions {
        if let Some(schema) = version.schema.as_mut() {
            set_defaults_json_schema_props(schema.open_api_v3_schema.as_mut());
        }
    }
}

/// Apply all defaults to every item of a CustomResourceDefinitionList
pub fn set_object_defaults_custom_resource_definition_list(list: &mut CustomResourceDefinitionList) {
    for crd in &mut list.items {
        set_object_defaults_custom_resource_definition(crd);
    }
}

#[cfg(test)]
#[path = "objects_test.rs"]
mod tests;
