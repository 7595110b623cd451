//! Defaults for OpenAPI v3 schema trees
//!
//! Array nodes without an explicit `x-kubernetes-list-type` are marked
//! `atomic`, so that server-side apply replaces them as a whole. Every schema
//! reachable from the root is visited.

use std::collections::BTreeMap;

use super::v1beta1::{
    JSONSchemaProps, JSONSchemaPropsOrArray, JSONSchemaPropsOrBool, JSONSchemaPropsOrStringArray,
};

/// List type given to array schemas that don't declare one
pub const DEFAULT_LIST_TYPE: &str = "atomic";

/// Set defaults on a schema node and all of its sub-schemas
///
/// `None` is a no-op.
pub fn set_defaults_json_schema_props(props: Option<&mut JSONSchemaProps>) {
    let Some(props) = props else {
        return;
    };

    if props.type_.as_deref() == Some("array") && props.x_kubernetes_list_type.is_none() {
        props.x_kubernetes_list_type = Some(DEFAULT_LIST_TYPE.to_string());
    }

    match props.items.as_mut() {
        Some(JSONSchemaPropsOrArray::Schema(schema)) => {
            set_defaults_json_schema_props(Some(&mut **schema));
        }
        Some(JSONSchemaPropsOrArray::Schemas(schemas)) => default_schema_list(Some(schemas)),
        None => {}
    }

    default_schema_list(props.all_of.as_mut());
    default_schema_list(props.one_of.as_mut());
    default_schema_list(props.any_of.as_mut());
    set_defaults_json_schema_props(props.not.as_deref_mut());

    default_schema_map(props.properties.as_mut());
    default_schema_or_bool(props.additional_properties.as_mut());
    default_schema_map(props.pattern_properties.as_mut());

    if let Some(dependencies) = props.dependencies.as_mut() {
        for dependency in dependencies.values_mut() {
            // property lists carry no schema
            if let JSONSchemaPropsOrStringArray::Schema(schema) = dependency {
                set_defaults_json_schema_props(Some(&mut **schema));
            }
        }
    }

    default_schema_or_bool(props.additional_items.as_mut());
    default_schema_map(props.definitions.as_mut());
}

fn default_schema_list(schemas: Option<&mut Vec<JSONSchemaProps>>) {
    for schema in schemas.into_iter().flatten() {
        set_defaults_json_schema_props(Some(schema));
    }
}

fn default_schema_map(schemas: Option<&mut BTreeMap<String, JSONSchemaProps>>) {
    for schema in schemas.into_iter().flat_map(BTreeMap::values_mut) {
        set_defaults_json_schema_props(Some(schema));
    }
}

fn default_schema_or_bool(value: Option<&mut JSONSchemaPropsOrBool>) {
    if let Some(JSONSchemaPropsOrBool::Schema(schema)) = value {
        set_defaults_json_schema_props(Some(&mut **schema));
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
