//! apiextensions.k8s.io/v1beta1 CustomResourceDefinition defaulting
//!
//! - `v1beta1` - the API types
//! - `defaults` - field defaults for the CRD, its spec and webhook service references
//! - `schema` - defaults for OpenAPI schema trees
//! - `objects` - whole-object walkers and the registration hook

pub mod defaults;
pub mod objects;
pub mod schema;
pub mod v1beta1;

pub use defaults::{
    set_defaults_custom_resource_definition, set_defaults_custom_resource_definition_spec,
    set_defaults_service_reference,
};
pub use objects::{
    add_defaulting_funcs, set_object_defaults_custom_resource_definition,
    set_object_defaults_custom_resource_definition_list,
};
pub use schema::set_defaults_json_schema_props;
