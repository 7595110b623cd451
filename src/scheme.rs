//! Registry of defaulting functions
//!
//! The host builds a [`Defaulters`] value, lets API packages register their
//! functions into it, and hands it to whatever decodes objects. There is no
//! process-wide registry.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use kube::core::GroupVersionKind;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Errors raised while routing a raw object to its defaulting function
///
/// Defaulting itself cannot fail; these only come from decoding and encoding.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Object is missing apiVersion or kind")]
    MissingTypeMeta,

    #[error("Invalid apiVersion: {0}")]
    InvalidApiVersion(String),

    #[error("No defaulting function registered for {0:?}")]
    NotRegistered(GroupVersionKind),

    #[error("Failed to decode {kind}: {source}")]
    Decode {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode {kind}: {source}")]
    Encode {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

type ApplyFn = Box<dyn Fn(&mut dyn Any) -> bool + Send + Sync>;
type ApplyJsonFn = Box<dyn Fn(Value) -> Result<Value, Error> + Send + Sync>;

struct Registration {
    gvk: GroupVersionKind,
    apply: ApplyFn,
    apply_json: ApplyJsonFn,
}

/// Explicit mapping from object type to its defaulting function
#[derive(Default)]
pub struct Defaulters {
    registrations: HashMap<TypeId, Registration>,
    kinds: HashMap<GroupVersionKind, TypeId>,
}

impl Defaulters {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `defaulter` for objects of type `K`, served as `gvk`
    ///
    /// Registering the same type again replaces the previous function.
    pub fn register<K>(&mut self, gvk: GroupVersionKind, defaulter: fn(&mut K))
    where
        K: Serialize + DeserializeOwned + 'static,
    {
        let apply: ApplyFn = Box::new(move |obj: &mut dyn Any| match obj.downcast_mut::<K>() {
            Some(obj) => {
                defaulter(obj);
                true
            }
            None => false,
        });

        let kind = gvk.kind.clone();
        let apply_json: ApplyJsonFn = Box::new(move |value: Value| {
            let mut obj: K = serde_json::from_value(value).map_err(|source| Error::Decode {
                kind: kind.clone(),
                source,
            })?;
            defaulter(&mut obj);
            serde_json::to_value(&obj).map_err(|source| Error::Encode {
                kind: kind.clone(),
                source,
            })
        });

        let type_id = TypeId::of::<K>();
        let registration = Registration {
            gvk: gvk.clone(),
            apply,
            apply_json,
        };

        if let Some(previous) = self.registrations.insert(type_id, registration) {
            debug!(
                group = %previous.gvk.group,
                version = %previous.gvk.version,
                kind = %previous.gvk.kind,
                "Replacing defaulting function"
            );
            if previous.gvk != gvk {
                self.kinds.remove(&previous.gvk);
            }
        }
        self.kinds.insert(gvk, type_id);
    }

    /// Register `defaulter` for a Kubernetes resource type, taking the
    /// group/version/kind from the type itself
    pub fn register_resource<K>(&mut self, defaulter: fn(&mut K))
    where
        K: kube::Resource<DynamicType = ()> + Serialize + DeserializeOwned + 'static,
    {
        let gvk = GroupVersionKind::gvk(&K::group(&()), &K::version(&()), &K::kind(&()));
        self.register(gvk, defaulter);
    }

    /// Whether a defaulting function is registered for `gvk`
    pub fn is_registered(&self, gvk: &GroupVersionKind) -> bool {
        self.kinds.contains_key(gvk)
    }

    /// All group/version/kinds with a registered defaulting function
    pub fn kinds(&self) -> impl Iterator<Item = &GroupVersionKind> {
        self.kinds.keys()
    }

    /// Apply the defaulting function registered for `K`
    ///
    /// Returns false if nothing is registered for `K`; the object is untouched.
    pub fn default_object<K: 'static>(&self, obj: &mut K) -> bool {
        match self.registrations.get(&TypeId::of::<K>()) {
            Some(registration) => (registration.apply)(obj),
            None => false,
        }
    }

    /// Decode a raw object by its apiVersion/kind, default it, and encode it again
    pub fn default_value(&self, value: Value) -> Result<Value, Error> {
        let gvk = type_meta(&value)?;

        let registration = self
            .kinds
            .get(&gvk)
            .and_then(|type_id| self.registrations.get(type_id))
            .ok_or_else(|| Error::NotRegistered(gvk.clone()))?;

        debug!(kind = %gvk.kind, version = %gvk.version, "Defaulting raw object");
        (registration.apply_json)(value)
    }
}

/// Read the group/version/kind of a raw object
fn type_meta(value: &Value) -> Result<GroupVersionKind, Error> {
    let api_version = value
        .get("apiVersion")
        .and_then(Value::as_str)
        .ok_or(Error::MissingTypeMeta)?;
    let kind = value
        .get("kind")
        .and_then(Value::as_str)
        .filter(|kind| !kind.is_empty())
        .ok_or(Error::MissingTypeMeta)?;

    // Core group objects carry a bare version, e.g. "v1"
    let (group, version) = api_version.split_once('/').unwrap_or(("", api_version));
    if version.is_empty() || version.contains('/') {
        return Err(Error::InvalidApiVersion(api_version.to_string()));
    }

    Ok(GroupVersionKind::gvk(group, version, kind))
}

#[cfg(test)]
#[path = "scheme_test.rs"]
mod tests;
