//! Defaulting for apiextensions.k8s.io/v1beta1 CustomResourceDefinitions

pub mod crd;
pub mod scheme;

pub use scheme::{Defaulters, Error};
