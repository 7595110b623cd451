#![allow(clippy::unwrap_used)] // Tests can use unwrap for brevity
#![allow(clippy::expect_used)] // Tests can use expect for better error messages

use super::*;
use serde_json::json;

#[test]
fn test_crd_is_a_kube_resource() {
    use kube::Resource;

    assert_eq!(
        CustomResourceDefinition::api_version(&()),
        "apiextensions.k8s.io/v1beta1"
    );
    assert_eq!(
        CustomResourceDefinition::kind(&()),
        "CustomResourceDefinition"
    );
    assert_eq!(
        CustomResourceDefinition::plural(&()),
        "customresourcedefinitions"
    );

    let mut crd = CustomResourceDefinition::default();
    crd.meta_mut().name = Some("widgets.example.com".to_string());
    assert_eq!(crd.metadata.name.as_deref(), Some("widgets.example.com"));
}

#[test]
fn test_crd_deserialize_from_yaml() {
    let yaml = r#"
apiVersion: apiextensions.k8s.io/v1beta1
kind: CustomResourceDefinition
metadata:
  name: widgets.example.com
spec:
  group: example.com
  scope: Cluster
  names:
    plural: widgets
    kind: Widget
    shortNames: [wd]
  versions:
  - name: v1
    served: true
    storage: true
    deprecated: true
    deprecationWarning: use v2
  conversion:
    strategy: Webhook
    conversionReviewVersions: [v1, v1beta1]
    webhookClientConfig:
      service:
        namespace: widgets-system
        name: widget-converter
        port: 8443
  preserveUnknownFields: false
status:
  storedVersions: [v1]
"#;

    let crd: CustomResourceDefinition =
        serde_yaml::from_str(yaml).expect("Failed to deserialize CRD");

    let types = crd.types.as_ref().unwrap();
    assert_eq!(types.api_version, "apiextensions.k8s.io/v1beta1");
    assert_eq!(types.kind, "CustomResourceDefinition");
    assert_eq!(crd.spec.scope, Some(ResourceScope::Cluster));
    assert_eq!(crd.spec.names.short_names, vec!["wd"]);
    assert_eq!(crd.spec.version, "");
    assert_eq!(crd.spec.versions[0].deprecated, Some(true));
    assert_eq!(
        crd.spec.versions[0].deprecation_warning.as_deref(),
        Some("use v2")
    );
    assert_eq!(crd.spec.preserve_unknown_fields, Some(false));

    let conversion = crd.spec.conversion.unwrap();
    assert_eq!(conversion.strategy, ConversionStrategy::Webhook);
    assert_eq!(conversion.conversion_review_versions, vec!["v1", "v1beta1"]);
    let service = conversion.webhook_client_config.unwrap().service.unwrap();
    assert_eq!(service.port, Some(8443));
    assert_eq!(service.path, None);

    assert_eq!(crd.status.stored_versions, vec!["v1"]);
}

#[test]
fn test_minimal_crd_deserializes_with_unset_fields() {
    let crd: CustomResourceDefinition = serde_json::from_value(json!({
        "apiVersion": "apiextensions.k8s.io/v1beta1",
        "kind": "CustomResourceDefinition",
        "spec": {"group": "example.com", "names": {"plural": "widgets", "kind": "Widget"}}
    }))
    .unwrap();

    assert_eq!(crd.spec.scope, None);
    assert_eq!(crd.spec.names.singular, "");
    assert_eq!(crd.spec.names.list_kind, "");
    assert!(crd.spec.versions.is_empty());
    assert!(crd.spec.conversion.is_none());
    assert!(crd.spec.preserve_unknown_fields.is_none());
    assert!(crd.status.stored_versions.is_empty());
}

#[test]
fn test_unset_fields_are_omitted_when_serialized() {
    let spec = CustomResourceDefinitionSpec {
        group: "example.com".to_string(),
        names: CustomResourceDefinitionNames {
            plural: "widgets".to_string(),
            kind: "Widget".to_string(),
            ..Default::default()
        },
        ..Default::default()
    };

    let value = serde_json::to_value(&spec).unwrap();

    assert_eq!(
        value,
        json!({
            "group": "example.com",
            "names": {"plural": "widgets", "kind": "Widget"}
        })
    );
}

#[test]
fn test_conversion_strategy_wire_names() {
    assert_eq!(
        serde_json::to_value(ConversionStrategy::None).unwrap(),
        json!("None")
    );
    assert_eq!(
        serde_json::to_value(ConversionStrategy::Webhook).unwrap(),
        json!("Webhook")
    );
    assert_eq!(
        serde_json::to_value(ResourceScope::Namespaced).unwrap(),
        json!("Namespaced")
    );
}

#[test]
fn test_empty_scope_reads_as_unset() {
    let spec: CustomResourceDefinitionSpec =
        serde_json::from_value(json!({"group": "example.com", "scope": ""})).unwrap();
    assert_eq!(spec.scope, None);

    let spec: CustomResourceDefinitionSpec =
        serde_json::from_value(json!({"group": "example.com", "scope": null})).unwrap();
    assert_eq!(spec.scope, None);

    let err = serde_json::from_value::<CustomResourceDefinitionSpec>(
        json!({"group": "example.com", "scope": "Everywhere"}),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Everywhere"), "got {}", err);
}

#[test]
fn test_printer_columns_use_v1beta1_wire_names() {
    let column = CustomResourceColumnDefinition {
        name: "Age".to_string(),
        type_: "date".to_string(),
        json_path: ".metadata.creationTimestamp".to_string(),
        ..Default::default()
    };

    assert_eq!(
        serde_json::to_value(&column).unwrap(),
        json!({"name": "Age", "type": "date", "JSONPath": ".metadata.creationTimestamp"})
    );
}

#[test]
fn test_unmodelled_fields_survive_round_trip() {
    let wire = json!({
        "group": "example.com",
        "names": {"plural": "widgets", "kind": "Widget", "x-names-note": "kept"},
        "versions": [{
            "name": "v1",
            "served": true,
            "storage": true,
            "additionalPrinterColumns": [
                {"name": "Size", "type": "integer", "priority": 1, "JSONPath": ".spec.size"}
            ],
            "x-version-note": {"nested": [1, 2]}
        }],
        "conversion": {
            "strategy": "Webhook",
            "webhookClientConfig": {
                "service": {"namespace": "default", "name": "converter", "x-port-name": "https"}
            }
        },
        "x-spec-note": "kept"
    });

    let spec: CustomResourceDefinitionSpec = serde_json::from_value(wire.clone()).unwrap();

    assert_eq!(spec.extra["x-spec-note"], json!("kept"));
    assert_eq!(spec.versions[0].additional_printer_columns[0].priority, Some(1));
    assert_eq!(serde_json::to_value(&spec).unwrap(), wire);
}
