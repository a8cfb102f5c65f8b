// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `schema.rs`

#[cfg(test)]
mod tests {
    use super::super::{
        attribute_type, data_source_schema, manifest_schema, resource_schema, AttributeType,
    };
    use crate::crd::{Certificate, Challenge, ClusterIssuer, Issuer};
    use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
        JSONSchemaProps, JSONSchemaPropsOrArray, JSONSchemaPropsOrBool,
    };

    #[test]
    fn test_resource_schema_common_attributes() {
        let schema = resource_schema::<Certificate>();

        let id = schema.attribute("id").unwrap();
        assert!(id.computed && !id.optional && !id.required);

        let field_manager = schema.attribute("field_manager").unwrap();
        assert!(field_manager.optional && field_manager.computed);

        let propagation = schema.attribute("deletion_propagation").unwrap();
        assert_eq!(
            propagation.enum_values.as_deref(),
            Some(&["Orphan".to_string(), "Background".to_string(), "Foreground".to_string()][..])
        );

        assert!(schema.attribute("api_version").unwrap().computed);
        assert!(schema.attribute("kind").unwrap().computed);
        assert!(schema.attribute("spec").unwrap().required);
    }

    #[test]
    fn test_identity_changes_require_replacement() {
        let schema = resource_schema::<Certificate>();
        assert!(schema.attribute("metadata.name").unwrap().requires_replace);
        assert!(schema.attribute("metadata.namespace").unwrap().requires_replace);
        assert!(!schema.attribute("metadata.labels").unwrap().requires_replace);
        assert!(schema.attribute("metadata.uid").unwrap().computed);
    }

    #[test]
    fn test_cluster_scoped_schema_has_no_namespace() {
        let schema = resource_schema::<ClusterIssuer>();
        assert!(schema.attribute("metadata.name").is_some());
        assert!(schema.attribute("metadata.namespace").is_none());

        let namespaced = resource_schema::<Issuer>();
        assert!(namespaced.attribute("metadata.namespace").is_some());
    }

    #[test]
    fn test_spec_attributes_follow_crd() {
        let schema = resource_schema::<Certificate>();

        let secret_name = schema.attribute("spec.secretName").unwrap();
        assert_eq!(secret_name.attribute_type, AttributeType::String);
        assert!(secret_name.required);

        let dns_names = schema.attribute("spec.dnsNames").unwrap();
        assert_eq!(
            dns_names.attribute_type,
            AttributeType::List(Box::new(AttributeType::String))
        );
        assert!(dns_names.optional);

        assert!(schema.attribute("spec.issuerRef.name").unwrap().required);
        assert_eq!(
            schema.attribute("spec.renewBeforePercentage").unwrap().attribute_type,
            AttributeType::Int64
        );
        assert_eq!(
            schema.attribute("spec.isCA").unwrap().attribute_type,
            AttributeType::Bool
        );
    }

    #[test]
    fn test_opaque_fields_are_dynamic() {
        let schema = resource_schema::<Challenge>();
        let pod_template = schema
            .attribute("spec.solver.http01.ingress.podTemplate")
            .unwrap();
        assert_eq!(pod_template.attribute_type, AttributeType::Dynamic);
    }

    #[test]
    fn test_data_source_schema_is_lookup_only() {
        let schema = data_source_schema::<Certificate>();

        assert!(schema.attribute("metadata.name").unwrap().required);
        assert!(schema.attribute("metadata.namespace").unwrap().required);
        assert!(schema.attribute("metadata.labels").unwrap().computed);

        let spec = schema.attribute("spec").unwrap();
        assert!(spec.computed && !spec.required);
        let secret_name = schema.attribute("spec.secretName").unwrap();
        assert!(secret_name.computed && !secret_name.required);
        assert!(!schema.attribute("metadata.name").unwrap().requires_replace);
    }

    #[test]
    fn test_manifest_schema() {
        let schema = manifest_schema::<ClusterIssuer>();
        assert!(schema.attribute("yaml").unwrap().computed);
        assert!(schema.attribute("spec").unwrap().required);
        assert!(schema.attribute("metadata.namespace").is_none());
        assert!(schema.attribute("metadata.uid").is_none());
        assert!(schema.attribute("field_manager").is_none());
    }

    #[test]
    fn test_attribute_type_walks_openapi() {
        let string = JSONSchemaProps {
            type_: Some("string".to_string()),
            ..Default::default()
        };
        let map = JSONSchemaProps {
            type_: Some("object".to_string()),
            additional_properties: Some(JSONSchemaPropsOrBool::Schema(Box::new(string.clone()))),
            ..Default::default()
        };
        assert_eq!(
            attribute_type(&map),
            AttributeType::Map(Box::new(AttributeType::String))
        );

        let list = JSONSchemaProps {
            type_: Some("array".to_string()),
            items: Some(JSONSchemaPropsOrArray::Schema(Box::new(map))),
            ..Default::default()
        };
        assert_eq!(
            attribute_type(&list),
            AttributeType::List(Box::new(AttributeType::Map(Box::new(AttributeType::String))))
        );

        let int_or_string = JSONSchemaProps {
            x_kubernetes_int_or_string: Some(true),
            ..Default::default()
        };
        assert_eq!(attribute_type(&int_or_string), AttributeType::Dynamic);

        let number = JSONSchemaProps {
            type_: Some("number".to_string()),
            ..Default::default()
        };
        assert_eq!(attribute_type(&number), AttributeType::Float64);
    }

    #[test]
    fn test_schema_serializes_to_json() {
        let value = serde_json::to_value(resource_schema::<Issuer>()).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["attributes"]["id"]["type"], "string");
        assert_eq!(value["attributes"]["metadata"]["type"]["object"]["name"]["requires_replace"], true);
    }
}
