// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Provider Markdown Documentation Generator
//!
//! Generates the Markdown reference of every resource and data source type from
//! the provider schema, so the docs never drift from the typed CRDs.
//!
//! Usage:
//!   cargo run --bin docgen > docs/reference.md

use certmanager_provider::crd::{
    Certificate, CertificateRequest, Challenge, ClusterIssuer, Issuer, Order,
};
use certmanager_provider::import_id::Scope;
use certmanager_provider::kinds::ManagedKind;
use certmanager_provider::provider::{Provider, ProviderContext};
use certmanager_provider::schema::{resource_schema, Attribute, AttributeType, Schema};
use std::collections::BTreeMap;

fn main() {
    println!("# Provider Reference");
    println!();
    println!("Resources and data sources for the cert-manager custom resources.");
    println!();
    println!("> **Note**: This file is AUTO-GENERATED from `src/crd.rs`");
    println!("> DO NOT EDIT MANUALLY - Run `cargo run --bin docgen` to regenerate");
    println!();

    println!("## Table of Contents");
    println!();
    println!("- [Provider Configuration](#provider-configuration)");
    println!("- [cert-manager.io](#cert-managerio)");
    println!("  - [Certificate](#certificate)");
    println!("  - [CertificateRequest](#certificaterequest)");
    println!("  - [Issuer](#issuer)");
    println!("  - [ClusterIssuer](#clusterissuer)");
    println!("- [acme.cert-manager.io](#acmecert-managerio)");
    println!("  - [Challenge](#challenge)");
    println!("  - [Order](#order)");
    println!();

    let provider_schema = Provider::new(ProviderContext::offline(None)).schema();
    if let Some(config) = &provider_schema.provider {
        println!("## Provider Configuration");
        println!();
        println!("{}", config.description);
        println!();
        print_attribute_table(config);
        println!();
    }

    println!("## cert-manager.io");
    println!();
    generate_kind_doc::<Certificate>();
    generate_kind_doc::<CertificateRequest>();
    generate_kind_doc::<Issuer>();
    generate_kind_doc::<ClusterIssuer>();

    println!("## acme.cert-manager.io");
    println!();
    generate_kind_doc::<Challenge>();
    generate_kind_doc::<Order>();
}

fn generate_kind_doc<K: ManagedKind>() {
    let kind = K::kind(&());
    let schema = resource_schema::<K>();

    println!("### {kind}");
    println!();
    println!("**API Version**: `{}`", K::api_version(&()));
    println!();
    println!("{}", K::DESCRIPTION);
    println!();
    println!("| | Type name |");
    println!("| - | --------- |");
    println!("| Resource | `{}` |", K::TYPE_NAME);
    println!("| Data source | `{}` |", K::TYPE_NAME);
    println!("| Manifest data source | `{}_manifest` |", K::TYPE_NAME);
    println!();

    let import_format = match K::SCOPE {
        Scope::Namespaced => "namespace/name",
        Scope::Cluster => "name",
    };
    println!("**Import ID**: `{import_format}`");
    println!();

    println!("#### Attributes");
    println!();
    print_attribute_table(&schema);
    println!();
    println!("---");
    println!();
}

fn print_attribute_table(schema: &Schema) {
    println!("| Attribute | Type | Required | Description |");
    println!("| --------- | ---- | -------- | ----------- |");

    let mut rows = Vec::new();
    collect_rows("", &schema.attributes, &mut rows);
    for (path, attribute) in rows {
        println!(
            "| `{path}` | {} | {} | {} |",
            type_label(&attribute.attribute_type),
            requirement_label(attribute),
            description(attribute)
        );
    }
}

/// Flatten nested attributes into dotted paths; list elements are marked `[]`.
fn collect_rows<'a>(
    prefix: &str,
    attributes: &'a BTreeMap<String, Attribute>,
    rows: &mut Vec<(String, &'a Attribute)>,
) {
    for (name, attribute) in attributes {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        rows.push((path.clone(), attribute));

        match &attribute.attribute_type {
            AttributeType::Object(nested) => collect_rows(&path, nested, rows),
            AttributeType::List(item) => {
                if let AttributeType::Object(nested) = item.as_ref() {
                    collect_rows(&format!("{path}[]"), nested, rows);
                }
            }
            _ => {}
        }
    }
}

fn type_label(attribute_type: &AttributeType) -> String {
    match attribute_type {
        AttributeType::String => "string".to_string(),
        AttributeType::Int64 => "int64".to_string(),
        AttributeType::Float64 => "float64".to_string(),
        AttributeType::Bool => "bool".to_string(),
        AttributeType::Dynamic => "dynamic".to_string(),
        AttributeType::List(item) => format!("list({})", type_label(item)),
        AttributeType::Map(value) => format!("map({})", type_label(value)),
        AttributeType::Object(_) => "object".to_string(),
    }
}

fn requirement_label(attribute: &Attribute) -> &'static str {
    match (attribute.required, attribute.optional, attribute.computed) {
        (true, _, _) => "Yes",
        (false, true, true) => "No (computed)",
        (false, false, true) => "Computed",
        _ => "No",
    }
}

fn description(attribute: &Attribute) -> String {
    let mut text = attribute
        .description
        .as_deref()
        .unwrap_or_default()
        .replace('|', "\\|")
        .replace('\n', " ");
    if let Some(values) = &attribute.enum_values {
        let values: Vec<String> = values.iter().map(|v| format!("`{v}`")).collect();
        text.push_str(&format!(" One of: {}.", values.join(", ")));
    }
    if attribute.requires_replace {
        text.push_str(" Changing this forces a new resource.");
    }
    text.trim().to_string()
}
