// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Provider Schema Generator
//!
//! Writes the provider schema as JSON, one file per resource and data source
//! type plus `provider.schema.json` for the provider configuration block.
//!
//! Usage:
//!   cargo run --bin schemagen [OUTPUT_DIR]
//!
//! Files are written to `schemas/` unless another directory is given.

use certmanager_provider::provider::{Provider, ProviderContext};
use certmanager_provider::schema::Schema;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_OUTPUT_DIR: &str = "schemas";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from);

    fs::create_dir_all(output_dir.join("resources"))?;
    fs::create_dir_all(output_dir.join("data-sources"))?;

    println!("Generating provider schemas from src/crd.rs...");

    let schema = Provider::new(ProviderContext::offline(None)).schema();

    if let Some(provider) = &schema.provider {
        write_schema(&output_dir, "provider", provider)?;
    }
    for (type_name, resource) in &schema.resources {
        write_schema(&output_dir.join("resources"), type_name, resource)?;
    }
    for (type_name, data_source) in &schema.data_sources {
        write_schema(&output_dir.join("data-sources"), type_name, data_source)?;
    }

    println!(
        "✓ Generated {} resource and {} data source schemas in {}/",
        schema.resources.len(),
        schema.data_sources.len(),
        output_dir.display()
    );

    Ok(())
}

fn write_schema(
    output_dir: &Path,
    type_name: &str,
    schema: &Schema,
) -> Result<(), Box<dyn std::error::Error>> {
    let filename = format!("{type_name}.schema.json");
    let mut content = serde_json::to_string_pretty(schema)?;
    content.push('\n');

    fs::write(output_dir.join(&filename), content)?;
    println!("  ✓ Generated {filename}");

    Ok(())
}
