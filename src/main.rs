// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use certmanager_provider::{
    config::ProviderConfig,
    provider::{Provider, ProviderContext},
};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Manage cert-manager resources as declarative provider types
#[derive(Parser, Debug)]
#[command(name = "certmanager-provider", version, about, long_about = None)]
struct Cli {
    /// Provider configuration file (YAML or JSON)
    #[arg(long, global = true, env = "CERTMANAGER_PROVIDER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the provider schema, or the schema of a single type
    Schema {
        /// Resource or data source type name
        #[arg(long = "type")]
        type_name: Option<String>,
    },

    /// List every resource and data source type
    Types,

    /// Validate a resource or data source configuration without contacting the cluster
    Validate {
        #[command(flatten)]
        document: DocumentArgs,

        /// Validate as the lookup data source sharing the type name
        #[arg(long)]
        data_source: bool,
    },

    /// Compute the planned state of a resource
    Plan {
        #[command(flatten)]
        document: DocumentArgs,

        /// Prior state, if the resource already exists
        #[arg(long)]
        prior: Option<PathBuf>,
    },

    /// Create a resource and print its state
    Create(DocumentArgs),

    /// Update a resource in place and print its state
    Update {
        #[command(flatten)]
        document: DocumentArgs,

        /// Prior state; defaults to the planned document itself
        #[arg(long)]
        prior: Option<PathBuf>,
    },

    /// Refresh a resource's state from the cluster
    Read(DocumentArgs),

    /// Delete a resource
    Delete(DocumentArgs),

    /// Adopt an existing object and print its state
    Import {
        /// Resource type name
        #[arg(long = "type")]
        type_name: String,

        /// `namespace/name`, or `name` for cluster-scoped kinds
        #[arg(long)]
        id: String,
    },

    /// Read an existing object through a data source
    Data(DocumentArgs),

    /// Render a manifest without contacting the cluster
    Manifest(DocumentArgs),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct DocumentArgs {
    /// Resource or data source type name
    #[arg(long = "type")]
    type_name: String,

    /// State document (YAML or JSON)
    #[arg(short, long)]
    file: PathBuf,
}

fn main() -> Result<()> {
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();

    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("certmanager-provider")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    init_logging();

    let config = ProviderConfig::load(cli.config.as_deref())
        .context("Failed to load provider configuration")?;
    debug!(config = ?config, "Loaded provider configuration");

    match cli.command {
        Command::Schema { type_name } => {
            let schema = offline(&config).schema();
            match type_name {
                None => print_json(&serde_json::to_value(&schema)?),
                Some(name) => {
                    let schema = schema
                        .resources
                        .get(&name)
                        .or_else(|| schema.data_sources.get(&name))
                        .with_context(|| format!("Unknown type '{name}'"))?;
                    print_json(&serde_json::to_value(schema)?)
                }
            }
        }
        Command::Types => {
            let provider = offline(&config);
            print_json(&json!({
                "resources": provider.resource_types().collect::<Vec<_>>(),
                "data_sources": provider.data_source_types().collect::<Vec<_>>(),
            }))
        }
        Command::Validate {
            document: args,
            data_source,
        } => {
            let provider = offline(&config);
            let document = read_document(&args.file)?;
            provider.validate(&args.type_name, &document, data_source)?;
            info!(
                type_name = %args.type_name,
                file = %args.file.display(),
                "Configuration is valid"
            );
            Ok(())
        }
        Command::Plan { document, prior } => {
            let provider = offline(&config);
            let proposed = read_document(&document.file)?;
            let prior = prior.as_deref().map(read_document).transpose()?;
            let plan = provider.resource(&document.type_name)?.plan(
                provider.context(),
                prior.as_ref(),
                &proposed,
            )?;
            print_json(&json!({
                "planned_state": plan.planned_state,
                "requires_replace": plan.requires_replace,
            }))
        }
        Command::Create(args) => {
            let provider = Provider::configure(&config).await?;
            let planned = read_document(&args.file)?;
            let state = provider
                .resource(&args.type_name)?
                .create(provider.context(), &planned)
                .await?;
            print_json(&state)
        }
        Command::Update { document, prior } => {
            let provider = Provider::configure(&config).await?;
            let planned = read_document(&document.file)?;
            let prior = match prior {
                Some(path) => read_document(&path)?,
                None => planned.clone(),
            };
            let state = provider
                .resource(&document.type_name)?
                .update(provider.context(), &prior, &planned)
                .await?;
            print_json(&state)
        }
        Command::Read(args) => {
            let provider = Provider::configure(&config).await?;
            let current = read_document(&args.file)?;
            let state = provider
                .resource(&args.type_name)?
                .read(provider.context(), &current)
                .await?;
            print_json(&state.unwrap_or(Value::Null))
        }
        Command::Delete(args) => {
            let provider = Provider::configure(&config).await?;
            let current = read_document(&args.file)?;
            provider
                .resource(&args.type_name)?
                .delete(provider.context(), &current)
                .await?;
            Ok(())
        }
        Command::Import { type_name, id } => {
            let provider = Provider::configure(&config).await?;
            let state = provider
                .resource(&type_name)?
                .import(provider.context(), &id)
                .await?;
            print_json(&state)
        }
        Command::Data(args) => {
            let provider = Provider::configure(&config).await?;
            let document = read_document(&args.file)?;
            let state = provider
                .data_source(&args.type_name)?
                .read(provider.context(), &document)
                .await?;
            print_json(&state)
        }
        Command::Manifest(args) => {
            let provider = offline(&config);
            let document = read_document(&args.file)?;
            let state = provider
                .data_source(&args.type_name)?
                .read(provider.context(), &document)
                .await?;
            print_json(&state)
        }
        Command::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "certmanager-provider",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

/// Initialize logging on stderr so stdout only carries state documents.
///
/// Respects `RUST_LOG` (default `info`) and `RUST_LOG_FORMAT` (`json` or `text`).
fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .compact()
                .init();
        }
    }
}

/// Provider without cluster access, for commands that never call the API.
fn offline(config: &ProviderConfig) -> Provider {
    Provider::new(ProviderContext::offline(config.field_manager.clone()))
}

/// Read a YAML or JSON state document.
fn read_document(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_document(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

/// YAML is a superset of JSON, so one parser covers both.
fn parse_document(contents: &str) -> Result<Value> {
    let document: Value = serde_yaml::from_str(contents)?;
    if !document.is_object() {
        anyhow::bail!("state document must be a mapping");
    }
    Ok(document)
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
