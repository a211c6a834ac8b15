//! # elasticachectl
//!
//! Read-only command-line access to the resources behind an ElastiCache
//! replication group. Every command prints JSON.
//!
//! ## Usage
//!
//! ```bash
//! # Describe a replication group
//! elasticachectl replication-group orders-cache
//!
//! # List every parameter of a parameter group
//! elasticachectl parameters orders-cache-params
//!
//! # Engine defaults for a family
//! elasticachectl engine-defaults redis7
//!
//! # Security groups by tag
//! elasticachectl security-groups --filter tag:app=orders
//!
//! # Against a local emulator
//! elasticachectl --endpoint-url http://localhost:4566 subnet-group orders-cache
//!
//! # Request counts and latencies in Prometheus text format on stderr
//! elasticachectl --metrics engine-defaults redis7
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use elasticache_provisioner::config::aws::load_sdk_config;
use elasticache_provisioner::observability;
use elasticache_provisioner::types::Filter;
use elasticache_provisioner::{ElastiCacheClient, ProvisionerConfig};
use serde::Serialize;
use serde_json::json;

/// ElastiCache provisioner CLI
#[derive(Parser)]
#[command(name = "elasticachectl")]
#[command(about = "Inspect ElastiCache replication groups and their dependencies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// AWS region (overrides AWS_REGION)
    #[arg(long, global = true)]
    region: Option<String>,

    /// Endpoint override for all AWS services (overrides AWS_ENDPOINT_URL)
    #[arg(long, global = true)]
    endpoint_url: Option<String>,

    /// Print request metrics to stderr after the command (same as ENABLE_METRICS=true)
    #[arg(long, global = true)]
    metrics: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe a cache subnet group
    SubnetGroup {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Describe a cache parameter group
    ParameterGroup {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// List every parameter of a cache parameter group
    Parameters {
        #[arg(value_name = "GROUP")]
        group: String,
    },
    /// List the engine default parameters of a family (e.g. redis7)
    EngineDefaults {
        #[arg(value_name = "FAMILY")]
        family: String,
    },
    /// Describe EC2 security groups by id and/or filter
    SecurityGroups {
        /// Security group id (repeatable)
        #[arg(long = "id", value_name = "ID")]
        ids: Vec<String>,

        /// Filter as name=value1,value2 (repeatable)
        #[arg(long = "filter", value_name = "NAME=VALUES", value_parser = parse_filter)]
        filters: Vec<Filter>,
    },
    /// Report whether the auth token secret exists (the token is never printed)
    AuthToken {
        #[arg(value_name = "SECRET_NAME")]
        name: String,
    },
    /// Describe an RBAC user group
    UserGroup {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Describe a replication group
    ReplicationGroup {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Describe the cache cluster nodes of a cluster id
    CacheCluster {
        #[arg(value_name = "ID")]
        id: String,
    },
}

fn parse_filter(raw: &str) -> Result<Filter, String> {
    let (name, values) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUES, got '{raw}'"))?;
    if name.is_empty() {
        return Err(format!("filter name is empty in '{raw}'"));
    }
    Ok(Filter::new(
        name,
        values.split(',').filter(|v| !v.is_empty()),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ProvisionerConfig::from_env();
    if let Some(region) = cli.region {
        config.region = region;
    }
    if let Some(endpoint_url) = cli.endpoint_url {
        config.endpoint_url = Some(endpoint_url);
    }
    config.enable_metrics |= cli.metrics;

    observability::init_tracing(&config)?;
    if config.enable_metrics {
        observability::register_metrics()?;
    }

    let sdk_config = load_sdk_config(&config).await;
    let client = ElastiCacheClient::from_sdk_config(&sdk_config, &config);

    let outcome = run(cli.command, &client).await;
    if config.enable_metrics {
        eprint!("{}", observability::gather_metrics()?);
    }
    outcome
}

async fn run(command: Commands, client: &ElastiCacheClient) -> Result<()> {
    match command {
        Commands::SubnetGroup { name } => print_json(
            &client
                .subnet_groups
                .describe(&name)
                .await
                .with_context(|| format!("Failed to describe subnet group {name}"))?,
        ),
        Commands::ParameterGroup { name } => print_json(
            &client
                .parameter_groups
                .describe(&name)
                .await
                .with_context(|| format!("Failed to describe parameter group {name}"))?,
        ),
        Commands::Parameters { group } => print_json(
            &client
                .parameter_groups
                .list_parameters(&group)
                .await
                .with_context(|| format!("Failed to list parameters of {group}"))?,
        ),
        Commands::EngineDefaults { family } => {
            let defaults = client
                .parameter_groups
                .describe_engine_defaults(&family)
                .await
                .with_context(|| format!("Failed to describe engine defaults for {family}"))?;
            print_json(&defaults.to_vec())
        }
        Commands::SecurityGroups { ids, filters } => {
            if ids.is_empty() && filters.is_empty() {
                bail!("Provide at least one --id or --filter");
            }
            print_json(
                &client
                    .security_groups
                    .describe(&filters, &ids)
                    .await
                    .context("Failed to describe security groups")?,
            )
        }
        Commands::AuthToken { name } => {
            let secret = client
                .auth_tokens
                .get(&name)
                .await
                .with_context(|| format!("Failed to read secret {name}"))?;
            print_json(&json!({
                "name": name,
                "exists": secret.is_some(),
                "arn": secret.as_ref().and_then(|s| s.arn.clone()),
                "versionId": secret.as_ref().and_then(|s| s.version_id.clone()),
            }))
        }
        Commands::UserGroup { id } => print_json(
            &client
                .user_groups
                .describe(&id)
                .await
                .with_context(|| format!("Failed to describe user group {id}"))?,
        ),
        Commands::ReplicationGroup { id } => print_json(
            &client
                .replication_groups
                .describe(&id)
                .await
                .with_context(|| format!("Failed to describe replication group {id}"))?,
        ),
        Commands::CacheCluster { id } => print_json(
            &client
                .replication_groups
                .describe_cluster(&id)
                .await
                .with_context(|| format!("Failed to describe cache cluster {id}"))?,
        ),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}
