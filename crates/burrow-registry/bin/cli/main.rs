mod cli;

use crate::cli::{Command, LogFormatArg, CLI};
use anyhow::{bail, Context};
use burrow_core::{CreateParams, Registry, RegistryError};
use burrow_generator::RandomGenerator;
use burrow_registry::{QueryService, RegistryService, RegistrySettings};
use burrow_storage::JsonFileStore;
use clap::Parser;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_format);

    info!(
        store_path = %config.store_path.display(),
        base_url = %config.base_url,
        "opening registry"
    );

    let store = JsonFileStore::new(&config.store_path)
        .await
        .with_context(|| format!("cannot use store at {}", config.store_path.display()))?;
    let settings = RegistrySettings::builder()
        .base_url(config.base_url.clone())
        .build();
    let registry = Arc::new(RegistryService::open(store, RandomGenerator::new(), settings).await?);
    info!(
        max_generation_attempts = registry.settings().max_generation_attempts,
        "registry ready"
    );

    if let Err(e) = run(config.command, registry).await {
        if is_usage_error(&e) {
            eprintln!("error: {}", e);
            std::process::exit(USAGE_EXIT_CODE);
        }
        return Err(e);
    }
    Ok(())
}

/// Exit code for requests rejected because of caller input.
const USAGE_EXIT_CODE: i32 = 2;

fn is_usage_error(e: &anyhow::Error) -> bool {
    e.downcast_ref::<RegistryError>()
        .is_some_and(RegistryError::is_validation)
}

fn init_tracing(format: LogFormatArg) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormatArg::Text => builder.init(),
        LogFormatArg::Json => builder.json().init(),
    }
}

async fn run<R: Registry>(command: Command, registry: Arc<R>) -> anyhow::Result<()> {
    match command {
        Command::Create {
            url,
            code,
            validity,
        } => {
            let params = CreateParams {
                original_url: url,
                custom_shortcode: code,
                validity_minutes: validity,
            };
            print_json(&registry.create(params).await?)
        }
        Command::Resolve {
            code,
            source,
            client,
            no_click,
        } => {
            let Some(record) = registry.resolve(&code).await? else {
                bail!("short code '{}' does not exist or has expired", code);
            };
            if !no_click {
                registry.record_click(&code, &source, &client).await?;
            }
            print_json(&record)
        }
        Command::Click {
            code,
            source,
            client,
        } => {
            registry.record_click(&code, &source, &client).await?;
            info!(shortcode = %code, "click recorded");
            Ok(())
        }
        Command::List => print_json(&QueryService::new(registry).get_all_with_stats().await?),
        Command::Stats => {
            let summary = QueryService::new(registry)
                .summary(jiff::Timestamp::now())
                .await?;
            print_json(&summary)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{}", rendered);
    Ok(())
}
