use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing::info;
use wawebjs::cli::{Cli, Commands, ConfigAction, RunOpts};
use wawebjs::config::{validate_config_object, Config};
use wawebjs::{catalog, logging, BatchPolicy, FieldValues, NormalizedResult, ReqwestTransport};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Catalog => {
            println!("{}", serde_json::to_string_pretty(&catalog::form_schema())?);
        }
        Commands::Run(opts) => {
            let config = Config::load(opts.config.as_deref())?;
            validate_config_object(&config)?;
            run(&config, opts).await?;
        }
        Commands::Check(opts) => {
            let config = Config::load(opts.config.as_deref())?;
            validate_config_object(&config)?;
            let transport = ReqwestTransport::new(&config.gateway, &config.http)?;
            let response = transport.check_credentials().await?;
            info!("Gateway at {} is reachable", config.gateway.url);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Config(opts) => match opts.action {
            ConfigAction::Show => {
                let config = Config::load(opts.config.as_deref())?;
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            ConfigAction::Validate => {
                let config = Config::load(opts.config.as_deref())?;
                validate_config_object(&config)?;
                info!("Configuration is valid");
            }
            ConfigAction::Init => {
                Config::write_default(opts.config.as_deref().unwrap_or("wawebjs.json"))?;
                info!("Configuration file created");
            }
        },
        Commands::Version => {
            println!("wawebjs {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

async fn run(config: &Config, opts: RunOpts) -> Result<()> {
    let overrides = FieldValues::from_pairs(&opts.fields).map_err(anyhow::Error::msg)?;
    let items = match opts.items {
        Some(ref path) => load_items(path, &overrides)?,
        None => vec![overrides],
    };

    let policy = if opts.continue_on_fail {
        BatchPolicy::ContinueOnFail
    } else {
        BatchPolicy::FailFast
    };

    let transport = ReqwestTransport::new(&config.gateway, &config.http)?;
    let results = wawebjs::execute_batch(
        &transport,
        &config.gateway,
        opts.resource,
        opts.operation,
        &items,
        policy,
    )
    .await?;

    if let Some(ref dir) = opts.output_dir {
        write_attachments(dir, &results)?;
    }

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

/// Read per-item field objects; `-f` values fill in fields an item leaves out.
fn load_items(path: &Path, overrides: &FieldValues) -> Result<Vec<FieldValues>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read items file '{}'", path.display()))?;
    let items: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(&content)
        .with_context(|| format!("Items file '{}' must hold an array of objects", path.display()))?;

    Ok(items
        .into_iter()
        .map(|item| {
            let mut values = overrides.clone();
            for (name, value) in item {
                values.insert(name, value);
            }
            values
        })
        .collect())
}

fn write_attachments(dir: &Path, results: &[NormalizedResult]) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory '{}'", dir.display()))?;

    for (index, result) in results.iter().enumerate() {
        for attachment in result.binary.iter().flat_map(|b| b.values()) {
            let file_name = if results.len() == 1 {
                attachment.file_name.clone()
            } else {
                format!("{index}-{}", attachment.file_name)
            };
            let bytes = attachment
                .decode()
                .with_context(|| format!("Attachment '{file_name}' is not valid base64"))?;
            let path = dir.join(&file_name);
            std::fs::write(&path, bytes)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            info!("Wrote {}", path.display());
        }
    }
    Ok(())
}
