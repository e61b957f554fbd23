//! `slidescript providers` subcommands.

use anyhow::{Result, anyhow};
use comfy_table::{Cell, Color};
use slidescript_core::{LlmProvider, ScriptConfig, build_provider};
use slidescript_llms::ProviderRegistry;

use crate::cli::ProvidersAction;
use crate::output;

struct ProviderInfo {
    provider: LlmProvider,
    model: String,
    has_key: bool,
}

/// Register every backend that has a key. The selected backend keeps its full
/// environment config (model, base URL); the others use their defaults.
fn build_registry() -> Result<(ProviderRegistry, Vec<ProviderInfo>)> {
    let selected = ScriptConfig::from_env()?;
    let mut registry = ProviderRegistry::new();
    let mut infos = Vec::new();

    for provider in LlmProvider::ALL {
        let config = if provider == selected.provider {
            selected.clone()
        } else {
            let mut config = ScriptConfig::new(provider);
            config.api_key = std::env::var(provider.api_key_env())
                .ok()
                .filter(|k| !k.trim().is_empty());
            config
        };

        let has_key = config.api_key.is_some();
        if has_key {
            registry = registry.register_shared(provider.as_str(), build_provider(&config)?);
        }
        infos.push(ProviderInfo {
            provider,
            model: config.model,
            has_key,
        });
    }

    Ok((registry, infos))
}

pub async fn handle(action: ProvidersAction) -> Result<()> {
    match action {
        ProvidersAction::List => list(),
        ProvidersAction::Test { provider } => test(&provider).await,
        ProvidersAction::Models { provider } => models(&provider).await,
    }
}

fn list() -> Result<()> {
    let (_, infos) = build_registry()?;

    output::header("Generation backends");

    let mut table = output::table(&["Provider", "Status", "Model", "Key variable"]);
    let mut items = Vec::new();
    for info in &infos {
        let status = if info.has_key {
            Cell::new("configured").fg(Color::Green)
        } else {
            Cell::new("missing API key").fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(info.provider.as_str()).fg(Color::Green),
            status,
            Cell::new(&info.model),
            Cell::new(info.provider.api_key_env()),
        ]);
        items.push(serde_json::json!({
            "provider": info.provider.as_str(),
            "configured": info.has_key,
            "model": info.model,
            "key_env": info.provider.api_key_env(),
        }));
    }

    output::table_print(&table, &items);
    Ok(())
}

async fn test(provider_id: &str) -> Result<()> {
    let (registry, _) = build_registry()?;
    let provider = registry
        .get_provider(provider_id)
        .map_err(|_| anyhow!("{provider_id} is unknown or has no API key configured"))?;

    let spinner = output::spinner(&format!("Testing {provider_id} connectivity..."));

    match provider.list_models().await {
        Ok(models) => {
            output::spinner_success(
                &spinner,
                &format!("{provider_id} is reachable ({} models)", models.len()),
            );
            Ok(())
        }
        Err(e) => {
            output::spinner_error(&spinner, &format!("{provider_id} connection failed"));
            Err(anyhow!("Provider test failed: {e}"))
        }
    }
}

async fn models(provider_id: &str) -> Result<()> {
    let (registry, _) = build_registry()?;
    let provider = registry
        .get_provider(provider_id)
        .map_err(|_| anyhow!("{provider_id} is unknown or has no API key configured"))?;

    let spinner = output::spinner(&format!("Fetching models for {provider_id}..."));

    match provider.list_models().await {
        Ok(mut models) => {
            spinner.finish_and_clear();
            output::header(&format!("Models for {provider_id}"));

            if models.is_empty() {
                output::dim("No models returned");
                return Ok(());
            }

            models.sort();
            let mut table = output::table(&["Model"]);
            let items: Vec<_> = models
                .iter()
                .map(|m| {
                    table.add_row(vec![Cell::new(m).fg(Color::Green)]);
                    serde_json::json!({ "model": m })
                })
                .collect();

            output::table_print(&table, &items);
            Ok(())
        }
        Err(e) => {
            output::spinner_error(&spinner, "Failed to fetch models");
            Err(anyhow!("Failed to list models: {e}"))
        }
    }
}
