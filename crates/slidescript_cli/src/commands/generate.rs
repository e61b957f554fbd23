//! `slidescript generate`

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use slidescript_core::config::PROVIDER_ENV;
use slidescript_core::{GenerationResult, ScriptConfig, ScriptPipeline, open_source};
use slidescript_llms::{FinishReasonKind, Usage};

use crate::cli::GenerateArgs;
use crate::output;

#[derive(Serialize)]
struct Summary<'a> {
    output: String,
    provider: &'a str,
    model: &'a str,
    finish_reason: FinishReasonKind,
    usage: &'a Usage,
    #[serde(skip_serializing_if = "Option::is_none")]
    script: Option<&'a str>,
}

/// Environment-derived config with the command-line overrides applied.
fn resolve_config<F>(args: &GenerateArgs, lookup: F) -> Result<ScriptConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ScriptConfig::from_lookup(|key| match (&args.provider, key) {
        (Some(provider), PROVIDER_ENV) => Some(provider.clone()),
        _ => lookup(key),
    })?;

    if let Some(model) = &args.model {
        config = config.with_model(model.as_str());
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

fn write_script(path: &Path, result: &GenerationResult) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    std::fs::write(path, &result.text)
        .with_context(|| format!("cannot write script to {}", path.display()))
}

pub async fn handle(args: GenerateArgs) -> Result<()> {
    let config = resolve_config(&args, |key| std::env::var(key).ok())?;
    tracing::debug!(?config, "Resolved configuration");
    let source = open_source(&args.deck)?;
    let pipeline = ScriptPipeline::from_config(&config)?;

    output::header("Generating speaker script");
    output::kv("deck", &args.deck.display().to_string());
    output::kv("provider", config.provider.as_str());
    output::kv("model", &config.model);

    let spinner = output::spinner("Waiting for the backend...");
    let result = match pipeline.run_source(source.as_ref()).await {
        Ok(result) => result,
        Err(e) => {
            output::spinner_error(&spinner, "Generation failed");
            return Err(e.into());
        }
    };

    write_script(&args.output, &result)?;
    output::spinner_success(
        &spinner,
        &format!("Speaker script written to {}", args.output.display()),
    );

    if result.is_truncated() {
        output::warning("The backend hit its token limit; the script may stop mid-slide.");
    }

    if output::is_json() {
        output::data(
            "script",
            &Summary {
                output: args.output.display().to_string(),
                provider: config.provider.as_str(),
                model: result.model.as_deref().unwrap_or(&config.model),
                finish_reason: result.finish_reason.unified,
                usage: &result.usage,
                script: args.print.then_some(result.as_str()),
            },
        );
    } else if args.print {
        println!();
        output::document("script", result.as_str());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidescript_core::LlmProvider;
    use slidescript_core::config::MODEL_ENV;
    use std::path::PathBuf;

    fn args() -> GenerateArgs {
        GenerateArgs {
            deck: PathBuf::from("deck.pptx"),
            output: PathBuf::from("ppt_script.md"),
            provider: None,
            model: None,
            timeout_secs: None,
            print: false,
        }
    }

    fn env(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_environment_only() {
        let config = resolve_config(&args(), env(&[("GROQ_API_KEY", "gsk-1")])).unwrap();
        assert_eq!(config.provider, LlmProvider::Groq);
        assert_eq!(config.api_key.as_deref(), Some("gsk-1"));
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_flags_override_environment() {
        let args = GenerateArgs {
            provider: Some("openai".into()),
            model: Some("gpt-4.1-mini".into()),
            timeout_secs: Some(30),
            ..args()
        };
        let config = resolve_config(
            &args,
            env(&[
                (PROVIDER_ENV, "groq"),
                (MODEL_ENV, "llama-3.1-8b-instant"),
                ("GROQ_API_KEY", "gsk-1"),
                ("OPENAI_API_KEY", "sk-2"),
            ]),
        )
        .unwrap();

        assert_eq!(config.provider, LlmProvider::OpenAI);
        assert_eq!(config.api_key.as_deref(), Some("sk-2"));
        assert_eq!(config.model, "gpt-4.1-mini");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_unknown_provider_flag_fails() {
        let args = GenerateArgs {
            provider: Some("bard".into()),
            ..args()
        };
        assert!(resolve_config(&args, env(&[])).is_err());
    }
}
