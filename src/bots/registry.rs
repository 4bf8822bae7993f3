use std::error::Error;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bot::Bot;
use crate::bots::{HeuristicBot, HumanBot, LlmBot, LlmConfig, Provider, RandomBot};

/// Returns a normalized label for a bot spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

/// Create a bot instance from a CLI-style spec.
/// Supported specs:
/// - human[:name]
/// - random[:seed]
/// - eager[:seed]
/// - heuristic
/// - llm[:[provider:]model] (provider and key from the environment defaults)
pub fn create_bot_from_spec(
    spec: &str,
    index: usize,
    seed: u64,
) -> Result<Box<dyn Bot>, Box<dyn Error>> {
    create_bot_with_llm(spec, index, seed, &LlmConfig::default())
}

/// Like [`create_bot_from_spec`], with `llm` settings the spec can override.
pub fn create_bot_with_llm(
    spec: &str,
    index: usize,
    seed: u64,
    llm: &LlmConfig,
) -> Result<Box<dyn Bot>, Box<dyn Error>> {
    let bot_seed = || {
        spec.split_once(':')
            .and_then(|(_, value)| value.trim().parse::<u64>().ok())
            .unwrap_or(seed ^ ((index as u64 + 1) * 0x9E37_79B9))
    };
    match label_for_spec(spec).as_str() {
        "human" => {
            let name = spec
                .split_once(':')
                .map(|(_, name)| name.trim().to_string())
                .unwrap_or_else(|| format!("Human {index}"));
            Ok(Box::new(HumanBot::new(name)))
        }
        "random" => Ok(Box::new(RandomBot::new(StdRng::seed_from_u64(bot_seed())))),
        "eager" => Ok(Box::new(RandomBot::eager(StdRng::seed_from_u64(bot_seed())))),
        "heuristic" => Ok(Box::new(HeuristicBot::new())),
        "llm" => {
            let config = match spec.split_once(':') {
                Some((_, rest)) => llm_config_for(rest.trim(), llm),
                None => llm.clone(),
            };
            Ok(Box::new(LlmBot::new(config)?))
        }
        _ => Err(format!("unrecognized bot spec: {spec}").into()),
    }
}

/// Splits `[provider:]model`. Model names may contain ':' themselves
/// (`meta-llama/llama-3-8b-instruct:free`), so only a known provider name is
/// taken as the prefix.
fn llm_config_for(rest: &str, base: &LlmConfig) -> LlmConfig {
    let mut config = base.clone();
    let model = match rest.split_once(':') {
        Some((head, model)) => match Provider::parse(head) {
            Ok(provider) => {
                config.provider = provider;
                model
            }
            Err(_) => rest,
        },
        None => match Provider::parse(rest) {
            Ok(provider) => {
                config.provider = provider;
                ""
            }
            Err(_) => rest,
        },
    };
    if !model.trim().is_empty() {
        config.model = model.trim().to_string();
    }
    config
}
