use std::env;
use std::fmt::Write;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::action::Action;
use crate::bot::Bot;
use crate::error::AgentError;
use crate::state::PlayerView;
use crate::visualize::{VisualOptions, describe_action, render_view_with_options};

pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenAI-compatible chat endpoints the bot knows how to reach.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Provider {
    #[default]
    OpenRouter,
    Groq,
}

impl Provider {
    pub fn parse(name: &str) -> Result<Self, AgentError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "openrouter" => Ok(Provider::OpenRouter),
            "groq" => Ok(Provider::Groq),
            _ => Err(AgentError::UnknownProvider(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Provider::OpenRouter => "openrouter",
            Provider::Groq => "groq",
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Provider::OpenRouter => "https://openrouter.ai/api/v1",
            Provider::Groq => "https://api.groq.com/openai/v1",
        }
    }

    /// Environment variable consulted when no key is configured.
    pub fn api_key_var(self) -> &'static str {
        match self {
            Provider::OpenRouter => "OPENROUTER_API_KEY",
            Provider::Groq => "GROQ_API_KEY",
        }
    }
}

/// Connection settings for [`LlmBot`].
#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub provider: Provider,
    pub model: String,
    /// Falls back to the provider's environment variable when `None`.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Asks a chat model for each move.
///
/// The model sees the rendered player view and a numbered list of the legal
/// actions, and is asked to answer with a single number. Replies that cannot be
/// read, and failed requests, fall back to drawing (or to the first legal
/// action when drawing is not offered), so a flaky endpoint never stalls a game.
pub struct LlmBot {
    name: String,
    model: String,
    endpoint: String,
    api_key: String,
    client: Client,
}

impl LlmBot {
    pub fn new(config: LlmConfig) -> Result<Self, AgentError> {
        let provider = config.provider;
        let api_key = config
            .api_key
            .or_else(|| env::var(provider.api_key_var()).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or(AgentError::MissingApiKey {
                provider: provider.name(),
                var: provider.api_key_var(),
            })?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            name: format!("llm-{}", config.model),
            endpoint: format!("{}/chat/completions", provider.base_url()),
            model: config.model,
            api_key,
            client,
        })
    }

    fn complete(&self, prompt: String) -> Result<String, reqwest::Error> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };
        let response: ChatResponse = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

impl Bot for LlmBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn select_action(
        &mut self,
        view: &PlayerView,
        legal_actions: &[Action],
        _player: &str,
    ) -> Option<Action> {
        if legal_actions.is_empty() {
            return None;
        }
        let prompt = build_prompt(view, legal_actions);
        match self.complete(prompt) {
            Ok(reply) => {
                debug!(bot = %self.name, reply = %reply.trim(), "model reply");
                parse_action_response(&reply, legal_actions).or_else(|| {
                    warn!(bot = %self.name, "unreadable model reply; falling back");
                    fallback(legal_actions)
                })
            }
            Err(err) => {
                warn!(bot = %self.name, error = %err, "model request failed; falling back");
                fallback(legal_actions)
            }
        }
    }
}

/// Prompt sent for one decision.
pub fn build_prompt(view: &PlayerView, legal_actions: &[Action]) -> String {
    let last = legal_actions.len().saturating_sub(1);
    let mut out = format!(
        "You are playing UNO as {}. Choose your action by responding with ONLY the \
         number of your choice (0 to {last}).\n\n",
        view.self_player
    );
    out.push_str(&render_view_with_options(
        view,
        VisualOptions {
            discard_depth: 0,
            show_history: true,
        },
    ));
    out.push_str("\nLegal actions (respond with the number):\n");
    for (index, action) in legal_actions.iter().enumerate() {
        let _ = writeln!(out, "{index}: {}", describe_action(action));
    }
    out.push_str("\nRespond with a single number:");
    out
}

/// Reads a model reply: the first in-range integer wins, otherwise a reply that
/// mentions drawing picks the draw action.
pub fn parse_action_response(reply: &str, legal_actions: &[Action]) -> Option<Action> {
    let reply = reply.trim().to_ascii_uppercase();
    let by_index = reply
        .replace(',', " ")
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| c.is_ascii_punctuation()))
        .filter(|word| !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|word| word.parse::<usize>().ok())
        .find(|&index| index < legal_actions.len());
    if let Some(index) = by_index {
        return Some(legal_actions[index].clone());
    }
    if reply.contains("DRAW") {
        return legal_actions.iter().find(|action| action.is_draw()).cloned();
    }
    None
}

fn fallback(legal_actions: &[Action]) -> Option<Action> {
    legal_actions
        .iter()
        .find(|action| action.is_draw())
        .or_else(|| legal_actions.first())
        .cloned()
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}
