pub mod heuristic;
pub mod human;
pub mod llm;
pub mod random;
pub mod registry;

pub use heuristic::HeuristicBot;
pub use human::HumanBot;
pub use llm::{LlmBot, LlmConfig, Provider};
pub use random::RandomBot;
pub use registry::{create_bot_from_spec, create_bot_with_llm, label_for_spec};
