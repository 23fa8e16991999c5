pub mod decoder;
pub mod engine;
pub mod handlers;
pub mod prompts;
pub mod session;
pub mod snapshot;

pub use engine::{LoopLimits, LoopOutcome, SkillGapOrchestrator};
