pub mod assigner;
pub mod human;
pub mod profiles;
pub mod tools;

use crate::engine::action::PlayerAction;
use crate::player::context::CurrentHandContext;
use crate::ports::randomizer::Randomizer;

/// a decision policy. consumes a materialized per-decision context
/// and returns one action; the engine validates it, so strategies
/// never self-validate. all randomness flows through the port so a
/// scripted randomizer reproduces every decision.
pub trait Strategy {
    fn decide(
        &mut self,
        ctx: &CurrentHandContext,
        randomizer: &mut dyn Randomizer,
    ) -> PlayerAction;
    fn label(&self) -> &str;
    fn is_human(&self) -> bool {
        false
    }
}

/// plays back a fixed action sequence, then checks or folds.
/// the workhorse of deterministic engine tests and replays.
#[derive(Debug, Default)]
pub struct ScriptedStrategy {
    script: std::collections::VecDeque<PlayerAction>,
}

impl ScriptedStrategy {
    pub fn with_script(script: impl IntoIterator<Item = PlayerAction>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl Strategy for ScriptedStrategy {
    fn decide(
        &mut self,
        ctx: &CurrentHandContext,
        _randomizer: &mut dyn Randomizer,
    ) -> PlayerAction {
        match self.script.pop_front() {
            Some(action) => action,
            None => tools::passive(ctx),
        }
    }
    fn label(&self) -> &str {
        "Scripted"
    }
}
