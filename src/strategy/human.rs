use super::Strategy;
use crate::engine::action::PlayerAction;
use crate::player::context::CurrentHandContext;
use crate::ports::randomizer::Randomizer;
use std::sync::Arc;
use std::sync::Condvar;
use std::sync::Mutex;
use std::time::Duration;

/// single-slot rendezvous between the engine loop (consumer) and an
/// external UI (producer). the engine parks on `wait` after emitting
/// the awaiting-input event; the UI calls `submit` from its own
/// thread. cancellation is expressed by submitting a fold.
#[derive(Debug, Default)]
pub struct HumanInputSlot {
    pending: Mutex<Option<PlayerAction>>,
    ready: Condvar,
}

impl HumanInputSlot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn submit(&self, action: PlayerAction) {
        let mut pending = self.pending.lock().expect("slot lock");
        *pending = Some(action);
        self.ready.notify_one();
    }

    pub fn try_take(&self) -> Option<PlayerAction> {
        self.pending.lock().expect("slot lock").take()
    }

    /// block until an action arrives, invoking `pump` between waits
    /// so the caller can drain its event queue while idle
    pub fn wait(&self, mut pump: impl FnMut()) -> PlayerAction {
        let mut pending = self.pending.lock().expect("slot lock");
        loop {
            if let Some(action) = pending.take() {
                return action;
            }
            let (guard, _timeout) = self
                .ready
                .wait_timeout(pending, Duration::from_millis(50))
                .expect("slot lock");
            pending = guard;
            pump();
        }
    }
}

/// the engine-side view of a seated human. `decide` blocks on the
/// rendezvous; embedders that drive the hand step by step instead
/// observe `is_human` and deliver the action through `Hand::step`.
pub struct HumanStrategy {
    slot: Arc<HumanInputSlot>,
}

impl HumanStrategy {
    pub fn new(slot: Arc<HumanInputSlot>) -> Self {
        Self { slot }
    }
    pub fn slot(&self) -> Arc<HumanInputSlot> {
        Arc::clone(&self.slot)
    }
}

impl Strategy for HumanStrategy {
    fn decide(
        &mut self,
        _ctx: &CurrentHandContext,
        _randomizer: &mut dyn Randomizer,
    ) -> PlayerAction {
        self.slot.wait(|| {})
    }
    fn label(&self) -> &str {
        "Human"
    }
    fn is_human(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::action::ActionType;

    #[test]
    fn submit_then_take() {
        let slot = HumanInputSlot::new();
        assert!(slot.try_take().is_none());
        slot.submit(PlayerAction::new(0, ActionType::Call, 20));
        let action = slot.try_take().unwrap();
        assert_eq!(action.action, ActionType::Call);
        assert!(slot.try_take().is_none());
    }

    #[test]
    fn wait_wakes_on_cross_thread_submit() {
        let slot = HumanInputSlot::new();
        let producer = Arc::clone(&slot);
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            producer.submit(PlayerAction::fold(3));
        });
        let action = slot.wait(|| {});
        handle.join().unwrap();
        assert_eq!(action, PlayerAction::fold(3));
    }
}
