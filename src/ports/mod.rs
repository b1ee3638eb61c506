pub mod audit;
pub mod evaluator;
pub mod randomizer;
pub mod ranking;
pub mod stats_store;

use crate::engine::events::EventSink;
use std::cell::RefCell;
use std::rc::Rc;

/// the capabilities every hand runs against, assembled once by the
/// session and threaded explicitly; no global state anywhere.
pub struct Services {
    pub evaluator: Rc<dyn evaluator::HandEvaluationEngine>,
    pub randomizer: Rc<RefCell<dyn randomizer::Randomizer>>,
    pub stats: Rc<RefCell<dyn stats_store::PlayersStatisticsStore>>,
    pub audit: Option<Rc<RefCell<dyn audit::HandAuditStore>>>,
    pub events: Rc<dyn EventSink>,
}

impl Services {
    /// bitwise evaluator, OS randomness, volatile stores, no sink:
    /// the default wiring for simulations and tests
    pub fn stock(events: Rc<dyn EventSink>) -> Self {
        Self {
            evaluator: Rc::new(evaluator::BitwiseEvaluationEngine),
            randomizer: Rc::new(RefCell::new(randomizer::DefaultRandomizer::new())),
            stats: Rc::new(RefCell::new(stats_store::MemoryStatisticsStore::default())),
            audit: None,
            events,
        }
    }
}
