use crate::effects::Effects;
use crate::lesson::{Completion, TimerId, TimerPair};
use tracing::info;

/// Owns the timer pair and applies every mutation to it. Completions are
/// forwarded to the injected effects.
pub struct Controller {
    pair: TimerPair,
    effects: Effects,
}

impl Controller {
    pub fn new(pair: TimerPair, effects: Effects) -> Self {
        Controller { pair, effects }
    }

    pub fn pair(&self) -> &TimerPair {
        &self.pair
    }

    pub fn timer_is_active(&self) -> bool {
        self.pair.running().is_some()
    }

    pub fn start_or_pause(&mut self, id: TimerId) {
        self.pair.start_or_pause(id);
    }

    pub fn reset(&mut self, id: TimerId) {
        self.pair.reset(id);
    }

    pub fn tick(&mut self) -> Option<Completion> {
        let completion = self.pair.tick()?;
        info!(timer = %completion.timer, label = %completion.label, "timer complete");
        self.effects.on_completion(&completion);
        Some(completion)
    }
}
