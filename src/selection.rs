//! The spin: a timed run of random name flashes ending in a winner.
//!
//! The engine itself owns no timer. The caller drives it by calling
//! [`SelectionEngine::tick`] once per [`SpinTiming::step_ms`]; the tick that
//! performs the last flash also commits the winner.

use crate::config::{SPIN_STEP_MS, SPIN_TOTAL_MS};
use crate::NameList;
use log::{debug, info, warn};
use rand::Rng;
use std::collections::VecDeque;
use std::fmt;

/// Source of uniform indices in `0..len`.
pub trait IndexSource {
    /// `len` is always at least 1.
    fn next_index(&mut self, len: usize) -> usize;
}

impl IndexSource for rand::rngs::ThreadRng {
    fn next_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Replays a fixed script of indices, for reproducible spins.
///
/// Each draw is reduced modulo `len`; an exhausted script yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedIndices {
    script: VecDeque<usize>,
}

impl ScriptedIndices {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    #[cfg(test)]
    fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl IndexSource for ScriptedIndices {
    fn next_index(&mut self, len: usize) -> usize {
        self.script.pop_front().unwrap_or(0) % len.max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinTiming {
    step_ms: u32,
    total_ms: u32,
}

impl SpinTiming {
    pub const fn new(step_ms: u32, total_ms: u32) -> Self {
        Self { step_ms, total_ms }
    }

    pub fn step_ms(&self) -> u32 {
        self.step_ms
    }

    pub fn total_ms(&self) -> u32 {
        self.total_ms
    }

    /// Number of visible flashes, at least one.
    pub fn flashes(&self) -> u32 {
        self.total_ms.div_ceil(self.step_ms.max(1)).max(1)
    }
}

impl Default for SpinTiming {
    fn default() -> Self {
        Self::new(SPIN_STEP_MS, SPIN_TOTAL_MS)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    /// `displayed` is `None` until the first flash.
    Spinning { displayed: Option<String> },
    Resolved { winner: String },
}

impl SelectionState {
    pub fn is_spinning(&self) -> bool {
        matches!(self, SelectionState::Spinning { .. })
    }

    pub fn winner(&self) -> Option<&str> {
        match self {
            SelectionState::Resolved { winner } => Some(winner),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartRejection {
    NoNames,
    AlreadySpinning,
}

impl fmt::Display for StartRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartRejection::NoNames => write!(f, "no names to pick from"),
            StartRejection::AlreadySpinning => write!(f, "a spin is already running"),
        }
    }
}

impl std::error::Error for StartRejection {}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinStep {
    /// No spin is running; the tick was ignored.
    Inactive,
    Flash(String),
    /// Last flash done and the winner committed (already removed from the list).
    Resolved(String),
    /// The list ran dry mid-spin; back to idle without a winner.
    Abandoned,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    state: SelectionState,
    timing: SpinTiming,
    flashes_done: u32,
}

impl SelectionEngine {
    pub fn new(timing: SpinTiming) -> Self {
        Self {
            state: SelectionState::Idle,
            timing,
            flashes_done: 0,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn timing(&self) -> SpinTiming {
        self.timing
    }

    pub fn is_spinning(&self) -> bool {
        self.state.is_spinning()
    }

    pub fn start(&mut self, names: &NameList) -> Result<(), StartRejection> {
        if self.is_spinning() {
            return Err(StartRejection::AlreadySpinning);
        }
        if names.is_empty() {
            return Err(StartRejection::NoNames);
        }
        self.flashes_done = 0;
        self.state = SelectionState::Spinning { displayed: None };
        info!(
            "Spin started over {} names ({} flashes)",
            names.len(),
            self.timing.flashes()
        );
        Ok(())
    }

    /// Advance the spin by one step, drawing from the list as it is now.
    ///
    /// Draws are with replacement, so a name may flash several times in a row.
    pub fn tick(&mut self, names: &mut NameList, rng: &mut dyn IndexSource) -> SpinStep {
        if !self.is_spinning() {
            return SpinStep::Inactive;
        }
        let Some(flashed) = draw(names, rng) else {
            warn!("Name list emptied during spin, abandoning it");
            self.reset();
            return SpinStep::Abandoned;
        };
        self.flashes_done += 1;

        if self.flashes_done < self.timing.flashes() {
            self.state = SelectionState::Spinning {
                displayed: Some(flashed.clone()),
            };
            return SpinStep::Flash(flashed);
        }

        // The list is non-empty here, the flash above just drew from it.
        let Some(winner) = draw(names, rng) else {
            self.reset();
            return SpinStep::Abandoned;
        };
        names.remove(&winner);
        debug!("Spin finished after {} flashes", self.flashes_done);
        info!("Winner: {}", winner);
        self.state = SelectionState::Resolved {
            winner: winner.clone(),
        };
        SpinStep::Resolved(winner)
    }

    /// Back to idle, dropping any running spin or shown winner.
    pub fn reset(&mut self) {
        self.flashes_done = 0;
        self.state = SelectionState::Idle;
    }
}

fn draw(names: &NameList, rng: &mut dyn IndexSource) -> Option<String> {
    if names.is_empty() {
        return None;
    }
    let index = rng.next_index(names.len());
    names.get(index).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn names(entries: &[&str]) -> NameList {
        let mut list = NameList::new();
        for entry in entries {
            list.add(entry).unwrap();
        }
        list
    }

    fn run_to_end(
        engine: &mut SelectionEngine,
        list: &mut NameList,
        rng: &mut dyn IndexSource,
    ) -> Vec<SpinStep> {
        let mut steps = Vec::new();
        loop {
            let step = engine.tick(list, rng);
            let done = !matches!(step, SpinStep::Flash(_));
            steps.push(step);
            if done {
                return steps;
            }
        }
    }

    #[test]
    fn default_timing_gives_fifty_flashes() {
        assert_eq!(SpinTiming::default().flashes(), 50);
        assert_eq!(SpinTiming::new(120, 6_001).flashes(), 51);
        assert_eq!(SpinTiming::new(100, 0).flashes(), 1);
    }

    #[test]
    fn start_rejects_empty_list() {
        let mut engine = SelectionEngine::default();
        assert_eq!(engine.start(&NameList::new()), Err(StartRejection::NoNames));
        assert_eq!(engine.state(), &SelectionState::Idle);
    }

    #[test]
    fn start_rejects_while_spinning() {
        let mut engine = SelectionEngine::default();
        let list = names(&["A"]);
        engine.start(&list).unwrap();
        assert_eq!(engine.start(&list), Err(StartRejection::AlreadySpinning));
        assert_matches!(engine.state(), SelectionState::Spinning { displayed: None });
    }

    #[test]
    fn scripted_draws_pick_the_fourth_as_winner() {
        let mut engine = SelectionEngine::new(SpinTiming::new(100, 300));
        let mut list = names(&["Anna", "Ben", "Clara"]);
        let mut rng = ScriptedIndices::new([1, 0, 2, 1]);

        engine.start(&list).unwrap();
        let steps = run_to_end(&mut engine, &mut list, &mut rng);

        assert_eq!(
            steps,
            vec![
                SpinStep::Flash("Ben".into()),
                SpinStep::Flash("Anna".into()),
                SpinStep::Resolved("Ben".into()),
            ]
        );
        assert_eq!(engine.state().winner(), Some("Ben"));
        assert_eq!(list.as_slice(), ["Anna", "Clara"]);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn completed_spin_removes_exactly_the_winner() {
        let mut engine = SelectionEngine::default();
        let mut list = names(&["Anna", "Ben", "Clara", "Dora"]);
        let mut rng = rand::rng();

        engine.start(&list).unwrap();
        let steps = run_to_end(&mut engine, &mut list, &mut rng);
        assert_eq!(steps.len(), 50);

        let winner = engine.state().winner().unwrap().to_string();
        assert_eq!(steps.last(), Some(&SpinStep::Resolved(winner.clone())));
        assert_eq!(list.len(), 3);
        assert!(!list.contains(&winner));
    }

    #[test]
    fn flashes_may_repeat_a_name() {
        let mut engine = SelectionEngine::new(SpinTiming::new(10, 40));
        let mut list = names(&["Anna", "Ben"]);
        let mut rng = ScriptedIndices::new([0, 0, 0, 1, 0]);

        engine.start(&list).unwrap();
        let steps = run_to_end(&mut engine, &mut list, &mut rng);
        assert_eq!(steps[0], SpinStep::Flash("Anna".into()));
        assert_eq!(steps[1], SpinStep::Flash("Anna".into()));
        assert_eq!(steps[3], SpinStep::Resolved("Anna".into()));
    }

    #[test]
    fn flash_updates_the_displayed_name() {
        let mut engine = SelectionEngine::new(SpinTiming::new(10, 30));
        let mut list = names(&["Anna", "Ben"]);
        let mut rng = ScriptedIndices::new([1]);

        engine.start(&list).unwrap();
        engine.tick(&mut list, &mut rng);
        assert_eq!(
            engine.state(),
            &SelectionState::Spinning { displayed: Some("Ben".into()) }
        );
    }

    #[test]
    fn ticks_outside_a_spin_are_ignored() {
        let mut engine = SelectionEngine::default();
        let mut list = names(&["Anna"]);
        let mut rng = ScriptedIndices::default();
        assert_eq!(engine.tick(&mut list, &mut rng), SpinStep::Inactive);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn emptied_list_abandons_the_spin() {
        let mut engine = SelectionEngine::default();
        let mut list = names(&["Anna"]);
        let mut rng = ScriptedIndices::default();

        engine.start(&list).unwrap();
        list.remove("Anna");
        assert_eq!(engine.tick(&mut list, &mut rng), SpinStep::Abandoned);
        assert_eq!(engine.state(), &SelectionState::Idle);
    }

    #[test]
    fn restart_clears_previous_winner() {
        let mut engine = SelectionEngine::new(SpinTiming::new(10, 10));
        let mut list = names(&["Anna", "Ben"]);
        let mut rng = ScriptedIndices::new([0, 0]);

        engine.start(&list).unwrap();
        assert_eq!(engine.tick(&mut list, &mut rng), SpinStep::Resolved("Anna".into()));

        engine.start(&list).unwrap();
        assert_eq!(engine.state(), &SelectionState::Spinning { displayed: None });
        assert_eq!(engine.state().winner(), None);
    }
}
