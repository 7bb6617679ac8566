use alloc::collections::BTreeSet;
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Synchronization point over a declared set of named resources.
///
/// Names are declared up front and ticked off as each load signals ready;
/// completion is reported exactly once, when the set drains. Undeclared or
/// repeated names never advance the barrier. There is no timeout: a
/// resource that never signals ready stalls the barrier indefinitely.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadBarrier {
    outstanding: BTreeSet<String>,
    completed: bool,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BarrierOutcome {
    /// Declared names are still outstanding.
    Pending,
    /// The last declared name just signaled ready.
    Completed,
    /// The name was unknown, repeated, or arrived after completion.
    NoChange,
}

impl BarrierOutcome {
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl LoadBarrier {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let outstanding: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        // An empty declaration is vacuously complete; no Completed outcome
        // will ever fire for it.
        let completed = outstanding.is_empty();
        Self {
            outstanding,
            completed,
        }
    }

    pub fn mark_ready(&mut self, name: &str) -> BarrierOutcome {
        if self.completed {
            return BarrierOutcome::NoChange;
        }
        if !self.outstanding.remove(name) {
            log::warn!("undeclared resource signaled ready: {}", name);
            return BarrierOutcome::NoChange;
        }
        if self.outstanding.is_empty() {
            self.completed = true;
            BarrierOutcome::Completed
        } else {
            BarrierOutcome::Pending
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }
}

/// Join point for the two setup legs: the sound load, and the
/// graphics-load -> tile-slice -> board-build chain.
///
/// Readiness is signaled exactly once, after both legs finish, in whichever
/// order they complete.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SetupPipeline {
    sounds_loaded: bool,
    board_built: bool,
    ready_signaled: bool,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PipelineOutcome {
    Pending,
    Ready,
    NoChange,
}

impl PipelineOutcome {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl SetupPipeline {
    pub fn mark_sounds_loaded(&mut self) -> PipelineOutcome {
        if self.sounds_loaded {
            return PipelineOutcome::NoChange;
        }
        self.sounds_loaded = true;
        self.join()
    }

    pub fn mark_board_built(&mut self) -> PipelineOutcome {
        if self.board_built {
            return PipelineOutcome::NoChange;
        }
        self.board_built = true;
        self.join()
    }

    fn join(&mut self) -> PipelineOutcome {
        if self.sounds_loaded && self.board_built && !self.ready_signaled {
            self.ready_signaled = true;
            PipelineOutcome::Ready
        } else {
            PipelineOutcome::Pending
        }
    }
}

/// Top-level controller phases.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    Uninitialized,
    LoadingAssets,
    SlicingTiles,
    BoardReady,
    Playing,
    Resolving,
    Rebuilding,
}

impl GamePhase {
    /// Whether cell activations should reach the board. Flips attempted
    /// while a resolution is pending are rejected by the board itself.
    pub const fn accepts_input(self) -> bool {
        matches!(self, Self::BoardReady | Self::Playing | Self::Resolving)
    }
}

impl Default for GamePhase {
    fn default() -> Self {
        Self::Uninitialized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barrier_completes_exactly_once() {
        let mut barrier = LoadBarrier::new(["flip", "match"]);

        assert_eq!(barrier.mark_ready("flip"), BarrierOutcome::Pending);
        assert_eq!(barrier.mark_ready("match"), BarrierOutcome::Completed);
        assert_eq!(barrier.mark_ready("match"), BarrierOutcome::NoChange);
        assert!(barrier.is_complete());
    }

    #[test]
    fn undeclared_names_never_advance_the_barrier() {
        let mut barrier = LoadBarrier::new(["closed_tile", "tile_sheet"]);

        assert_eq!(barrier.mark_ready("intruder"), BarrierOutcome::NoChange);
        assert_eq!(barrier.mark_ready("closed_tile"), BarrierOutcome::Pending);
        assert_eq!(barrier.mark_ready("closed_tile"), BarrierOutcome::NoChange);
        assert_eq!(barrier.outstanding(), 1);
        assert!(!barrier.is_complete());
    }

    #[test]
    fn pipeline_joins_once_in_either_order() {
        let mut pipeline = SetupPipeline::default();
        assert_eq!(pipeline.mark_board_built(), PipelineOutcome::Pending);
        assert_eq!(pipeline.mark_sounds_loaded(), PipelineOutcome::Ready);
        assert_eq!(pipeline.mark_sounds_loaded(), PipelineOutcome::NoChange);

        let mut pipeline = SetupPipeline::default();
        assert_eq!(pipeline.mark_sounds_loaded(), PipelineOutcome::Pending);
        assert_eq!(pipeline.mark_board_built(), PipelineOutcome::Ready);
        assert_eq!(pipeline.mark_board_built(), PipelineOutcome::NoChange);
    }

    #[test]
    fn interactive_phases_accept_input() {
        assert!(GamePhase::BoardReady.accepts_input());
        assert!(GamePhase::Playing.accepts_input());
        assert!(GamePhase::Resolving.accepts_input());
        assert!(!GamePhase::LoadingAssets.accepts_input());
        assert!(!GamePhase::Rebuilding.accepts_input());
    }
}
