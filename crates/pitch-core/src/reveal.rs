use crate::segment::Catalog;
use crate::selector::Assignment;
use crate::types::Checkpoint;
use std::collections::BTreeSet;

/// Operator-facing secrecy for checkpoint assignments.
///
/// Reveal state is a per-checkpoint toggle. Swap mode arms at most one
/// checkpoint at a time; the next tile selection replaces that checkpoint's
/// segment without revealing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealSwapController {
    revealed: BTreeSet<Checkpoint>,
    swap_target: Option<Checkpoint>,
}

impl RevealSwapController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_revealed(&self, checkpoint: Checkpoint) -> bool {
        self.revealed.contains(&checkpoint)
    }

    pub fn swap_target(&self) -> Option<Checkpoint> {
        self.swap_target
    }

    pub fn is_swap_armed(&self, checkpoint: Checkpoint) -> bool {
        self.swap_target == Some(checkpoint)
    }

    /// Returns `true` if the state changed.
    pub fn reveal(&mut self, checkpoint: Checkpoint) -> bool {
        self.revealed.insert(checkpoint)
    }

    /// Returns `true` if the state changed.
    pub fn hide(&mut self, checkpoint: Checkpoint) -> bool {
        self.revealed.remove(&checkpoint)
    }

    /// Flip reveal state; returns the new state.
    pub fn toggle_reveal(&mut self, checkpoint: Checkpoint) -> bool {
        if self.hide(checkpoint) {
            false
        } else {
            self.reveal(checkpoint)
        }
    }

    /// Arm `checkpoint` for swap, or disarm it if it is the armed one.
    /// Arming replaces any other armed checkpoint.
    pub fn toggle_swap_mode(&mut self, checkpoint: Checkpoint) {
        if self.swap_target == Some(checkpoint) {
            self.swap_target = None;
        } else {
            self.swap_target = Some(checkpoint);
        }
    }

    pub fn disarm(&mut self) {
        self.swap_target = None;
    }

    /// Apply a tile selection to the armed checkpoint.
    ///
    /// Returns `false` (state unchanged) when nothing is armed or the name is
    /// not in the catalog; the caller then treats the click as a normal play.
    /// Reveal state is left alone, so a swapped-in segment stays masked
    /// unless the row was already revealed.
    pub fn handle_swap_select(
        &mut self,
        segment_name: &str,
        catalog: &Catalog,
        assignment: &mut Assignment,
    ) -> bool {
        let Some(target) = self.swap_target else {
            return false;
        };
        let Some(segment) = catalog.get(segment_name) else {
            return false;
        };
        assignment.replace(target, segment.clone());
        self.swap_target = None;
        true
    }

    pub fn reset(&mut self) {
        self.revealed.clear();
        self.swap_target = None;
    }
}
