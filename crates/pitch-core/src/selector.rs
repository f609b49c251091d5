use crate::segment::{Catalog, Segment};
use crate::types::Checkpoint;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// Checkpoint → segment mapping for the current run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Assignment {
    slots: BTreeMap<Checkpoint, Segment>,
}

impl Assignment {
    pub fn get(&self, checkpoint: Checkpoint) -> Option<&Segment> {
        self.slots.get(&checkpoint)
    }

    pub fn contains(&self, checkpoint: Checkpoint) -> bool {
        self.slots.contains_key(&checkpoint)
    }

    /// Single-slot replacement, used by the swap workflow.
    pub fn replace(&mut self, checkpoint: Checkpoint, segment: Segment) -> Option<Segment> {
        self.slots.insert(checkpoint, segment)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Draw segments for `checkpoints` without replacement, in checkpoint order.
///
/// Checkpoints beyond the catalog size fall back to the first drawn segment,
/// so a one-segment catalog assigns that segment everywhere. An empty
/// catalog yields an empty assignment.
pub fn select_for_checkpoints<R: Rng + ?Sized>(
    catalog: &Catalog,
    checkpoints: &[Checkpoint],
    rng: &mut R,
) -> Assignment {
    let mut assignment = Assignment::default();
    if catalog.is_empty() {
        tracing::warn!("no segments available for selection");
        return assignment;
    }

    let mut shuffled: Vec<&Segment> = catalog.segments().iter().collect();
    // Fisher–Yates: every ordering of the catalog is equally likely.
    shuffled.shuffle(rng);

    if shuffled.len() < checkpoints.len() {
        tracing::warn!(
            segments = shuffled.len(),
            checkpoints = checkpoints.len(),
            "fewer segments than checkpoints; repeating the first draw"
        );
    }

    for (i, checkpoint) in checkpoints.iter().enumerate() {
        let segment = shuffled.get(i).copied().unwrap_or(shuffled[0]);
        assignment.replace(*checkpoint, segment.clone());
    }
    assignment
}
