use std::collections::{HashSet, VecDeque};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::client::{page_window, TmdbClient};
use crate::types::{Actor, Page};
use crate::Result;

const PERSON_POPULAR: &str = "person/popular";
/// TMDb refuses pages above 500.
const MAX_PERSON_PAGES: u32 = 500;
pub const ACTORS_PER_TIER: usize = 3;

/// Popularity tiers as nominal page windows, most famous first.
const TIERS: [(u32, u32); 3] = [(3, 20), (20, 75), (75, 150)];

// ─── RecentActors ─────────────────────────────────────────────────────────

/// Bounded window of actor ids shown in earlier draws, oldest evicted first.
#[derive(Debug, Clone)]
pub struct RecentActors {
    ids: VecDeque<u64>,
    capacity: usize,
}

impl RecentActors {
    pub fn new(capacity: usize) -> Self {
        Self {
            ids: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// Record `id`. An id already in the window keeps its position.
    pub fn record(&mut self, id: u64) {
        if !self.contains(id) {
            self.ids.push_back(id);
        }
        while self.ids.len() > self.capacity {
            self.ids.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// ─── Draw ─────────────────────────────────────────────────────────────────

impl TmdbClient {
    /// Draw up to nine actors with profile photos across three popularity
    /// tiers, skipping anyone shown recently or already drawn this call.
    ///
    /// Only the first-page request is fatal; a tier whose page fails is skipped.
    pub async fn popular_actors(&self) -> Result<Vec<Actor>> {
        let first: Page<Actor> = self.get_json(PERSON_POPULAR, Some(1)).await?;
        let total_pages = first.total_pages_or(MAX_PERSON_PAGES).min(MAX_PERSON_PAGES);

        let mut picked: Vec<Actor> = Vec::new();
        let mut seen: HashSet<u64> = HashSet::new();

        for (min, max) in TIERS {
            let page = self.rng().gen_range(page_window(min, max, total_pages));
            let data: Page<Actor> = match self.get_json(PERSON_POPULAR, Some(page)).await {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(page, error = %e, "skipping actor tier");
                    continue;
                }
            };
            let tier = self.pick_tier(data.results, &seen);
            tracing::debug!(page, count = tier.len(), "actor tier drawn");
            seen.extend(tier.iter().map(|a| a.id));
            picked.extend(tier);
        }

        picked.shuffle(&mut *self.rng());

        let mut recent = self.recent();
        for actor in &picked {
            recent.record(actor.id);
        }
        Ok(picked)
    }

    fn pick_tier(&self, candidates: Vec<Actor>, seen: &HashSet<u64>) -> Vec<Actor> {
        let recent = self.recent();
        let mut eligible: Vec<Actor> = candidates
            .into_iter()
            .filter(|a| a.has_profile() && !seen.contains(&a.id) && !recent.contains(a.id))
            .collect();
        drop(recent);

        eligible.shuffle(&mut *self.rng());
        eligible.truncate(ACTORS_PER_TIER);
        eligible
    }
}
