use std::ops::RangeInclusive;
use std::sync::{Mutex, MutexGuard};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;

use crate::actors::RecentActors;
use crate::types::{Genre, GenreList};
use crate::{Result, TmdbError};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w185";
pub const DEFAULT_RECENT_WINDOW: usize = 30;

// ─── TmdbClient ───────────────────────────────────────────────────────────

/// Shared TMDb client. Cheap to share behind an `Arc`; the RNG and the
/// recently-shown actor window are guarded by short, never-awaited locks.
#[derive(Debug)]
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    image_base_url: String,
    api_key: Option<String>,
    pub(crate) recent: Mutex<RecentActors>,
    rng: Mutex<StdRng>,
}

impl TmdbClient {
    /// A client without a key answers every call with
    /// [`TmdbError::NotConfigured`] and never touches the network.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            recent: Mutex::new(RecentActors::new(DEFAULT_RECENT_WINDOW)),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_image_base_url(mut self, image_base_url: impl Into<String>) -> Self {
        self.image_base_url = image_base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_recent_window(self, window: usize) -> Self {
        Self {
            recent: Mutex::new(RecentActors::new(window)),
            ..self
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Full image URL for a `poster_path`/`profile_path`.
    pub fn image_url(&self, path: &str) -> String {
        format!("{}/{}", self.image_base_url, path.trim_start_matches('/'))
    }

    pub async fn genres(&self) -> Result<Vec<Genre>> {
        let list: GenreList = self.get_json("genre/movie/list", None).await?;
        Ok(list.genres)
    }

    // ─── Internal ─────────────────────────────────────────────────────────

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        page: Option<u32>,
    ) -> Result<T> {
        let key = self.api_key.as_deref().ok_or(TmdbError::NotConfigured)?;
        let url = format!("{}/{}", self.base_url, path);

        let mut query = vec![("api_key", key.to_string())];
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }

        tracing::debug!(path, ?page, "tmdb request");
        let resp = self.http.get(&url).query(&query).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            return Err(TmdbError::Status {
                status: status.as_u16(),
                message: status_message(&body),
            });
        }

        serde_json::from_slice(&body).map_err(|source| TmdbError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Lock the RNG. Never hold the guard across an `.await`.
    pub(crate) fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn recent(&self) -> MutexGuard<'_, RecentActors> {
        self.recent.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Clamp a nominal page window to the pages a list really has.
pub(crate) fn page_window(min: u32, max: u32, total_pages: u32) -> RangeInclusive<u32> {
    let hi = max.min(total_pages).max(1);
    let lo = min.min(hi).max(1);
    lo..=hi
}

/// TMDb error bodies carry `status_message`; fall back to the raw text.
fn status_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("status_message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string())
}
