use serde::{Deserialize, Serialize};

// ─── Paging ───────────────────────────────────────────────────────────────

/// One page of a TMDb list endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    /// Absent on some error-ish responses; treated as a single page.
    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl<T> Page<T> {
    pub fn total_pages_or(&self, fallback: u32) -> u32 {
        self.total_pages.filter(|&n| n > 0).unwrap_or(fallback)
    }
}

// ─── Genres ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

// ─── Movies ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl Movie {
    pub fn has_poster(&self) -> bool {
        non_blank(self.poster_path.as_deref())
    }
}

/// The three movie lists a random draw picks from, with the page window
/// used for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieSource {
    Popular,
    NowPlaying,
    TopRated,
}

impl MovieSource {
    pub const ALL: [MovieSource; 3] = [
        MovieSource::Popular,
        MovieSource::NowPlaying,
        MovieSource::TopRated,
    ];

    pub fn path(self) -> &'static str {
        match self {
            MovieSource::Popular => "movie/popular",
            MovieSource::NowPlaying => "movie/now_playing",
            MovieSource::TopRated => "movie/top_rated",
        }
    }

    /// Inclusive page window before clamping to the list's real size.
    pub fn pages(self) -> (u32, u32) {
        match self {
            MovieSource::Popular => (3, 50),
            MovieSource::NowPlaying => (2, 5),
            MovieSource::TopRated => (3, 50),
        }
    }
}

// ─── People ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct KnownFor {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Actor {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub known_for: Vec<KnownFor>,
}

impl Actor {
    pub fn has_profile(&self) -> bool {
        non_blank(self.profile_path.as_deref())
    }
}

fn non_blank(s: Option<&str>) -> bool {
    s.is_some_and(|s| !s.trim().is_empty())
}
