use rand::seq::SliceRandom;
use rand::Rng;

use crate::client::{page_window, TmdbClient};
use crate::types::{Movie, MovieSource, Page};
use crate::{Result, TmdbError};

/// Pages tried before giving up on finding a movie with a poster.
pub const MOVIE_ATTEMPTS: usize = 5;

impl TmdbClient {
    /// Draw one movie with a poster from a random list and page.
    ///
    /// Page 1 of the chosen list is read first to learn how many pages exist;
    /// the nominal window is clamped to that before drawing.
    pub async fn random_movie(&self) -> Result<Movie> {
        let source = {
            let mut rng = self.rng();
            MovieSource::ALL[rng.gen_range(0..MovieSource::ALL.len())]
        };

        let first: Page<Movie> = self.get_json(source.path(), Some(1)).await?;
        let (min, max) = source.pages();
        let window = page_window(min, max, first.total_pages_or(1));

        for attempt in 1..=MOVIE_ATTEMPTS {
            let page = self.rng().gen_range(window.clone());
            let data: Page<Movie> = self.get_json(source.path(), Some(page)).await?;

            let with_posters: Vec<Movie> =
                data.results.into_iter().filter(Movie::has_poster).collect();
            let picked = with_posters.choose(&mut *self.rng()).cloned();
            if let Some(movie) = picked {
                tracing::debug!(?source, page, attempt, movie = %movie.title, "picked movie");
                return Ok(movie);
            }
            tracing::debug!(?source, page, attempt, "no movie with a poster on page");
        }

        Err(TmdbError::NoResults(format!(
            "no movies with posters found after {MOVIE_ATTEMPTS} attempts"
        )))
    }
}
