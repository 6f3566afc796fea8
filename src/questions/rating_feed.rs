use std::{fs, path::Path};

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Deserialize;

use super::QuestionSource;
use crate::{engine::Question, error::SourceError};

const THRESHOLDS: std::ops::RangeInclusive<u8> = 5..=8;

#[derive(Debug, Clone, Deserialize)]
pub struct MovieFeed {
    pub items: Vec<MovieItem>,
    #[serde(rename = "errorMessage", default)]
    pub error_message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieItem {
    pub title: String,
    #[serde(rename = "imDbRating", default)]
    pub rating: String,
}

impl MovieItem {
    /// Ratings come as strings and may be blank.
    pub fn rating(&self) -> f32 {
        self.rating.trim().parse().unwrap_or(0.0)
    }
}

/// "Is the rating greater than X?" questions about movies from a rating feed.
#[derive(Debug, Clone)]
pub struct RatingFeedQuestions {
    movies: Vec<MovieItem>,
    rng: StdRng,
}

impl RatingFeedQuestions {
    pub fn from_json(json: &str, seed: Option<u64>) -> Result<Self, SourceError> {
        let feed: MovieFeed = serde_json::from_str(json)?;
        if !feed.error_message.is_empty() {
            return Err(SourceError::Feed(feed.error_message));
        }
        if feed.items.is_empty() {
            return Err(SourceError::Empty);
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            movies: feed.items,
            rng,
        })
    }

    pub fn from_file(path: impl AsRef<Path>, seed: Option<u64>) -> Result<Self, SourceError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents, seed)
    }

    pub fn movies(&self) -> &[MovieItem] {
        &self.movies
    }
}

impl QuestionSource for RatingFeedQuestions {
    fn request_next<F>(&mut self, deliver: F)
    where
        F: FnOnce(Result<Question, SourceError>),
    {
        if self.movies.is_empty() {
            return;
        }

        let movie = &self.movies[self.rng.random_range(0..self.movies.len())];
        let threshold = self.rng.random_range(THRESHOLDS);
        let question = Question::new(
            movie.title.clone(),
            format!("Is the rating of this movie greater than {threshold}?"),
            movie.rating() > f32::from(threshold),
        );
        deliver(Ok(question));
    }
}
