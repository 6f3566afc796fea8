use rand::{Rng, rng, seq::SliceRandom};

use super::QuestionSource;
use crate::{engine::Question, error::SourceError};

const PROMPT: &str = "Is the rating of this movie greater than 6?";

const MOVIES: [(&str, bool); 10] = [
    ("The Godfather", true),
    ("The Dark Knight", true),
    ("Kill Bill", true),
    ("The Avengers", true),
    ("Deadpool", true),
    ("The Green Knight", true),
    ("Old", false),
    ("The Ice Age Adventures of Buck Wild", false),
    ("Tesla", false),
    ("Vivarium", false),
];

/// The embedded list of ten movies. Wraps around when exhausted.
#[derive(Debug, Clone)]
pub struct StaticQuestions {
    questions: Vec<Question>,
    next: usize,
}

impl StaticQuestions {
    pub fn in_order() -> Self {
        Self {
            questions: MOVIES
                .iter()
                .map(|&(title, answer)| Question::new(title, PROMPT, answer))
                .collect(),
            next: 0,
        }
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut source = Self::in_order();
        source.questions.shuffle(rng);
        source
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Default for StaticQuestions {
    fn default() -> Self {
        Self::shuffled(&mut rng())
    }
}

impl QuestionSource for StaticQuestions {
    fn request_next<F>(&mut self, deliver: F)
    where
        F: FnOnce(Result<Question, SourceError>),
    {
        if self.questions.is_empty() {
            return;
        }

        let question = self.questions[self.next % self.questions.len()].clone();
        self.next = (self.next + 1) % self.questions.len();
        deliver(Ok(question));
    }
}
