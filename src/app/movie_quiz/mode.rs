use std::time::Instant;

use super::view_model::QuizResults;

#[derive(Default, Debug, Clone)]
pub enum Mode {
    #[default]
    Waiting,
    Question,
    Feedback { correct: bool, since: Instant },
    Results(QuizResults),
    Error(String),
}
