mod phase;
mod question;

pub use phase::Phase;
pub use question::Question;

use log::{debug, info};
use rand::{Rng, seq::SliceRandom};

use crate::error::QuizError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub is_round_finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    pub finished: bool,
    pub next_index: usize,
}

/// Drives one round of yes/no questions.
///
/// Scoring and moving on are separate steps: `submit_answer` scores the
/// current question, `advance` moves to the next one (or finishes the round).
#[derive(Default, Debug, Clone)]
pub struct QuizEngine {
    questions: Vec<Question>,
    current_index: usize,
    correct_count: usize,
    answered: bool,
    phase: Phase,
}

impl QuizEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, questions: Vec<Question>) -> Result<(), QuizError> {
        if questions.is_empty() {
            return Err(QuizError::InvalidInput(
                "a round needs at least one question".to_string(),
            ));
        }

        self.questions = questions;
        self.reset_counters();
        info!("round started with {} questions", self.questions.len());
        Ok(())
    }

    pub fn restart(&mut self) -> Result<(), QuizError> {
        if self.questions.is_empty() {
            return Err(QuizError::NoActiveRound);
        }

        self.reset_counters();
        info!("round restarted");
        Ok(())
    }

    pub fn restart_with(&mut self, questions: Vec<Question>) -> Result<(), QuizError> {
        self.start(questions)
    }

    /// Restarts with the previous questions in a new order.
    pub fn restart_shuffled<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), QuizError> {
        self.questions.shuffle(rng);
        self.restart()
    }

    pub fn current_question(&self) -> Result<&Question, QuizError> {
        match self.phase {
            Phase::InRound => self
                .questions
                .get(self.current_index)
                .ok_or(QuizError::NoActiveRound),
            Phase::Uninitialized | Phase::Finished => Err(QuizError::NoActiveRound),
        }
    }

    pub fn submit_answer(&mut self, choice: bool) -> Result<AnswerOutcome, QuizError> {
        let is_correct = self.current_question()?.is_correct(choice);
        if self.answered {
            return Err(QuizError::AlreadyAnswered(self.current_index));
        }

        self.answered = true;
        if is_correct {
            self.correct_count += 1;
        }

        debug!(
            "question {} answered {}",
            self.question_number(),
            if is_correct { "correctly" } else { "incorrectly" }
        );

        Ok(AnswerOutcome {
            is_correct,
            is_round_finished: self.is_last_question(),
        })
    }

    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        match self.phase {
            Phase::Uninitialized => return Err(QuizError::NoActiveRound),
            Phase::Finished => {
                return Ok(Advance {
                    finished: true,
                    next_index: self.current_index,
                });
            }
            Phase::InRound => (),
        }

        if !self.answered {
            return Err(QuizError::Unanswered(self.current_index));
        }

        if self.is_last_question() {
            self.phase = Phase::Finished;
            info!(
                "round finished: {}/{}",
                self.correct_count,
                self.questions_amount()
            );
            return Ok(Advance {
                finished: true,
                next_index: self.current_index,
            });
        }

        self.current_index += 1;
        self.answered = false;
        Ok(Advance {
            finished: false,
            next_index: self.current_index,
        })
    }

    pub fn questions_amount(&self) -> usize {
        self.questions.len()
    }

    pub fn is_last_question(&self) -> bool {
        !self.questions.is_empty() && self.current_index == self.questions.len() - 1
    }

    pub fn correct_answers(&self) -> usize {
        self.correct_count
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// 1-based position, for counters like "3/10".
    pub fn question_number(&self) -> usize {
        self.current_index + 1
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    fn reset_counters(&mut self) {
        self.current_index = 0;
        self.correct_count = 0;
        self.answered = false;
        self.phase = Phase::InRound;
    }
}
