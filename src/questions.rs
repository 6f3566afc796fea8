mod rating_feed;
mod static_list;

pub use rating_feed::{MovieFeed, MovieItem, RatingFeedQuestions};
pub use static_list::StaticQuestions;

use log::warn;

use crate::{engine::Question, error::SourceError};

/// Hands out questions one at a time.
///
/// `deliver` is called at most once per request. Returning without calling
/// it means no question is available.
pub trait QuestionSource {
    fn request_next<F>(&mut self, deliver: F)
    where
        F: FnOnce(Result<Question, SourceError>);
}

/// Collects `amount` questions for a round, stopping at the first failure.
pub fn draw_round<S: QuestionSource>(
    source: &mut S,
    amount: usize,
) -> Result<Vec<Question>, SourceError> {
    let mut questions = Vec::with_capacity(amount);
    for _ in 0..amount {
        let mut delivered = None;
        source.request_next(|result| delivered = Some(result));

        match delivered {
            Some(Ok(question)) => questions.push(question),
            Some(Err(e)) => {
                warn!("question source failed: {e}");
                return Err(e);
            }
            None => {
                warn!("question source delivered nothing");
                return Err(SourceError::NoQuestion);
            }
        }
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;

    impl QuestionSource for Silent {
        fn request_next<F>(&mut self, _: F)
        where
            F: FnOnce(Result<Question, SourceError>),
        {
        }
    }

    struct Broken;

    impl QuestionSource for Broken {
        fn request_next<F>(&mut self, deliver: F)
        where
            F: FnOnce(Result<Question, SourceError>),
        {
            deliver(Err(SourceError::Feed("rate limited".to_string())))
        }
    }

    #[test]
    fn test_silent_source_means_no_question() {
        assert!(matches!(
            draw_round(&mut Silent, 3),
            Err(SourceError::NoQuestion)
        ));
    }

    #[test]
    fn test_failure_is_passed_through() {
        match draw_round(&mut Broken, 3) {
            Err(SourceError::Feed(message)) => assert_eq!(message, "rate limited"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_draws_requested_amount() {
        let mut source = StaticQuestions::in_order();
        let round = draw_round(&mut source, 10).unwrap();
        assert_eq!(round.len(), 10);
        assert_eq!(round[0].image_key, "The Godfather");
    }
}
