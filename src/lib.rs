pub mod config;
pub mod engine;
pub mod error;
pub mod questions;
pub mod statistics;

pub use engine::{Advance, AnswerOutcome, Phase, Question, QuizEngine};
pub use error::{PersistenceWarning, QuizError, SourceError, StoreError};
pub use statistics::{GameRecord, StatisticsSnapshot, StatisticsStore};

#[cfg(test)]
mod tests {
    use std::sync::Once;
    use test_context::{TestContext, test_context};

    use crate::{
        questions::{QuestionSource, StaticQuestions, draw_round},
        statistics::MemoryStore,
        *,
    };

    static INIT_LOGGER: Once = Once::new();

    pub struct UsingLogger;

    impl TestContext for UsingLogger {
        fn setup() -> UsingLogger {
            INIT_LOGGER.call_once(|| {
                let _ = env_logger::builder().is_test(true).try_init();
            });

            UsingLogger
        }
    }

    fn play_round(engine: &mut QuizEngine, mut choose: impl FnMut(usize, &Question) -> bool) {
        loop {
            let index = engine.current_index();
            let choice = choose(index, engine.current_question().unwrap());
            engine.submit_answer(choice).unwrap();
            if engine.advance().unwrap().finished {
                break;
            }
        }
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_alternating_round_is_stored(_: &mut UsingLogger) {
        let mut source = StaticQuestions::in_order();
        let mut engine = QuizEngine::new();
        engine.start(draw_round(&mut source, 10).unwrap()).unwrap();

        // right, wrong, right, wrong...
        play_round(&mut engine, |index, question| {
            if index % 2 == 0 {
                question.correct_answer
            } else {
                !question.correct_answer
            }
        });
        assert!(engine.is_finished());
        assert_eq!(engine.correct_answers(), 5);

        let mut stats = StatisticsStore::new(MemoryStore::new());
        stats
            .store(engine.correct_answers(), engine.questions_amount())
            .unwrap();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.games_count, 1);
        assert_eq!(snapshot.best_game.correct, 5);
        assert_eq!(snapshot.total_accuracy, Some(0.5));
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_rounds_accumulate_across_restarts(_: &mut UsingLogger) {
        let mut source = StaticQuestions::in_order();
        let mut engine = QuizEngine::new();
        let mut stats = StatisticsStore::new(MemoryStore::new());
        engine.start(draw_round(&mut source, 4).unwrap()).unwrap();

        play_round(&mut engine, |_, question| question.correct_answer);
        stats.store(engine.correct_answers(), 4).unwrap();

        engine.restart().unwrap();
        play_round(&mut engine, |_, _| true);
        let snapshot = stats.store(engine.correct_answers(), 4).unwrap();

        assert_eq!(snapshot.games_count, 2);
        assert_eq!(snapshot.cumulative_correct, 8);
        assert_eq!(snapshot.cumulative_total, 8);
        assert_eq!(snapshot.best_game.correct, 4);
    }

    #[test]
    fn test_source_failure_leaves_engine_untouched() {
        struct Offline;

        impl QuestionSource for Offline {
            fn request_next<F>(&mut self, deliver: F)
            where
                F: FnOnce(Result<Question, SourceError>),
            {
                deliver(Err(SourceError::Feed("offline".to_string())))
            }
        }

        let mut engine = QuizEngine::new();
        engine
            .start(vec![Question::new("Old", "Rating above 6?", false)])
            .unwrap();

        if let Ok(questions) = draw_round(&mut Offline, 10) {
            engine.restart_with(questions).unwrap();
        }

        assert_eq!(engine.questions_amount(), 1);
        assert_eq!(engine.current_question().unwrap().image_key, "Old");
    }
}
