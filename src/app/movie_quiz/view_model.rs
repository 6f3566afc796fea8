use chrono::Local;

use moviequiz::{QuizEngine, QuizError, StatisticsSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizStep {
    pub image_key: String,
    pub question: String,
    pub question_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResults {
    pub title: String,
    pub text: String,
    pub button_text: String,
}

pub fn convert(engine: &QuizEngine) -> Result<QuizStep, QuizError> {
    let question = engine.current_question()?;
    Ok(QuizStep {
        image_key: question.image_key.clone(),
        question: question.prompt.clone(),
        question_number: format!("{}/{}", engine.question_number(), engine.questions_amount()),
    })
}

pub fn results(correct: usize, total: usize, snapshot: &StatisticsSnapshot) -> QuizResults {
    let mut lines = vec![format!("Your result: {correct}/{total}")];
    lines.extend(lifetime_summary(snapshot));

    QuizResults {
        title: "This round is over!".to_string(),
        text: lines.join("\n"),
        button_text: "Play again".to_string(),
    }
}

pub fn lifetime_summary(snapshot: &StatisticsSnapshot) -> Vec<String> {
    let record = if snapshot.games_count == 0 {
        "none".to_string()
    } else {
        let best = snapshot.best_game;
        format!(
            "{}/{} ({})",
            best.correct,
            best.total,
            best.played_at.with_timezone(&Local).format("%d.%m.%y %H:%M")
        )
    };

    vec![
        format!("Quizzes played: {}", snapshot.games_count),
        format!("Record: {record}"),
        format!("Average accuracy: {}", accuracy(snapshot.total_accuracy)),
    ]
}

fn accuracy(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.2}%", value * 100.0),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use moviequiz::{
        Question,
        statistics::{MemoryStore, StatisticsStore},
    };

    use super::*;

    #[test]
    fn test_step_shows_counter() {
        let mut engine = QuizEngine::new();
        engine
            .start(vec![
                Question::new("Tesla", "Rating above 6?", false),
                Question::new("Old", "Rating above 6?", false),
            ])
            .unwrap();
        engine.submit_answer(false).unwrap();
        engine.advance().unwrap();

        assert_eq!(
            convert(&engine).unwrap(),
            QuizStep {
                image_key: "Old".to_string(),
                question: "Rating above 6?".to_string(),
                question_number: "2/2".to_string(),
            }
        );
    }

    #[test]
    fn test_no_step_without_round() {
        assert_eq!(convert(&QuizEngine::new()), Err(QuizError::NoActiveRound));
    }

    #[test]
    fn test_results_text() {
        let mut stats = StatisticsStore::new(MemoryStore::new());
        stats.store(7, 10).unwrap();
        let snapshot = stats.store(5, 10).unwrap();

        let results = results(5, 10, &snapshot);
        let lines: Vec<_> = results.text.lines().collect();
        assert_eq!(lines[0], "Your result: 5/10");
        assert_eq!(lines[1], "Quizzes played: 2");
        assert!(lines[2].starts_with("Record: 7/10 ("));
        assert_eq!(lines[3], "Average accuracy: 60.00%");
        assert_eq!(results.button_text, "Play again");
    }

    #[test]
    fn test_summary_without_games() {
        let stats = StatisticsStore::new(MemoryStore::new());
        assert_eq!(
            lifetime_summary(&stats.snapshot()),
            vec![
                "Quizzes played: 0".to_string(),
                "Record: none".to_string(),
                "Average accuracy: n/a".to_string(),
            ]
        );
    }
}
