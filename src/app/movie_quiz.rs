mod mode;
mod view_model;

use std::{
    io,
    time::{Duration, Instant},
};

use log::{error, info};
use mode::Mode;
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{self, KeyCode, KeyEvent, MouseEvent, MouseEventKind},
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use moviequiz::{
    Question, QuizEngine, SourceError, StatisticsStore,
    config::Settings,
    questions::{RatingFeedQuestions, StaticQuestions, draw_round},
    statistics::KeyValueStore,
};

use super::{button, centered_line, title};

pub struct MovieQuiz<B: KeyValueStore> {
    exit: bool,
    mode: Mode,
    engine: QuizEngine,
    stats: StatisticsStore<B>,
    settings: Settings,
    rng: StdRng,
}

impl<B: KeyValueStore> MovieQuiz<B> {
    pub fn new(settings: Settings, stats: StatisticsStore<B>) -> Self {
        let rng = match Settings::seed_from_env() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            exit: false,
            mode: Mode::default(),
            engine: QuizEngine::new(),
            stats,
            settings,
            rng,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        while !self.exit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_input(terminal)?;
        }

        Ok(())
    }

    fn handle_input(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        if self.tick() {
            return Ok(());
        }

        let ready = match self.feedback_remaining() {
            Some(remaining) => event::poll(remaining)?,
            None => true,
        };
        if ready {
            match event::read()? {
                event::Event::Key(key) => self.key_event(key),
                event::Event::Mouse(mouse) => self.mouse_event(mouse, terminal),
                _ => (),
            }
        }

        Ok(())
    }

    /// Time left before the feedback screen moves on, `None` outside feedback.
    fn feedback_remaining(&self) -> Option<Duration> {
        let Mode::Feedback { since, .. } = self.mode else {
            return None;
        };
        Some(self.feedback_delay().saturating_sub(since.elapsed()))
    }

    /// Moves on once the feedback delay is over. Returns whether the screen changed.
    fn tick(&mut self) -> bool {
        if self.feedback_remaining().is_some_and(|remaining| remaining.is_zero()) {
            self.show_next_question_or_results();
            return true;
        }
        false
    }

    fn key_event(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Waiting => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.exit = true,
                KeyCode::Enter | KeyCode::Char(' ') => self.new_round(),
                KeyCode::Char('x') => self.stats.reset(),
                _ => (),
            },
            Mode::Question => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.exit = true,
                KeyCode::Char('y') | KeyCode::Right => self.answer(true),
                KeyCode::Char('n') | KeyCode::Left => self.answer(false),
                _ => (),
            },
            Mode::Feedback { .. } => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.exit = true,
                _ => (),
            },
            Mode::Results(_) => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.exit = true,
                KeyCode::Enter | KeyCode::Char('r') => self.play_again(),
                _ => (),
            },
            Mode::Error(_) => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.exit = true,
                KeyCode::Enter | KeyCode::Char('r') => self.new_round(),
                _ => (),
            },
        }
    }

    fn mouse_event(&mut self, mouse: MouseEvent, terminal: &mut DefaultTerminal) {
        let MouseEventKind::Down(_) = mouse.kind else {
            return;
        };

        match self.mode {
            Mode::Question => {
                let [yes, no] = button_areas(terminal.get_frame().area());
                let mouse_rect = Rect::new(mouse.column, mouse.row, 1, 1);
                if mouse_rect.intersects(yes) {
                    self.answer(true);
                } else if mouse_rect.intersects(no) {
                    self.answer(false);
                }
            }
            Mode::Waiting | Mode::Error(_) => self.new_round(),
            Mode::Results(_) => self.play_again(),
            Mode::Feedback { .. } => (),
        }
    }

    fn new_round(&mut self) {
        match self.draw_questions() {
            Ok(questions) => match self.engine.restart_with(questions) {
                Ok(()) => self.mode = Mode::Question,
                Err(e) => self.fail(e.to_string()),
            },
            Err(e) => self.fail(e.to_string()),
        }
    }

    fn draw_questions(&mut self) -> Result<Vec<Question>, SourceError> {
        let amount = self.settings.questions_per_round;
        match &self.settings.feed_path {
            Some(path) => {
                info!("loading questions from {}", path.display());
                let seed = Settings::seed_from_env();
                let mut source = RatingFeedQuestions::from_file(path, seed)?;
                draw_round(&mut source, amount)
            }
            None => {
                let mut source = if self.settings.shuffle {
                    StaticQuestions::shuffled(&mut self.rng)
                } else {
                    StaticQuestions::in_order()
                };
                draw_round(&mut source, amount)
            }
        }
    }

    fn play_again(&mut self) {
        if self.settings.feed_path.is_some() {
            self.new_round();
            return;
        }

        let restarted = if self.settings.shuffle {
            self.engine.restart_shuffled(&mut self.rng)
        } else {
            self.engine.restart()
        };
        match restarted {
            Ok(()) => self.mode = Mode::Question,
            Err(e) => self.fail(e.to_string()),
        }
    }

    fn answer(&mut self, choice: bool) {
        match self.engine.submit_answer(choice) {
            Ok(outcome) => {
                self.mode = Mode::Feedback {
                    correct: outcome.is_correct,
                    since: Instant::now(),
                }
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    fn show_next_question_or_results(&mut self) {
        match self.engine.advance() {
            Ok(advance) if advance.finished => self.finish_round(),
            Ok(_) => self.mode = Mode::Question,
            Err(e) => self.fail(e.to_string()),
        }
    }

    fn finish_round(&mut self) {
        let correct = self.engine.correct_answers();
        let total = self.engine.questions_amount();
        match self.stats.store(correct, total) {
            Ok(snapshot) => {
                self.mode = Mode::Results(view_model::results(correct, total, &snapshot))
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    fn fail(&mut self, message: String) {
        error!("{message}");
        self.mode = Mode::Error(message);
    }

    fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.settings.feedback_millis)
    }

    fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

fn main_area(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area)[1]
        .inner(Margin {
            horizontal: 1,
            vertical: 1,
        })
}

fn question_rows(main: Rect) -> [Rect; 4] {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Counter
            Constraint::Min(3),    // Poster
            Constraint::Length(3), // Prompt
            Constraint::Length(3), // Buttons
        ])
        .split(main);
    [rows[0], rows[1], rows[2], rows[3]]
}

fn button_areas(area: Rect) -> [Rect; 2] {
    let [_, _, _, buttons] = question_rows(main_area(area));
    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(7),
            Constraint::Percentage(20),
            Constraint::Length(7),
            Constraint::Min(0),
        ])
        .split(buttons);
    [buttons[3], buttons[1]]
}

impl<B: KeyValueStore> Widget for &MovieQuiz<B> {
    fn render(self, area: ratatui::prelude::Rect, buf: &mut ratatui::prelude::Buffer)
    where
        Self: Sized,
    {
        let vert = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        title("Movie Quiz", vert[0], buf);

        let block = Block::bordered().border_set(border::DOUBLE);
        let main = main_area(area);

        match &self.mode {
            Mode::Waiting => {
                block.title("╡ Menu ╞").render(vert[1], buf);

                let mut lines = vec![
                    Line::from("Press ENTER to start a round..."),
                    Line::default(),
                ];
                lines.extend(
                    view_model::lifetime_summary(&self.stats.snapshot())
                        .into_iter()
                        .map(Line::from),
                );
                lines.push(Line::default());
                lines.push(Line::from("'x' to reset statistics and Esc/'q' to quit").dark_gray());

                centered_text(lines, main, buf);
            }
            Mode::Question | Mode::Feedback { .. } => {
                block.title("╡ Playing ╞").render(vert[1], buf);

                let Ok(step) = view_model::convert(&self.engine) else {
                    return;
                };
                let [counter, poster, prompt, _] = question_rows(main);
                let [yes, no] = button_areas(area);

                Paragraph::new(format!("Question: {}", step.question_number))
                    .right_aligned()
                    .render(counter, buf);

                let highlight = match self.mode {
                    Mode::Feedback { correct: true, .. } => Style::default().fg(Color::Green),
                    Mode::Feedback { correct: false, .. } => Style::default().fg(Color::Red),
                    _ => Style::default(),
                };
                let poster_block = Block::bordered()
                    .border_set(border::THICK)
                    .border_style(highlight);
                let inner = poster_block.inner(poster);
                poster_block.render(poster, buf);
                centered_line(Span::from(step.image_key).bold(), inner, buf);

                Paragraph::new(step.question)
                    .centered()
                    .wrap(Wrap { trim: true })
                    .render(prompt, buf);

                button("Y", "ES", yes, buf);
                button("N", "O", no, buf);
            }
            Mode::Results(results) => {
                block
                    .title(format!("╡ {} ╞", results.title))
                    .render(vert[1], buf);

                let mut lines: Vec<Line> = results.text.lines().map(Line::from).collect();
                lines.push(Line::default());
                lines.push(
                    Line::from(format!("ENTER: {}, Esc/'q' to quit", results.button_text))
                        .dark_gray(),
                );

                centered_text(lines, main, buf);
            }
            Mode::Error(message) => {
                block.title("╡ Error ╞").render(vert[1], buf);

                centered_text(
                    vec![
                        Line::from("Something went wrong").red(),
                        Line::from(message.as_str()),
                        Line::default(),
                        Line::from("'r' to try again and Esc/'q' to quit").dark_gray(),
                    ],
                    main,
                    buf,
                );
            }
        }
    }
}

fn centered_text(lines: Vec<Line>, area: Rect, buf: &mut ratatui::prelude::Buffer) {
    let height = lines.len() as u16;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(lines).centered().render(rows[1], buf);
}

#[cfg(test)]
mod tests {
    use ratatui::crossterm::event::KeyModifiers;

    use moviequiz::statistics::MemoryStore;

    use super::*;

    fn press(quiz: &mut MovieQuiz<MemoryStore>, code: KeyCode) {
        quiz.key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn quiz(settings: Settings) -> MovieQuiz<MemoryStore> {
        MovieQuiz::new(settings, StatisticsStore::new(MemoryStore::new()))
    }

    fn in_order() -> Settings {
        let mut settings = Settings::default();
        settings.shuffle = false;
        settings
    }

    /// Answers and skips the feedback delay.
    fn answer(quiz: &mut MovieQuiz<MemoryStore>, code: KeyCode) {
        press(quiz, code);
        assert!(matches!(quiz.mode, Mode::Feedback { .. }));
        quiz.show_next_question_or_results();
    }

    #[test]
    fn test_round_of_yes_answers() {
        let mut quiz = quiz(in_order());
        press(&mut quiz, KeyCode::Enter);
        assert!(matches!(quiz.mode, Mode::Question));

        for _ in 0..10 {
            answer(&mut quiz, KeyCode::Char('y'));
        }

        let Mode::Results(results) = &quiz.mode else {
            panic!("expected results, got {:?}", quiz.mode);
        };
        assert!(results.text.starts_with("Your result: 6/10"));
        assert_eq!(quiz.stats.games_count(), 1);
        assert_eq!(quiz.stats.best_game().correct, 6);
    }

    #[test]
    fn test_feedback_reflects_correctness() {
        let mut quiz = quiz(in_order());
        press(&mut quiz, KeyCode::Enter);

        press(&mut quiz, KeyCode::Char('n'));
        assert!(matches!(quiz.mode, Mode::Feedback { correct: false, .. }));

        // answers during feedback are ignored
        press(&mut quiz, KeyCode::Char('y'));
        assert_eq!(quiz.engine.correct_answers(), 0);
        assert_eq!(quiz.engine.current_index(), 0);
    }

    #[test]
    fn test_feedback_waits_for_the_delay() {
        let mut settings = in_order();
        settings.feedback_millis = 60_000;
        let mut quiz = quiz(settings);
        press(&mut quiz, KeyCode::Enter);
        assert_eq!(quiz.feedback_remaining(), None);
        assert!(!quiz.tick());

        press(&mut quiz, KeyCode::Char('y'));
        assert!(!quiz.tick());
        let remaining = quiz.feedback_remaining().unwrap();
        assert!(remaining > Duration::ZERO && remaining <= Duration::from_secs(60));
        assert!(matches!(quiz.mode, Mode::Feedback { correct: true, .. }));
        assert_eq!(quiz.engine.current_index(), 0);
    }

    #[test]
    fn test_feedback_advances_after_the_delay() {
        let mut settings = in_order();
        settings.feedback_millis = 0;
        let mut quiz = quiz(settings);
        press(&mut quiz, KeyCode::Enter);

        press(&mut quiz, KeyCode::Char('y'));
        assert!(quiz.tick());
        assert!(matches!(quiz.mode, Mode::Question));
        assert_eq!(quiz.engine.current_index(), 1);

        // overdue feedback must not underflow the remaining time
        press(&mut quiz, KeyCode::Char('y'));
        quiz.settings.feedback_millis = 1;
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(quiz.feedback_remaining(), Some(Duration::ZERO));
        assert!(quiz.tick());
        assert_eq!(quiz.engine.current_index(), 2);
    }

    #[test]
    fn test_play_again_restarts_round() {
        let mut quiz = quiz(in_order());
        press(&mut quiz, KeyCode::Enter);
        for _ in 0..10 {
            answer(&mut quiz, KeyCode::Char('n'));
        }
        assert!(matches!(quiz.mode, Mode::Results(_)));

        press(&mut quiz, KeyCode::Enter);
        assert!(matches!(quiz.mode, Mode::Question));
        assert_eq!(quiz.engine.current_index(), 0);
        assert_eq!(quiz.engine.correct_answers(), 0);
        assert_eq!(quiz.stats.snapshot().total_accuracy, Some(0.4));
    }

    #[test]
    fn test_missing_feed_shows_error() {
        let mut settings = Settings::default();
        settings.feed_path = Some(std::env::temp_dir().join("moviequiz-missing-feed.json"));
        let mut quiz = quiz(settings);
        press(&mut quiz, KeyCode::Enter);

        assert!(matches!(quiz.mode, Mode::Error(_)));
        assert_eq!(quiz.engine.phase(), moviequiz::Phase::Uninitialized);
    }

    #[test]
    fn test_reset_statistics_from_menu() {
        let mut quiz = quiz(in_order());
        quiz.stats.store(3, 10).unwrap();

        press(&mut quiz, KeyCode::Char('x'));
        assert_eq!(quiz.stats.games_count(), 0);
    }
}
