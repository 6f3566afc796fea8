mod movie_quiz;

pub use movie_quiz::MovieQuiz;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Buffer,
    style::{Color, Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

fn title(text: &str, area: Rect, buf: &mut Buffer) {
    Paragraph::new(Span::from(text).fg(Color::Red))
        .centered()
        .block(Block::bordered().border_set(border::DOUBLE))
        .render(area, buf);
}

/// A bordered button whose first letter is the keyboard shortcut.
fn button(key: &str, rest: &str, area: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::from(vec![
        Span::styled(key, Style::default().underlined()),
        Span::raw(rest),
    ]))
    .centered()
    .block(Block::bordered().border_set(border::DOUBLE))
    .render(area, buf);
}

fn centered_line(span: Span, area: Rect, buf: &mut Buffer) {
    let row = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area)[1];

    Paragraph::new(span).centered().render(row, buf);
}
