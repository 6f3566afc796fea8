mod app;

use std::{
    fs::{self, OpenOptions},
    io::{self, stdout},
    path::{Path, PathBuf},
};

use app::MovieQuiz;
use env_logger::{Env, Target};
use log::info;
use moviequiz::{
    StatisticsStore,
    config::{self, LOG_FILE, STATISTICS_FILE, Settings},
    statistics::FileStore,
};
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};

// stderr belongs to the terminal UI, so logs go to a file
fn init_logging(dir: &Path) {
    let file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("logging disabled, cannot open {}: {e}", dir.join(LOG_FILE).display());
            return;
        }
    };

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
}

fn main() -> io::Result<()> {
    let dir = config::data_dir().unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&dir)?;
    init_logging(&dir);

    let settings = Settings::load_from(&dir).with_env_overrides();
    let stats = StatisticsStore::new(FileStore::open(dir.join(STATISTICS_FILE)));
    info!("statistics kept in {}", stats.backend().path().display());
    let mut quiz = MovieQuiz::new(settings, stats);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnableMouseCapture)?;

    let mut terminal = ratatui::init();

    let app_result = quiz.run(&mut terminal);

    // Restore terminal settings
    execute!(stdout, DisableMouseCapture)?;
    disable_raw_mode()?;
    ratatui::restore();

    app_result
}
