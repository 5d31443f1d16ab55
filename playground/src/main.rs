use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use games::crossterm::event::{self, Event, KeyCode};
use games::crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use games::crossterm::{execute, terminal::Clear, terminal::ClearType};
use games::maze::config::GameConfig;
use games::maze::controller::ProblemStatus;
use games::maze::game::{Game, InputAction, Mode};
use games::maze::map::Direction;
use games::maze::theme::Theme;
use games::ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

/// Maze Math: walk the maze, answer the problems at the crossroads, find the goal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Maze rows (overrides the config file)
    #[arg(short, long)]
    rows: Option<usize>,

    /// Maze columns (overrides the config file)
    #[arg(short, long)]
    cols: Option<usize>,

    /// Seed for a reproducible maze and problem sequence
    #[arg(short, long)]
    seed: Option<u64>,

    /// space, ocean, jungle or candy; picked at random when omitted
    #[arg(short, long)]
    theme: Option<Theme>,

    /// JSON file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Walk to the goal automatically, answering every problem
    #[arg(long)]
    demo: bool,

    /// Input poll interval in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Write logs here; the terminal belongs to the game
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the session statistics as JSON on exit
    #[arg(long)]
    stats_out: Option<PathBuf>,
}

fn init_logger(log_file: Option<&PathBuf>) -> Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init()?;
    Ok(())
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    config.validate()?;
    Ok(config)
}

fn keycode_to_action(key: KeyCode, mode: Mode) -> Option<InputAction> {
    use games::crossterm::event::KeyCode::*;
    use InputAction::*;

    match mode {
        Mode::Victory => match key {
            Left | Right | Tab => Some(ToggleButton),
            Enter => Some(Confirm),
            Char('q') | Esc => Some(Quit),
            _ => None,
        },
        Mode::Problem => match key {
            Enter => Some(Confirm),
            KeyCode::Backspace => Some(InputAction::Backspace),
            Tab => Some(NewProblem),
            Esc => Some(CloseProblem),
            Char(c) => Some(Type(c)),
            _ => None,
        },
        Mode::Maze => match key {
            Up | Char('w') => Some(MoveUp),
            Down | Char('s') => Some(MoveDown),
            Left | Char('a') => Some(MoveLeft),
            Right | Char('d') => Some(MoveRight),
            Char('t') => Some(NextTheme),
            Char('q') | Esc => Some(Quit),
            _ => None,
        },
    }
}

/// Feeds the route to the goal from a helper thread, one step at a time.
fn spawn_replay(route: Vec<Direction>) -> Receiver<Option<Direction>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(300));
        for step in route {
            if tx.send(Some(step)).is_err() {
                return;
            }
            thread::sleep(Duration::from_millis(150));
        }
        let _ = tx.send(None);
    });
    rx
}

fn answer_for_demo(game: &mut Game) -> Result<()> {
    if game.controller.math_problem_status() == Some(ProblemStatus::Correct) {
        game.handle_action(InputAction::Confirm)?;
        return Ok(());
    }
    let Some(problem) = game.controller.math_problem() else {
        return Ok(());
    };
    let answer = problem.answer.to_string();
    for c in answer.chars() {
        game.handle_action(InputAction::Type(c))?;
    }
    game.handle_action(InputAction::Confirm)?;
    Ok(())
}

fn run<W: io::Write>(
    terminal: &mut Terminal<CrosstermBackend<W>>,
    game: &mut Game,
    frame: Duration,
    mut replay: Option<Receiver<Option<Direction>>>,
) -> Result<()> {
    let mut last_frame = Instant::now();
    loop {
        let now = Instant::now();
        game.tick(now - last_frame);
        last_frame = now;

        terminal.draw(|f| {
            let layout = Layout::default()
                .constraints([Constraint::Min(0)])
                .split(f.area());
            let (content, title) = game.render();
            let para =
                Paragraph::new(content).block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(para, layout[0]);
        })?;

        if let Some(rx) = &replay {
            match game.mode() {
                Mode::Problem => answer_for_demo(game)?,
                Mode::Maze if !game.controller.is_animating() => match rx.try_recv() {
                    Ok(Some(step)) => {
                        game.handle_action(step.into())?;
                    }
                    Ok(None) | Err(mpsc::TryRecvError::Disconnected) => replay = None,
                    Err(mpsc::TryRecvError::Empty) => {}
                },
                _ => {}
            }
        }

        if event::poll(frame)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Press {
                    if let Some(action) = keycode_to_action(key.code, game.mode()) {
                        if game.handle_action(action)? {
                            execute!(io::stdout(), Clear(ClearType::All))?;
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_file.as_ref())?;
    let config = load_config(&args)?;

    let theme = args
        .theme
        .unwrap_or_else(|| Theme::random(&mut env::rand::rng()));
    let mut game = Game::new(config, env::game_rng(args.seed), theme)?;
    info!(
        "starting {}x{} maze, theme {}, seed {:?}",
        game.controller.config().rows,
        game.controller.config().cols,
        theme,
        args.seed
    );

    let replay = if args.demo {
        let route = game
            .controller
            .maze()
            .path_between(game.controller.target(), game.controller.goal())
            .unwrap_or_default();
        Some(spawn_replay(route))
    } else {
        None
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let backend = CrosstermBackend::new(&mut stdout);
    let mut terminal = Terminal::new(backend)?;
    execute!(io::stdout(), Clear(ClearType::All))?;

    let outcome = run(
        &mut terminal,
        &mut game,
        Duration::from_millis(args.frame_ms),
        replay,
    );
    disable_raw_mode()?;
    outcome?;

    let stats = game.controller.stats();
    info!(
        "session over: level {}, {} moves, {}/{} problems, {} wrong",
        stats.level,
        stats.moves,
        stats.problems_solved,
        stats.problems_total,
        stats.wrong_answers()
    );
    if let Some(path) = &args.stats_out {
        match stats.to_json() {
            Ok(json) => fs::write(path, json)
                .with_context(|| format!("cannot write stats to {}", path.display()))?,
            Err(err) => warn!("could not serialize stats: {}", err),
        }
    }
    Ok(())
}
