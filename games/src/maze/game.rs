use std::sync::mpsc::Receiver;
use std::time::Duration;

use env::rand::rngs::StdRng;
use env::rand::Rng;
use log::{debug, info};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use super::config::GameConfig;
use super::controller::{GameController, GameEvent, GameStatus, ProblemStatus};
use super::error::Result;
use super::map::Direction;
use super::theme::{Renderer, TerminalRenderer, Theme};

const MAX_ANSWER_LEN: usize = 12;

pub struct Game<R: Rng = StdRng> {
    pub controller: GameController<R>,
    renderer: TerminalRenderer,
    events: Receiver<GameEvent>,
    answer: String,
    selected_button: VictoryButton,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VictoryButton {
    Quit,
    Next,
}

/// Which keys mean what depends on what is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Maze,
    Problem,
    Victory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Quit,
    Confirm,
    ToggleButton,
    Type(char),
    Backspace,
    NewProblem,
    CloseProblem,
    NextTheme,
}

impl From<Direction> for InputAction {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => InputAction::MoveUp,
            Direction::Down => InputAction::MoveDown,
            Direction::Left => InputAction::MoveLeft,
            Direction::Right => InputAction::MoveRight,
        }
    }
}

impl<R: Rng> Game<R> {
    pub fn new(config: GameConfig, rng: R, theme: Theme) -> Result<Self> {
        let mut controller = GameController::with_config(config, rng)?;
        let events = controller.subscribe();
        Ok(Game {
            controller,
            renderer: TerminalRenderer::new(theme),
            events,
            answer: String::new(),
            selected_button: VictoryButton::Next,
        })
    }

    pub fn mode(&self) -> Mode {
        if self.controller.is_celebrating() {
            Mode::Victory
        } else if self.controller.is_math_problem_showing() {
            Mode::Problem
        } else {
            Mode::Maze
        }
    }

    pub fn theme(&self) -> Theme {
        self.renderer.theme()
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Applies one input. Returns true when the player asked to quit.
    pub fn handle_action(&mut self, action: InputAction) -> Result<bool> {
        use InputAction::*;
        if action == NextTheme {
            self.next_theme();
            return Ok(false);
        }

        match self.mode() {
            Mode::Victory => match action {
                ToggleButton => {
                    self.selected_button = match self.selected_button {
                        VictoryButton::Quit => VictoryButton::Next,
                        VictoryButton::Next => VictoryButton::Quit,
                    };
                }
                Confirm => match self.selected_button {
                    VictoryButton::Quit => return Ok(true),
                    VictoryButton::Next => self.next_level()?,
                },
                Quit => return Ok(true),
                _ => {}
            },
            Mode::Problem => match action {
                Type(c) if !c.is_control() && self.answer.len() < MAX_ANSWER_LEN => {
                    self.answer.push(c);
                }
                Backspace => {
                    self.answer.pop();
                }
                Confirm => self.submit_answer(),
                NewProblem => {
                    self.controller.reset_math_problem();
                    self.answer.clear();
                }
                CloseProblem => {
                    self.controller.close_math_problem();
                    self.answer.clear();
                }
                _ => {}
            },
            Mode::Maze => match action {
                MoveUp => self.try_move(Direction::Up),
                MoveDown => self.try_move(Direction::Down),
                MoveLeft => self.try_move(Direction::Left),
                MoveRight => self.try_move(Direction::Right),
                Quit => return Ok(true),
                _ => {}
            },
        }
        Ok(false)
    }

    fn try_move(&mut self, direction: Direction) {
        let outcome = self.controller.move_player(direction);
        if outcome.success && (outcome.triggered_math_problem || outcome.reached_goal) {
            debug!(
                "heading for a {} cell",
                if outcome.reached_goal { "goal" } else { "problem" }
            );
        }
    }

    fn submit_answer(&mut self) {
        if self.controller.math_problem_status() == Some(ProblemStatus::Correct) {
            self.controller.close_math_problem();
            self.answer.clear();
            return;
        }
        if self.answer.trim().is_empty() {
            return;
        }
        if !self.controller.check_math_problem_answer(&self.answer) {
            self.answer.clear();
        }
    }

    fn next_theme(&mut self) {
        let theme = self.renderer.theme().next();
        self.renderer.set_theme(theme);
        self.controller.publish(GameEvent::ThemeChanged { theme });
    }

    fn next_level(&mut self) -> Result<()> {
        self.controller.advance_level()?;
        self.answer.clear();
        self.selected_button = VictoryButton::Next;
        Ok(())
    }

    /// Advances the frame and reacts to whatever the controller reported.
    pub fn tick(&mut self, dt: Duration) {
        self.controller.animate_movement(dt);

        let events: Vec<GameEvent> = self.events.try_iter().collect();
        for event in events {
            match event {
                GameEvent::GoalReached { cell } => {
                    info!("goal ({}, {}) reached", cell.row, cell.col);
                    self.controller.celebrate();
                }
                GameEvent::MathProblemTriggered { cell } => {
                    debug!("math problem opened at ({}, {})", cell.row, cell.col);
                    self.answer.clear();
                }
                GameEvent::ThemeChanged { theme } => info!("theme changed to {}", theme),
                GameEvent::InvalidMove { direction } => debug!("wall in the way: {:?}", direction),
                GameEvent::PlayerMoved { .. } => {}
            }
        }

        // a maze can start on its goal, with no arrival to report it
        if !self.controller.is_celebrating() && self.controller.status() == GameStatus::Won {
            info!("started on the goal");
            self.controller.celebrate();
        }
    }

    pub fn render(&self) -> (Text<'static>, &'static str) {
        match self.mode() {
            Mode::Victory => (self.render_victory_screen(), "Victory"),
            Mode::Problem => (self.render_with_problem(), "Math Problem"),
            Mode::Maze => (self.render_maze(), "Maze Math"),
        }
    }

    fn render_maze(&self) -> Text<'static> {
        let mut text = self
            .renderer
            .render_maze(self.controller.maze(), self.controller.displayed());
        let stats = self.controller.stats();
        text.lines.push(Line::from(""));
        text.lines.push(Line::from(format!(
            "Level {}  |  problems solved {}/{}  |  theme {}",
            self.controller.level(),
            stats.problems_solved,
            stats.problems_total,
            self.renderer.theme()
        )));
        text.lines.push(Line::from("arrows/wasd: move   t: theme   q: quit"));
        text
    }

    fn render_with_problem(&self) -> Text<'static> {
        let mut text = self.render_maze();
        let Some(problem) = self.controller.math_problem() else {
            return text;
        };

        text.lines.push(Line::from(""));
        for line in problem.question.lines() {
            text.lines.push(Line::from(Span::styled(
                line.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        text.lines.push(Line::from(format!("> {}_", self.answer)));
        let status = match self.controller.math_problem_status() {
            Some(ProblemStatus::Correct) => Span::styled(
                "Correct! Press Enter to continue.",
                Style::default().fg(Color::Green),
            ),
            Some(ProblemStatus::Incorrect) => Span::styled(
                "Not quite, try again. (Tab: new problem)",
                Style::default().fg(Color::Red),
            ),
            None => Span::raw("Enter: check   Tab: new problem   Esc: close"),
        };
        text.lines.push(Line::from(status));
        text
    }

    fn render_victory_screen(&self) -> Text<'static> {
        let quit_style = if self.selected_button == VictoryButton::Quit {
            Style::default().fg(Color::Black).bg(Color::Red)
        } else {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        };
        let next_style = if self.selected_button == VictoryButton::Next {
            Style::default().fg(Color::Black).bg(Color::Green)
        } else {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        };
        let stats = self.controller.stats();

        Text::from(vec![
            Line::from("You reached the goal!"),
            Line::from(""),
            Line::from(format!(
                "Level {}: {} moves, {}/{} problems solved ({:.0}%), {} wrong answers, {:.1}s",
                stats.level,
                stats.moves,
                stats.problems_solved,
                stats.problems_total,
                stats.success_rate(),
                stats.wrong_answers(),
                stats.time_spent_seconds
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(" Quit ", quit_style),
                Span::raw("    "),
                Span::styled(" Next level ", next_style),
            ]),
        ])
    }
}
