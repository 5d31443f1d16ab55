use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use env::rand::rngs::StdRng;
use env::rand::Rng;
use env::Env;
use log::{debug, info, warn};

use super::config::GameConfig;
use super::error::Result;
use super::map::{Direction, Maze, Position};
use super::problems::{self, MathProblem};
use super::stats::SessionStats;
use super::theme::Theme;

/// Animated, possibly fractional position of the player on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayedPosition {
    pub row: f64,
    pub col: f64,
}

impl From<Position> for DisplayedPosition {
    fn from(pos: Position) -> Self {
        Self {
            row: pos.row as f64,
            col: pos.col as f64,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub success: bool,
    pub triggered_math_problem: bool,
    pub reached_goal: bool,
}

/// What the player found when the move animation settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arrival {
    pub cell: Position,
    pub math_problem: bool,
    pub goal: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProblemStatus {
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Animating,
    MathProblemOpen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    ProblemOpen,
    Won,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    PlayerMoved { from: Position, to: Position },
    InvalidMove { direction: Direction },
    MathProblemTriggered { cell: Position },
    GoalReached { cell: Position },
    ThemeChanged { theme: Theme },
}

struct ActiveProblem {
    problem: MathProblem,
    cell: Position,
    status: Option<ProblemStatus>,
}

pub struct GameController<R: Rng = StdRng> {
    config: GameConfig,
    level: u32,
    maze: Maze,
    target: Position,
    displayed: DisplayedPosition,
    animating: bool,
    active_problem: Option<ActiveProblem>,
    celebrating: bool,
    stats: SessionStats,
    subscribers: Vec<Sender<GameEvent>>,
    rng: R,
}

impl<R: Rng> GameController<R> {
    pub fn new(rows: usize, cols: usize, rng: R) -> Result<Self> {
        let config = GameConfig {
            rows,
            cols,
            ..GameConfig::default()
        };
        Self::with_config(config, rng)
    }

    pub fn with_config(config: GameConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let maze = Maze::generate(config.rows, config.cols, &mut rng)?;
        let start = Self::start_of(&maze);
        let mut controller = Self {
            config,
            level: 1,
            stats: SessionStats::new(1, maze.problem_cells()),
            maze,
            target: start,
            displayed: start.into(),
            animating: false,
            active_problem: None,
            celebrating: false,
            subscribers: Vec::new(),
            rng,
        };
        controller.check_start_on_goal();
        Ok(controller)
    }

    fn start_of(maze: &Maze) -> Position {
        Position::new(maze.rows() / 2, maze.cols() / 2)
    }

    /// Small mazes can put the goal under the start cell. No move will ever
    /// arrive there, so the session is complete from the outset.
    fn check_start_on_goal(&mut self) {
        if self.target != self.maze.goal() {
            return;
        }
        self.stats.completed = true;
        info!("level {} starts on the goal", self.level);
        self.publish(GameEvent::GoalReached { cell: self.target });
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn goal(&self) -> Position {
        self.maze.goal()
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.maze.rows(), self.maze.cols())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn displayed(&self) -> DisplayedPosition {
        self.displayed
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn is_math_problem_showing(&self) -> bool {
        self.active_problem.is_some()
    }

    pub fn math_problem(&self) -> Option<&MathProblem> {
        self.active_problem.as_ref().map(|active| &active.problem)
    }

    pub fn math_problem_cell(&self) -> Option<Position> {
        self.active_problem.as_ref().map(|active| active.cell)
    }

    pub fn math_problem_status(&self) -> Option<ProblemStatus> {
        self.active_problem.as_ref().and_then(|active| active.status)
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn phase(&self) -> Phase {
        if self.active_problem.is_some() {
            Phase::MathProblemOpen
        } else if self.animating {
            Phase::Animating
        } else {
            Phase::Idle
        }
    }

    pub fn status(&self) -> GameStatus {
        if !self.animating && self.target == self.maze.goal() {
            GameStatus::Won
        } else if self.active_problem.is_some() {
            GameStatus::ProblemOpen
        } else {
            GameStatus::Ongoing
        }
    }

    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Sends `event` to every live subscriber; hung-up receivers are dropped.
    pub fn publish(&mut self, event: GameEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn movement_gated(&self) -> bool {
        self.animating || self.active_problem.is_some()
    }

    /// Commits a one-cell move. The math problem or goal at the destination is
    /// only reported here; it is surfaced once the animation settles.
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        if self.movement_gated() {
            return MoveOutcome::default();
        }

        let (d_row, d_col) = direction.delta();
        let row = self.target.row as isize + d_row;
        let col = self.target.col as isize + d_col;
        if !self.is_move_valid(row, col) {
            self.stats.invalid_moves += 1;
            debug!(
                "blocked {:?} from ({}, {})",
                direction, self.target.row, self.target.col
            );
            self.publish(GameEvent::InvalidMove { direction });
            return MoveOutcome::default();
        }

        let from = self.target;
        let to = Position::new(row as usize, col as usize);
        let cell = &self.maze[to];
        let outcome = MoveOutcome {
            success: true,
            triggered_math_problem: cell.has_unsolved_problem(),
            reached_goal: cell.is_goal,
        };

        self.target = to;
        self.animating = true;
        self.stats.moves += 1;
        debug!("move {:?} to ({}, {})", direction, to.row, to.col);
        self.publish(GameEvent::PlayerMoved { from, to });
        outcome
    }

    /// Bounds check, then the wall of the current cell facing `(row, col)`.
    pub fn is_move_valid(&self, row: isize, col: isize) -> bool {
        if !self.maze.contains(row, col) {
            return false;
        }
        match Direction::toward(self.target, row, col) {
            Some(direction) => !self.maze[self.target].walls.has(direction),
            None => true,
        }
    }

    fn blend_factor(&self, dt: Duration) -> f64 {
        let frames = dt.as_secs_f64() / self.config.frame().as_secs_f64();
        1.0 - (1.0 - self.config.animation_speed).powf(frames)
    }

    /// Advances the move animation by one frame of length `dt`. Returns the
    /// arrival once the displayed position snaps onto the target.
    pub fn animate_movement(&mut self, dt: Duration) -> Option<Arrival> {
        if !self.stats.completed {
            self.stats.add_time(dt);
        }
        if !self.animating {
            return None;
        }

        let factor = self.blend_factor(dt);
        let target = DisplayedPosition::from(self.target);
        self.displayed.row += (target.row - self.displayed.row) * factor;
        self.displayed.col += (target.col - self.displayed.col) * factor;

        let epsilon = self.config.snap_epsilon;
        if (target.row - self.displayed.row).abs() < epsilon
            && (target.col - self.displayed.col).abs() < epsilon
        {
            self.displayed = target;
            self.animating = false;
            return Some(self.arrive());
        }
        None
    }

    /// Runs the animation to completion in reference-frame steps.
    pub fn settle(&mut self) -> Option<Arrival> {
        let frame = self.config.frame();
        while self.animating {
            if let Some(arrival) = self.animate_movement(frame) {
                return Some(arrival);
            }
        }
        None
    }

    fn arrive(&mut self) -> Arrival {
        let cell = &self.maze[self.target];
        let arrival = Arrival {
            cell: self.target,
            math_problem: cell.has_unsolved_problem(),
            goal: cell.is_goal,
        };

        if arrival.math_problem {
            self.show_math_problem_for_current_cell();
            self.publish(GameEvent::MathProblemTriggered { cell: arrival.cell });
        }
        if arrival.goal {
            if !self.stats.completed {
                self.stats.completed = true;
                info!(
                    "goal reached at level {} after {} moves",
                    self.level, self.stats.moves
                );
            }
            self.publish(GameEvent::GoalReached { cell: arrival.cell });
        }
        arrival
    }

    pub fn show_math_problem_for_current_cell(&mut self) {
        let problem = problems::random_problem(&mut self.rng);
        debug!("problem at ({}, {}): {}", self.target.row, self.target.col, problem.question);
        self.active_problem = Some(ActiveProblem {
            problem,
            cell: self.target,
            status: None,
        });
    }

    /// Judges `input` against the open problem. A correct answer marks the
    /// attempted cell solved; the problem stays open either way.
    pub fn check_math_problem_answer(&mut self, input: &str) -> bool {
        let Some(active) = self.active_problem.as_mut() else {
            return false;
        };

        let correct = active.problem.is_correct(input);
        if correct {
            active.status = Some(ProblemStatus::Correct);
            if let Some(cell) = self.maze.cell_mut(active.cell) {
                if !cell.math_problem_solved {
                    cell.math_problem_solved = true;
                    if cell.has_math_problem {
                        self.stats.problems_solved += 1;
                    }
                }
            }
        } else {
            active.status = Some(ProblemStatus::Incorrect);
            self.stats.record_wrong_answer(active.problem.category);
        }
        correct
    }

    pub fn close_math_problem(&mut self) {
        self.active_problem = None;
    }

    /// Swaps the open problem for a fresh one on the same cell.
    pub fn reset_math_problem(&mut self) {
        if self.active_problem.is_none() {
            return;
        }
        let problem = problems::random_problem(&mut self.rng);
        if let Some(active) = self.active_problem.as_mut() {
            active.problem = problem;
            active.status = None;
        }
    }

    pub fn celebrate(&mut self) {
        self.celebrating = true;
    }

    pub fn end_celebration(&mut self) {
        self.celebrating = false;
    }

    /// Builds a new maze of the configured size and clears all transient state.
    pub fn reset(&mut self) -> Result<()> {
        let maze = Maze::generate(self.config.rows, self.config.cols, &mut self.rng)?;
        let start = Self::start_of(&maze);
        self.stats = SessionStats::new(self.level, maze.problem_cells());
        self.maze = maze;
        self.target = start;
        self.displayed = start.into();
        self.animating = false;
        self.active_problem = None;
        self.celebrating = false;
        self.check_start_on_goal();
        Ok(())
    }

    pub fn advance_level(&mut self) -> Result<()> {
        self.level += 1;
        self.config.rows += self.config.level_growth;
        self.config.cols += self.config.level_growth;
        info!(
            "level {}: {}x{} maze",
            self.level, self.config.rows, self.config.cols
        );
        self.reset()
    }
}

impl<R: Rng> Env for GameController<R> {
    type State = Position;
    type Action = Direction;
    type Status = GameStatus;

    fn reset(&mut self) -> Self::State {
        if let Err(err) = GameController::reset(self) {
            warn!("keeping previous maze, regeneration failed: {}", err);
        }
        self.target
    }

    fn step(&mut self, action: Direction) -> (Self::State, Self::Status) {
        self.move_player(action);
        self.settle();
        (self.target, self.status())
    }

    fn current_state(&self) -> Self::State {
        self.target
    }

    fn legal_actions(&self) -> Vec<Self::Action> {
        if self.movement_gated() {
            Vec::new()
        } else {
            self.maze.open_directions(self.target)
        }
    }

    fn is_terminal(&self) -> bool {
        self.is_win()
    }

    fn is_win(&self) -> bool {
        self.status() == GameStatus::Won
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use env::rand::SeedableRng;

    fn controller(rows: usize, cols: usize, seed: u64) -> GameController {
        GameController::new(rows, cols, StdRng::seed_from_u64(seed)).unwrap()
    }

    fn solve_open_problem(game: &mut GameController) {
        let answer = game.math_problem().unwrap().answer.to_string();
        assert!(game.check_math_problem_answer(&answer));
        game.close_math_problem();
    }

    /// Walks the tree path to `dest`, clearing any problem met on the way.
    fn walk_to(game: &mut GameController, dest: Position) -> Option<Arrival> {
        let path = game.maze().path_between(game.target(), dest).unwrap();
        let mut last = None;
        for step in path {
            if game.is_math_problem_showing() {
                solve_open_problem(game);
            }
            assert!(game.move_player(step).success);
            last = game.settle();
            assert!(last.is_some());
        }
        last
    }

    fn first_move(game: &GameController) -> Direction {
        game.maze().open_directions(game.target())[0]
    }

    #[test]
    fn starts_centered_and_idle() {
        let game = controller(5, 5, 1);
        assert_eq!(game.target(), Position::new(2, 2));
        assert_eq!(game.displayed(), DisplayedPosition { row: 2.0, col: 2.0 });
        assert_eq!(game.phase(), Phase::Idle);
        assert!(!game.is_celebrating());
        assert_eq!(game.math_problem_status(), None);
        assert_eq!(game.stats().problems_total as usize, game.maze().problem_cells());
    }

    #[test]
    fn rejects_empty_grid() {
        assert!(GameController::new(0, 3, StdRng::seed_from_u64(0)).is_err());
    }

    #[test]
    fn move_up_follows_the_top_wall() {
        for seed in 0..20 {
            let mut game = controller(5, 5, seed);
            let top = game.maze()[Position::new(2, 2)].walls.top;
            let outcome = game.move_player(Direction::Up);
            if top {
                assert!(!outcome.success);
                assert_eq!(game.target(), Position::new(2, 2));
                assert!(!game.is_animating());
            } else {
                assert!(outcome.success);
                assert_eq!(game.target(), Position::new(1, 2));
                assert!(game.is_animating());
            }
        }
    }

    #[test]
    fn blocked_move_reports_event_without_mutation() {
        let mut game = controller(5, 5, 8);
        let events = game.subscribe();
        let start = game.target();
        let blocked = Direction::ALL
            .iter()
            .copied()
            .find(|&d| !game.maze().is_open(start, d))
            .unwrap();
        assert!(!game.move_player(blocked).success);
        assert_eq!(game.target(), start);
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.stats().invalid_moves, 1);
        assert_eq!(game.stats().moves, 0);
        assert_eq!(
            events.try_recv().unwrap(),
            GameEvent::InvalidMove { direction: blocked }
        );
    }

    #[test]
    fn out_of_bounds_is_never_valid() {
        let game = controller(1, 1, 3);
        assert!(!game.is_move_valid(-1, 0));
        assert!(!game.is_move_valid(0, 1));
        assert!(game.is_move_valid(0, 0));
    }

    #[test]
    fn movement_is_gated_while_animating() {
        let mut game = controller(6, 6, 21);
        let step = first_move(&game);
        assert!(game.move_player(step).success);
        let committed = game.target();
        for direction in Direction::ALL {
            assert!(!game.move_player(direction).success);
        }
        assert_eq!(game.target(), committed);
        assert_eq!(game.stats().invalid_moves, 0);
    }

    #[test]
    fn movement_is_gated_while_problem_open() {
        let mut game = controller(6, 6, 4);
        game.show_math_problem_for_current_cell();
        assert_eq!(game.phase(), Phase::MathProblemOpen);
        for direction in Direction::ALL {
            assert!(!game.move_player(direction).success);
        }
        assert!(game.legal_actions().is_empty());
        game.close_math_problem();
        assert_eq!(game.legal_actions(), game.maze().open_directions(game.target()));
    }

    #[test]
    fn animation_converges_and_snaps() {
        let mut game = controller(5, 5, 12);
        let step = first_move(&game);
        game.move_player(step);
        let frame = game.config().frame();

        let mut frames = 0;
        let arrival = loop {
            frames += 1;
            if let Some(arrival) = game.animate_movement(frame) {
                break arrival;
            }
            assert!(game.is_animating());
            assert!(frames < 100);
        };
        assert!((25..=32).contains(&frames));
        assert_eq!(arrival.cell, game.target());
        assert_eq!(game.displayed(), DisplayedPosition::from(game.target()));
        assert!(!game.is_animating());
        assert_eq!(game.animate_movement(frame), None);
    }

    #[test]
    fn animation_settles_far_from_the_origin() {
        let mut game = controller(262_144, 1, 1);
        assert_eq!(game.target(), Position::new(131_072, 0));
        assert!(game.move_player(Direction::Up).success);
        let frame = game.config().frame();

        let mut frames = 0;
        while game.animate_movement(frame).is_none() {
            frames += 1;
            assert!(frames < 100, "stuck at {:?}", game.displayed());
        }
        assert_eq!(game.displayed(), DisplayedPosition { row: 131_071.0, col: 0.0 });
        assert_eq!(game.legal_actions().len(), 2);
    }

    #[test]
    fn start_on_goal_completes_immediately() {
        let mut game = controller(1, 1, 3);
        assert!(game.stats().completed);
        assert!(game.is_win());
        assert!(game.legal_actions().is_empty());

        let events = game.subscribe();
        game.reset().unwrap();
        assert!(game.stats().completed);
        assert_eq!(
            events.try_recv().unwrap(),
            GameEvent::GoalReached { cell: Position::new(0, 0) }
        );
    }

    #[test]
    fn longer_ticks_cover_more_ground() {
        let mut fixed = controller(5, 5, 12);
        let mut coarse = controller(5, 5, 12);
        let step = first_move(&fixed);
        fixed.move_player(step);
        coarse.move_player(step);
        let frame = fixed.config().frame();

        fixed.animate_movement(frame);
        coarse.animate_movement(frame * 4);
        let start = DisplayedPosition::from(Position::new(2, 2));
        let moved = |p: DisplayedPosition| (p.row - start.row).abs() + (p.col - start.col).abs();
        assert!(moved(coarse.displayed()) > moved(fixed.displayed()));
        assert!((moved(fixed.displayed()) - 0.15).abs() < 1e-4);
    }

    #[test]
    fn problem_opens_only_after_settling() {
        let (mut game, dest) = (0..50)
            .find_map(|seed| {
                let game = controller(7, 7, seed);
                let start = game.target();
                let dest = game
                    .maze()
                    .cells()
                    .iter()
                    .find(|c| c.has_math_problem && c.position() != start)
                    .map(|c| c.position())?;
                Some((game, dest))
            })
            .unwrap();
        let events = game.subscribe();

        let path = game.maze().path_between(game.target(), dest).unwrap();
        let (last, route) = path.split_last().unwrap();
        for &step in route {
            if game.is_math_problem_showing() {
                solve_open_problem(&mut game);
            }
            game.move_player(step);
            game.settle();
        }
        if game.is_math_problem_showing() {
            solve_open_problem(&mut game);
        }
        while events.try_recv().is_ok() {}

        let outcome = game.move_player(*last);
        assert!(outcome.success && outcome.triggered_math_problem);
        assert!(!game.is_math_problem_showing());

        let arrival = game.settle().unwrap();
        assert!(arrival.math_problem);
        assert_eq!(game.phase(), Phase::MathProblemOpen);
        assert_eq!(game.math_problem_cell(), Some(dest));
        assert_eq!(game.status(), GameStatus::ProblemOpen);
        let received: Vec<_> = events.try_iter().collect();
        assert!(received.contains(&GameEvent::MathProblemTriggered { cell: dest }));
    }

    #[test]
    fn correct_answer_marks_cell_solved_once() {
        let mut game = controller(5, 5, 30);
        game.show_math_problem_for_current_cell();
        let cell = game.math_problem_cell().unwrap();
        let answer = game.math_problem().unwrap().answer.to_string();

        assert!(game.check_math_problem_answer(&format!("  {}  ", answer)));
        assert_eq!(game.math_problem_status(), Some(ProblemStatus::Correct));
        assert!(game.maze()[cell].math_problem_solved);
        let solved = game.stats().problems_solved;

        assert!(game.check_math_problem_answer(&answer));
        assert!(game.maze()[cell].math_problem_solved);
        assert_eq!(game.stats().problems_solved, solved);
        assert!(game.is_math_problem_showing());
    }

    #[test]
    fn wrong_answer_keeps_problem_open() {
        let mut game = controller(5, 5, 31);
        game.show_math_problem_for_current_cell();
        let category = game.math_problem().unwrap().category;

        assert!(!game.check_math_problem_answer("not a number"));
        assert_eq!(game.math_problem_status(), Some(ProblemStatus::Incorrect));
        assert_eq!(game.phase(), Phase::MathProblemOpen);
        assert!(!game.maze()[game.target()].math_problem_solved);
        assert_eq!(game.stats().wrong_answers(), 1);
        let mut expected = SessionStats::default();
        expected.record_wrong_answer(category);
        assert_eq!(game.stats().wrong_addition, expected.wrong_addition);
        assert_eq!(game.stats().wrong_place, expected.wrong_place);

        game.reset_math_problem();
        assert!(game.is_math_problem_showing());
        assert_eq!(game.math_problem_status(), None);

        game.close_math_problem();
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.math_problem(), None);
    }

    #[test]
    fn answering_without_problem_is_ignored() {
        let mut game = controller(5, 5, 2);
        assert!(!game.check_math_problem_answer("4"));
        assert_eq!(game.math_problem_status(), None);
        game.reset_math_problem();
        assert!(!game.is_math_problem_showing());
    }

    #[test]
    fn reaching_goal_completes_session() {
        let mut game = controller(5, 5, 77);
        let events = game.subscribe();
        let goal = game.goal();

        let arrival = walk_to(&mut game, goal).unwrap();
        assert!(arrival.goal);
        assert!(game.is_win());
        assert!(game.stats().completed);
        assert!(events
            .try_iter()
            .any(|event| event == GameEvent::GoalReached { cell: goal }));

        let elapsed = game.stats().time_spent_seconds;
        game.animate_movement(Duration::from_secs(5));
        assert_eq!(game.stats().time_spent_seconds, elapsed);

        game.celebrate();
        assert!(game.is_celebrating());
        game.end_celebration();
        assert!(!game.is_celebrating());
    }

    #[test]
    fn reset_clears_transient_state() {
        let mut game = controller(5, 5, 5);
        let step = first_move(&game);
        game.move_player(step);
        game.show_math_problem_for_current_cell();
        game.celebrate();

        game.reset().unwrap();
        assert_eq!(game.target(), Position::new(2, 2));
        assert_eq!(game.displayed(), DisplayedPosition::from(Position::new(2, 2)));
        assert_eq!(game.phase(), Phase::Idle);
        assert!(!game.is_celebrating());
        assert_eq!(game.stats().moves, 0);
        assert_eq!(game.dimensions(), (5, 5));
    }

    #[test]
    fn advancing_level_grows_the_maze() {
        let mut game = controller(5, 5, 6);
        game.advance_level().unwrap();
        assert_eq!(game.level(), 2);
        assert_eq!(game.dimensions(), (6, 6));
        assert_eq!(game.stats().level, 2);
        assert_eq!(game.target(), Position::new(3, 3));
    }

    #[test]
    fn env_step_settles_each_move() {
        let mut game = controller(6, 4, 9);
        let start = Env::reset(&mut game);
        assert_eq!(start, Position::new(3, 2));
        let step = game.legal_actions()[0];
        let (state, _) = game.step(step);
        assert_eq!(state, game.maze().neighbor(start, step).unwrap());
        assert!(!game.is_animating());
        assert_eq!(game.current_state(), state);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut game = controller(3, 3, 1);
        let kept = game.subscribe();
        drop(game.subscribe());
        game.publish(GameEvent::ThemeChanged { theme: Theme::Ocean });
        assert_eq!(game.subscribers.len(), 1);
        assert_eq!(
            kept.try_recv().unwrap(),
            GameEvent::ThemeChanged { theme: Theme::Ocean }
        );
    }
}
