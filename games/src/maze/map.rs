// map.rs
use std::collections::VecDeque;
use std::ops::Index;

use env::rand::seq::{IndexedRandom, SliceRandom};
use env::rand::Rng;
use log::debug;

use super::error::{MazeError, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// `(d_row, d_col)` for one step in this direction.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Direction implied by moving from `from` to `(row, col)`.
    /// Vertical motion wins when both coordinates change.
    pub fn toward(from: Position, row: isize, col: isize) -> Option<Direction> {
        let d_row = row - from.row as isize;
        let d_col = col - from.col as isize;
        if d_row < 0 {
            Some(Direction::Up)
        } else if d_row > 0 {
            Some(Direction::Down)
        } else if d_col < 0 {
            Some(Direction::Left)
        } else if d_col > 0 {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// Boundary flags of a cell. `true` means a wall is present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Walls {
    pub const CLOSED: Walls = Walls {
        top: true,
        right: true,
        bottom: true,
        left: true,
    };

    pub fn has(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.top,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn open(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.top = false,
            Direction::Down => self.bottom = false,
            Direction::Left => self.left = false,
            Direction::Right => self.right = false,
        }
    }

    pub fn open_sides(&self) -> usize {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .filter(|&&wall| !wall)
            .count()
    }
}

/// Tag attached to intersection cells at generation time. Descriptive only:
/// the problem actually shown is generated fresh when the player arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProblemKind {
    Addition,
    Subtraction,
    Multiplication,
}

impl ProblemKind {
    pub const ALL: [ProblemKind; 3] = [
        ProblemKind::Addition,
        ProblemKind::Subtraction,
        ProblemKind::Multiplication,
    ];
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub walls: Walls,
    pub is_intersection: bool,
    pub has_math_problem: bool,
    pub math_problem_solved: bool,
    pub math_problem_type: Option<ProblemKind>,
    pub is_goal: bool,
}

impl Cell {
    fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            walls: Walls::CLOSED,
            is_intersection: false,
            has_math_problem: false,
            math_problem_solved: false,
            math_problem_type: None,
            is_goal: false,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    pub fn has_unsolved_problem(&self) -> bool {
        self.has_math_problem && !self.math_problem_solved
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Between a cell and its right neighbour.
    Vertical,
    /// Between a cell and the neighbour below it.
    Horizontal,
}

impl Orientation {
    /// Side of `cell1` that faces `cell2`.
    pub fn direction(&self) -> Direction {
        match self {
            Orientation::Vertical => Direction::Right,
            Orientation::Horizontal => Direction::Down,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Edge {
    pub cell1: Position,
    pub cell2: Position,
    pub orientation: Orientation,
}

/// Disjoint sets over dense cell indices (`row * cols + col`).
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    pub fn find(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // path compression
        let mut current = index;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merges the sets holding `a` and `b`. Returns false if they were already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }
}

#[derive(Clone, Debug)]
pub struct Maze {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    goal: Position,
}

impl Maze {
    /// Carves a perfect maze with randomized Kruskal, picks a border goal and
    /// marks every other cell with three or more openings as a problem cell.
    pub fn generate<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }

        let mut cells: Vec<Cell> = (0..rows * cols)
            .map(|index| Cell::new(index / cols, index % cols))
            .collect();

        let mut edges = Self::edges(rows, cols);
        edges.shuffle(rng);

        let mut sets = UnionFind::new(rows * cols);
        let mut unions = 0;
        for edge in &edges {
            let a = edge.cell1.row * cols + edge.cell1.col;
            let b = edge.cell2.row * cols + edge.cell2.col;
            if !sets.union(a, b) {
                continue;
            }
            let toward = edge.orientation.direction();
            cells[a].walls.open(toward);
            cells[b].walls.open(toward.opposite());
            unions += 1;
        }
        debug_assert_eq!(unions, rows * cols - 1);

        let goal = Self::border_cells(rows, cols)
            .choose(rng)
            .copied()
            .unwrap_or_default();
        cells[goal.row * cols + goal.col].is_goal = true;

        for cell in cells.iter_mut().filter(|cell| !cell.is_goal) {
            if cell.walls.open_sides() >= 3 {
                cell.is_intersection = true;
                cell.has_math_problem = true;
                cell.math_problem_type = ProblemKind::ALL.choose(rng).copied();
            }
        }

        let maze = Maze {
            rows,
            cols,
            cells,
            goal,
        };
        debug!(
            "generated {}x{} maze, goal at ({}, {}), {} problem cells",
            rows,
            cols,
            goal.row,
            goal.col,
            maze.problem_cells()
        );
        Ok(maze)
    }

    /// Every edge between orthogonally adjacent cells, once each.
    pub fn edges(rows: usize, cols: usize) -> Vec<Edge> {
        let capacity = rows * cols.saturating_sub(1) + cols * rows.saturating_sub(1);
        let mut edges = Vec::with_capacity(capacity);
        for row in 0..rows {
            for col in 0..cols {
                let current = Position::new(row, col);
                if col + 1 < cols {
                    edges.push(Edge {
                        cell1: current,
                        cell2: Position::new(row, col + 1),
                        orientation: Orientation::Vertical,
                    });
                }
                if row + 1 < rows {
                    edges.push(Edge {
                        cell1: current,
                        cell2: Position::new(row + 1, col),
                        orientation: Orientation::Horizontal,
                    });
                }
            }
        }
        edges
    }

    fn border_cells(rows: usize, cols: usize) -> Vec<Position> {
        let mut border = Vec::with_capacity(2 * (rows + cols));
        for col in 0..cols {
            border.push(Position::new(0, col));
            border.push(Position::new(rows - 1, col));
        }
        for row in 1..rows - 1 {
            border.push(Position::new(row, 0));
            border.push(Position::new(row, cols - 1));
        }
        border
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        if pos.row < self.rows && pos.col < self.cols {
            self.cells.get(pos.row * self.cols + pos.col)
        } else {
            None
        }
    }

    pub fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        if pos.row < self.rows && pos.col < self.cols {
            self.cells.get_mut(pos.row * self.cols + pos.col)
        } else {
            None
        }
    }

    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Neighbouring position in `direction`, ignoring walls.
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        let (d_row, d_col) = direction.delta();
        let row = pos.row as isize + d_row;
        let col = pos.col as isize + d_col;
        if self.contains(row, col) {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }

    pub fn is_open(&self, pos: Position, direction: Direction) -> bool {
        match self.cell(pos) {
            Some(cell) => !cell.walls.has(direction) && self.neighbor(pos, direction).is_some(),
            None => false,
        }
    }

    pub fn open_directions(&self, pos: Position) -> Vec<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .filter(|&direction| self.is_open(pos, direction))
            .collect()
    }

    /// Number of carved passages, each shared edge counted once.
    pub fn open_passages(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                let right = cell.col + 1 < self.cols && !cell.walls.right;
                let bottom = cell.row + 1 < self.rows && !cell.walls.bottom;
                right as usize + bottom as usize
            })
            .sum()
    }

    pub fn problem_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.has_math_problem).count()
    }

    /// The unique passage route between two cells, as a list of steps.
    pub fn path_between(&self, from: Position, to: Position) -> Option<Vec<Direction>> {
        self.cell(from)?;
        self.cell(to)?;

        let index = |pos: Position| pos.row * self.cols + pos.col;
        let mut came_from: Vec<Option<(Position, Direction)>> = vec![None; self.cells.len()];
        let mut visited = vec![false; self.cells.len()];
        let mut queue = VecDeque::from([from]);
        visited[index(from)] = true;

        while let Some(pos) = queue.pop_front() {
            if pos == to {
                break;
            }
            for direction in self.open_directions(pos) {
                if let Some(next) = self.neighbor(pos, direction) {
                    if !visited[index(next)] {
                        visited[index(next)] = true;
                        came_from[index(next)] = Some((pos, direction));
                        queue.push_back(next);
                    }
                }
            }
        }

        if !visited[index(to)] {
            return None;
        }
        let mut steps = Vec::new();
        let mut current = to;
        while let Some((previous, direction)) = came_from[index(current)] {
            steps.push(direction);
            current = previous;
        }
        steps.reverse();
        Some(steps)
    }
}

impl Index<Position> for Maze {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Cell {
        &self.cells[pos.row * self.cols + pos.col]
    }
}
