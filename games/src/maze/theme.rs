use std::fmt;
use std::str::FromStr;

use env::rand::seq::IndexedRandom;
use env::rand::Rng;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};

use super::controller::DisplayedPosition;
use super::error::MazeError;
use super::map::{Cell, Maze};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Theme {
    Space,
    Ocean,
    Jungle,
    Candy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub wall: Color,
    pub path: Color,
    pub goal: Color,
    pub problem: Color,
    pub solved: Color,
    pub player: Color,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Space, Theme::Ocean, Theme::Jungle, Theme::Candy];

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Space => "space",
            Theme::Ocean => "ocean",
            Theme::Jungle => "jungle",
            Theme::Candy => "candy",
        }
    }

    pub fn next(&self) -> Theme {
        match self {
            Theme::Space => Theme::Ocean,
            Theme::Ocean => Theme::Jungle,
            Theme::Jungle => Theme::Candy,
            Theme::Candy => Theme::Space,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Theme {
        Theme::ALL.choose(rng).copied().unwrap_or(Theme::Space)
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Space => Palette {
                wall: Color::Rgb(0x2c, 0x3e, 0x50),
                path: Color::Rgb(0xf9, 0xfa, 0xfb),
                goal: Color::Rgb(0xff, 0xd7, 0x00),
                problem: Color::Rgb(0x9b, 0x59, 0xb6),
                solved: Color::Rgb(0x34, 0x98, 0xdb),
                player: Color::Rgb(0xe7, 0x4c, 0x3c),
            },
            Theme::Ocean => Palette {
                wall: Color::Rgb(0x1e, 0x88, 0xe5),
                path: Color::Rgb(0xe3, 0xf2, 0xfd),
                goal: Color::Rgb(0xff, 0xeb, 0x3b),
                problem: Color::Rgb(0x26, 0xa6, 0x9a),
                solved: Color::Rgb(0x66, 0xbb, 0x6a),
                player: Color::Rgb(0xff, 0x70, 0x43),
            },
            Theme::Jungle => Palette {
                wall: Color::Rgb(0x33, 0x69, 0x1e),
                path: Color::Rgb(0xdc, 0xed, 0xc8),
                goal: Color::Rgb(0xff, 0xc1, 0x07),
                problem: Color::Rgb(0xff, 0x98, 0x00),
                solved: Color::Rgb(0x8b, 0xc3, 0x4a),
                player: Color::Rgb(0x7b, 0x1f, 0xa2),
            },
            Theme::Candy => Palette {
                wall: Color::Rgb(0xe9, 0x1e, 0x63),
                path: Color::Rgb(0xfc, 0xe4, 0xec),
                goal: Color::Rgb(0xff, 0xeb, 0x3b),
                problem: Color::Rgb(0xab, 0x47, 0xbc),
                solved: Color::Rgb(0x26, 0xc6, 0xda),
                player: Color::Rgb(0x7c, 0xb3, 0x42),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .iter()
            .copied()
            .find(|theme| theme.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MazeError::InvalidConfig(format!("unknown theme '{}'", s)))
    }
}

/// Draws the read-only maze state exposed by the controller.
pub trait Renderer {
    fn theme(&self) -> Theme;
    fn render_maze(&self, maze: &Maze, player: DisplayedPosition) -> Text<'static>;
}

#[derive(Clone, Copy, PartialEq)]
enum Tile {
    Wall,
    Passage,
    Cell,
}

/// Draws the maze on a `(2 * rows + 1) x (2 * cols + 1)` tile grid, two
/// terminal columns per tile. Odd/odd tiles are cells, the tiles between them
/// are the shared walls.
pub struct TerminalRenderer {
    theme: Theme,
}

impl TerminalRenderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn tile(maze: &Maze, row: usize, col: usize) -> Tile {
        match (row % 2, col % 2) {
            (1, 1) => Tile::Cell,
            (0, 0) => Tile::Wall,
            (1, 0) => {
                // between (r, c-1) and (r, c)
                let cell_row = row / 2;
                let open = if col / 2 < maze.cols() {
                    !maze.cells()[cell_row * maze.cols() + col / 2].walls.left
                } else {
                    !maze.cells()[cell_row * maze.cols() + col / 2 - 1].walls.right
                };
                if open {
                    Tile::Passage
                } else {
                    Tile::Wall
                }
            }
            _ => {
                let cell_col = col / 2;
                let open = if row / 2 < maze.rows() {
                    !maze.cells()[(row / 2) * maze.cols() + cell_col].walls.top
                } else {
                    !maze.cells()[(row / 2 - 1) * maze.cols() + cell_col].walls.bottom
                };
                if open {
                    Tile::Passage
                } else {
                    Tile::Wall
                }
            }
        }
    }

    fn cell_span(&self, cell: &Cell) -> Span<'static> {
        let palette = self.theme.palette();
        if cell.is_goal {
            Span::styled("<>", Style::default().fg(Color::Black).bg(palette.goal))
        } else if cell.has_math_problem && !cell.math_problem_solved {
            Span::styled("??", Style::default().fg(Color::White).bg(palette.problem))
        } else if cell.has_math_problem {
            Span::styled("++", Style::default().fg(Color::White).bg(palette.solved))
        } else {
            Span::styled("  ", Style::default().bg(palette.path))
        }
    }
}

impl Renderer for TerminalRenderer {
    fn theme(&self) -> Theme {
        self.theme
    }

    fn render_maze(&self, maze: &Maze, player: DisplayedPosition) -> Text<'static> {
        let palette = self.theme.palette();
        // the player glides across the passage tiles while animating
        let player_row = (player.row * 2.0 + 1.0).round() as usize;
        let player_col = (player.col * 2.0 + 1.0).round() as usize;

        let mut lines = Vec::with_capacity(maze.rows() * 2 + 1);
        for row in 0..maze.rows() * 2 + 1 {
            let mut spans = Vec::with_capacity(maze.cols() * 2 + 1);
            for col in 0..maze.cols() * 2 + 1 {
                if row == player_row && col == player_col {
                    spans.push(Span::styled(
                        "@@",
                        Style::default().fg(palette.player).bg(palette.path),
                    ));
                    continue;
                }
                let span = match Self::tile(maze, row, col) {
                    Tile::Wall => Span::styled("  ", Style::default().bg(palette.wall)),
                    Tile::Passage => Span::styled("  ", Style::default().bg(palette.path)),
                    Tile::Cell => {
                        let cell = &maze.cells()[(row / 2) * maze.cols() + col / 2];
                        self.cell_span(cell)
                    }
                };
                spans.push(span);
            }
            lines.push(Line::from(spans));
        }
        Text::from(lines)
    }
}
