pub mod maze;

pub use crossterm;
pub use ratatui;
