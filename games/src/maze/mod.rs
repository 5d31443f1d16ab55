pub mod config;
pub mod controller;
pub mod error;
pub mod game;
pub mod map;
pub mod problems;
pub mod stats;
pub mod theme;
