pub mod collision;
pub mod config;
pub mod error;
pub mod field;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
