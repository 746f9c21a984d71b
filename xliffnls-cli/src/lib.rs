//! CLI library for testing purposes

pub mod config;
pub mod path_glob;
pub mod tasks;

pub use config::{LayoutOverrides, load_layout, parse_locales};
pub use tasks::{TaskFailure, TaskReport};
