pub mod application;
pub mod commands;
pub mod package;
pub mod platform;
pub mod runtime;
