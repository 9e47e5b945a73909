// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod csv;
pub mod dom;
pub mod events;
pub mod message;

pub mod enhance;
pub mod picker;
pub mod page;

pub mod cli;
pub mod file;
pub mod gui;
