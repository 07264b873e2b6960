//! airops library
//!
//! A cache-augmented client for the airline operations service, flight
//! filtering and pagination, and the terminal front end built on them.

pub mod api;
pub mod app;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod data;
pub mod logging;
pub mod ui;
