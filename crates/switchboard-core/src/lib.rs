//! Headless domain for Switchboard (catalog, config, favourites, host traits).

pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod host;
pub mod registry;
