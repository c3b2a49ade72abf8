pub mod collab;
pub mod config;
pub mod core;
pub mod logging;
pub mod menu;
pub mod model;
pub mod notify;
pub mod playlist;
pub mod queue;
