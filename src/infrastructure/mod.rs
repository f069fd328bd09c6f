// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod fifo_source;
pub mod signals;
pub mod terminal;
