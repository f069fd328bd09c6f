// Domain layer - Observations, history and monitor state
pub mod band;
pub mod history;
pub mod monitor;
pub mod observation;
