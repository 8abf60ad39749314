use dv_core::{DvError, Tick};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("routing agent failed: {0}")]
    Agent(#[from] DvError),

    #[error("no quiescence by tick {max_ticks} (next event at {next})")]
    NotQuiescent { max_ticks: u64, next: Tick },
}

pub type SimResult<T> = Result<T, SimError>;
