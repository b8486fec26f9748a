pub mod signals;
pub mod synthetic;

pub use signals::PredictionEngine;
pub use synthetic::{generate_bars, generate_recent_bars};
