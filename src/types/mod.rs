pub mod chart;
pub mod prediction;
pub mod signals;

pub use chart::*;
pub use prediction::*;
pub use signals::*;
