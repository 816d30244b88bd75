pub mod comparison;
pub mod details;
pub mod scenario;

#[cfg(feature = "series")]
pub mod series;

pub use comparison::{compare_instruments, AggregateMaxima, ComparisonOutput, RankedInstrument};
pub use details::{simulate_instrument, ProjectionResult};
pub use scenario::SimulationInput;

#[cfg(feature = "series")]
pub use series::{build_series, SeriesBasis, SeriesOutput, SeriesPoint};
