/// The two kinds of block membership change the log records.
mod category;
pub use self::category::EventCategory;

/// Totals, distinct counts and the fixed-point efficiency ratio.
mod metrics;
pub use self::metrics::{Metrics, Efficiency, EFFICIENCY_SCALE};

/// Loads a log file and counts the lines of each category.
mod counter;
pub use self::counter::{LogEventCounter, Report};

mod error;
pub use self::error::Error;
