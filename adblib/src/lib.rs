//! adblib — средний дневной остаток по выгрузкам банковских остатков (CSV).

pub mod aggregate;
pub mod config;
pub mod error;
pub mod model;
pub mod period;
pub mod report;
pub mod sources;
pub mod traits;

pub mod formats {
    pub mod csv;
}

pub use aggregate::{compute_average_daily_balance, compute_from_sources};
pub use error::{AdbError, Result};
pub use model::{AggregateResult, FillPolicy};
pub use period::{Period, PeriodOverride};
