pub mod amortization;
pub mod error;
pub mod operating;
pub mod types;

#[cfg(feature = "deal")]
pub mod deal;

#[cfg(feature = "scenarios")]
pub mod scenarios;

#[cfg(feature = "projection")]
pub mod projection;

pub use error::ReiError;
pub use types::*;

/// Standard result type for all rei-core operations
pub type ReiResult<T> = Result<T, ReiError>;
