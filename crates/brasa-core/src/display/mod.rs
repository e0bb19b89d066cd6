//! Display formatting functions and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! newtype wrappers cover lists and operation results. All output is markdown
//! for the CLI's terminal renderer.
//!
//! - [`collections`]: [`Orders`], [`Shifts`]
//! - [`results`]: [`CreateResult`] and the transition outcome
//! - [`status`]: [`OperationStatus`]
//! - [`datetime`]: [`LocalDateTime`], [`Elapsed`], [`Money`]
//!
//! ```rust
//! use brasa_core::display::OperationStatus;
//!
//! let status = OperationStatus::failure("Order 42 was already taken".to_string());
//! assert_eq!(status.to_string(), "Error: Order 42 was already taken\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

#[cfg(test)]
mod tests;

pub use collections::{Orders, Shifts};
pub use datetime::{Elapsed, LocalDateTime, Money};
pub use results::CreateResult;
pub use status::OperationStatus;
