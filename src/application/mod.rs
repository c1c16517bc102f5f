// Application layer - orchestrates the ledger and the view.
// The controller is the only place that mutates the ledger; the view only
// ever receives plain data from it.

pub mod controller;
pub mod error;
pub mod reporting;

pub use controller::*;
pub use error::*;
pub use reporting::*;
