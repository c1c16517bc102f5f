// Presentation layer - turns ledger data into what the user sees
mod format;
mod page;

pub use format::*;
pub use page::*;
