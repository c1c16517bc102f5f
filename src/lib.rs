pub mod application;
pub mod cli;
pub mod domain;
pub mod io;
pub mod presentation;

pub use application::BudgetController;
pub use domain::*;
pub use presentation::{Page, Presenter};
