// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use budgety::application::{AppError, BudgetController};
use budgety::domain::{Item, Kind, Ledger};
use budgety::presentation::Page;
use chrono::NaiveDate;

/// Month every test controller is initialised with.
pub fn test_month() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

/// Helper to create a controller over a fresh ledger and page
pub fn test_controller() -> BudgetController<Page> {
    let mut controller = BudgetController::new(Ledger::new(), Page::new());
    controller.init(test_month());
    controller
}

/// Type into the form and press "add"
pub fn submit(
    controller: &mut BudgetController<Page>,
    kind: Kind,
    description: &str,
    value: &str,
) -> Result<Item, AppError> {
    controller.view_mut().fill_form(kind, description, value);
    controller.add_item()
}

/// Test fixture: a small monthly budget
pub struct StandardBudget;

impl StandardBudget {
    /// Salary 1000 plus Rent 300: budget 700, 30% spent
    pub fn create_basic(controller: &mut BudgetController<Page>) -> Result<(), AppError> {
        submit(controller, Kind::Income, "Salary", "1000")?;
        submit(controller, Kind::Expense, "Rent", "300")?;
        Ok(())
    }

    /// Basic budget plus a few smaller expenses
    pub fn create_with_expenses(controller: &mut BudgetController<Page>) -> Result<(), AppError> {
        Self::create_basic(controller)?;
        submit(controller, Kind::Expense, "Groceries", "150")?;
        submit(controller, Kind::Expense, "Gym", "45")?;
        Ok(())
    }
}
