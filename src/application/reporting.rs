use serde::{Deserialize, Serialize};

use crate::domain::{Aggregates, Item, Kind, Ledger};

/// Snapshot of the whole budget: summary figures plus every item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetReport {
    pub month: String,
    pub aggregates: Aggregates,
    pub income: Vec<Item>,
    pub expense: Vec<Item>,
}

impl BudgetReport {
    /// Build a report from the ledger's last computed state.
    pub fn from_ledger(ledger: &Ledger, month: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            aggregates: ledger.snapshot_aggregates(),
            income: ledger.items(Kind::Income).to_vec(),
            expense: ledger.items(Kind::Expense).to_vec(),
        }
    }

    /// All items, income first, each list in display order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.income.iter().chain(&self.expense)
    }
}
