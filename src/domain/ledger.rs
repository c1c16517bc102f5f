use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Cents, Item, ItemId, Kind, Percentage};

/// Sum of item values. Zero for an empty slice, saturating at the `Cents` range.
pub fn compute_total(items: &[Item]) -> Cents {
    items
        .iter()
        .fold(0, |total: Cents, item| total.saturating_add(item.value))
}

/// Ledger-wide figures derived from the item collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Aggregates {
    pub budget: Cents,
    pub total_income: Cents,
    pub total_expense: Cents,
    pub percentage: Percentage,
}

impl Aggregates {
    /// Aggregates for the given totals.
    pub fn from_totals(total_income: Cents, total_expense: Cents) -> Self {
        Self {
            budget: total_income.saturating_sub(total_expense),
            total_income,
            total_expense,
            percentage: Percentage::of(total_expense, total_income),
        }
    }
}

/// In-memory income/expense ledger.
///
/// Items are kept per kind in insertion order, which is also display order.
/// Aggregates are recomputed from scratch on request and are considered
/// stale after every mutation until the next [`Ledger::recompute_aggregates`].
#[derive(Debug, Clone)]
pub struct Ledger {
    income: Vec<Item>,
    expense: Vec<Item>,
    aggregates: Aggregates,
    fresh: bool,
    // Ids handed out so far per kind; never lowered by a delete
    next_income_id: ItemId,
    next_expense_id: ItemId,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            income: Vec::new(),
            expense: Vec::new(),
            aggregates: Aggregates::default(),
            fresh: true,
            next_income_id: 0,
            next_expense_id: 0,
        }
    }

    fn collection(&self, kind: Kind) -> &Vec<Item> {
        match kind {
            Kind::Income => &self.income,
            Kind::Expense => &self.expense,
        }
    }

    fn collection_mut(&mut self, kind: Kind) -> &mut Vec<Item> {
        match kind {
            Kind::Income => &mut self.income,
            Kind::Expense => &mut self.expense,
        }
    }

    /// Id the next item of `kind` will get: one past the highest id ever
    /// assigned to that kind, or 0. Deleted ids are never handed out again.
    pub fn next_id(&self, kind: Kind) -> ItemId {
        match kind {
            Kind::Income => self.next_income_id,
            Kind::Expense => self.next_expense_id,
        }
    }

    /// True when adding `value` to the `kind` total stays within range.
    pub fn can_add(&self, kind: Kind, value: Cents) -> bool {
        compute_total(self.collection(kind)).checked_add(value).is_some()
    }

    /// Append a new item and return a copy of it.
    ///
    /// Callers validate input; the ledger accepts whatever it is given.
    pub fn add_item(&mut self, kind: Kind, description: impl Into<String>, value: Cents) -> Item {
        let id = self.next_id(kind);
        let item = Item::new(id, kind, description.into(), value);
        match kind {
            Kind::Income => self.next_income_id = id + 1,
            Kind::Expense => self.next_expense_id = id + 1,
        }
        debug!(kind = %kind, id = item.id, value, "item added");

        self.collection_mut(kind).push(item.clone());
        self.fresh = false;
        item
    }

    /// Remove the item with `id` from the `kind` collection.
    /// Returns `None` and leaves the ledger untouched if there is no such item.
    pub fn delete_item(&mut self, kind: Kind, id: ItemId) -> Option<Item> {
        let items = self.collection_mut(kind);
        let index = items.iter().position(|item| item.id == id)?;
        let removed = items.remove(index);
        debug!(kind = %kind, id, "item deleted");

        self.fresh = false;
        Some(removed)
    }

    /// Recompute totals, budget and the overall expense percentage.
    pub fn recompute_aggregates(&mut self) {
        self.aggregates =
            Aggregates::from_totals(compute_total(&self.income), compute_total(&self.expense));
        self.fresh = true;
    }

    /// Refresh every expense's share of `total_income`.
    pub fn recompute_expense_percentages(&mut self, total_income: Cents) {
        for expense in &mut self.expense {
            expense.calc_percentage(total_income);
        }
    }

    /// Recompute aggregates, then percentages against the fresh income total.
    pub fn recalculate(&mut self) -> Aggregates {
        self.recompute_aggregates();
        self.recompute_expense_percentages(self.aggregates.total_income);
        self.aggregates
    }

    pub fn snapshot_aggregates(&self) -> Aggregates {
        self.aggregates
    }

    /// Expense percentages in display order.
    pub fn snapshot_expense_percentages(&self) -> Vec<Percentage> {
        self.expense
            .iter()
            .map(|item| item.percentage.unwrap_or_default())
            .collect()
    }

    /// False when items changed since the last aggregate recomputation.
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub fn items(&self, kind: Kind) -> &[Item] {
        self.collection(kind)
    }

    pub fn get(&self, kind: Kind, id: ItemId) -> Option<&Item> {
        self.collection(kind).iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.income.len() + self.expense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
