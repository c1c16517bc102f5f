use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::domain::{parse_cents, Cents, Item, Kind, Ledger};
use crate::presentation::{FormInput, Presenter};

use super::{AppError, BudgetReport};

/// Check raw form input and turn it into a description and a value.
pub fn validate_input(input: &FormInput) -> Result<(String, Cents), AppError> {
    let description = input.description.trim();
    if description.is_empty() {
        return Err(AppError::EmptyDescription);
    }

    let value = parse_cents(&input.value).map_err(|reason| AppError::InvalidValue {
        value: input.value.clone(),
        reason,
    })?;

    if value == 0 {
        return Err(AppError::ZeroValue);
    }
    if value < 0 {
        return Err(AppError::NegativeValue(input.value.trim().to_string()));
    }

    Ok((description.to_string(), value))
}

/// Wires user actions to the ledger and pushes the results to the view.
///
/// Both collaborators are handed in by the caller, so every controller works
/// on its own ledger.
pub struct BudgetController<P: Presenter> {
    ledger: Ledger,
    view: P,
    month: Option<NaiveDate>,
}

impl<P: Presenter> BudgetController<P> {
    pub fn new(ledger: Ledger, view: P) -> Self {
        Self {
            ledger,
            view,
            month: None,
        }
    }

    /// Render the month label and whatever the ledger already holds.
    pub fn init(&mut self, today: NaiveDate) {
        self.month = Some(today);
        self.view.render_month(today);

        for kind in [Kind::Income, Kind::Expense] {
            for item in self.ledger.items(kind) {
                self.view.render_new_item(item);
            }
        }

        self.update_budget();
        self.update_percentages();
    }

    /// Handle the "add" trigger.
    ///
    /// Invalid input changes nothing and renders nothing; the error is only
    /// returned to the caller.
    pub fn add_item(&mut self) -> Result<Item, AppError> {
        let input = self.view.read_input();

        let (description, value) = validate_input(&input)
            .and_then(|(description, value)| {
                if self.ledger.can_add(input.kind, value) {
                    Ok((description, value))
                } else {
                    Err(AppError::TotalOverflow(input.kind))
                }
            })
            .inspect_err(|e| {
                debug!(error = %e, "input rejected");
            })?;

        let item = self.ledger.add_item(input.kind, description, value);

        self.view.render_new_item(&item);
        self.view.clear_fields();
        self.update_budget();
        self.update_percentages();

        Ok(item)
    }

    /// Handle the "delete" trigger for the row with `element_id`.
    pub fn delete_item(&mut self, element_id: &str) -> Result<Item, AppError> {
        let element_id = element_id.trim();

        let target = self
            .view
            .resolve_target(element_id)
            .filter(|(kind, id)| self.ledger.get(*kind, *id).is_some());

        let Some((kind, id)) = target else {
            warn!(element_id, "delete target could not be resolved");
            return Err(AppError::UnresolvedTarget(element_id.to_string()));
        };

        let removed = self
            .ledger
            .delete_item(kind, id)
            .ok_or_else(|| AppError::UnresolvedTarget(element_id.to_string()))?;

        self.view.remove_rendered_item(element_id);
        self.update_budget();
        self.update_percentages();

        Ok(removed)
    }

    fn update_budget(&mut self) {
        self.ledger.recompute_aggregates();
        let aggregates = self.ledger.snapshot_aggregates();
        self.view.render_aggregates(&aggregates);
    }

    fn update_percentages(&mut self) {
        debug_assert!(self.ledger.is_fresh(), "percentages need fresh aggregates");

        let total_income = self.ledger.snapshot_aggregates().total_income;
        self.ledger.recompute_expense_percentages(total_income);
        self.view
            .render_expense_percentages(&self.ledger.snapshot_expense_percentages());
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn view(&self) -> &P {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut P {
        &mut self.view
    }

    /// Snapshot of the current state, labelled with the month passed to `init`.
    pub fn report(&self) -> BudgetReport {
        let month = self
            .month
            .map(|date| date.format("%B %Y").to_string())
            .unwrap_or_default();
        BudgetReport::from_ledger(&self.ledger, month)
    }
}
