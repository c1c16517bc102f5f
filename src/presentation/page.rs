use std::fmt;

use chrono::NaiveDate;

use crate::domain::{parse_element_id, Aggregates, Item, ItemId, Kind, Percentage};

use super::format::{format_amount, format_budget, format_percentage, PLACEHOLDER};

/// Raw contents of the entry form, as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub kind: Kind,
    pub description: String,
    pub value: String,
}

/// What the controller needs from a view.
///
/// Every render call replaces the text it owns, so calling it twice with the
/// same data leaves the view unchanged.
pub trait Presenter {
    /// Current form fields.
    fn read_input(&self) -> FormInput;

    /// Empty the description and value fields. The selected kind stays.
    fn clear_fields(&mut self);

    /// Append a row for a freshly added item.
    fn render_new_item(&mut self, item: &Item);

    /// Drop the row with `element_id`. Returns false if there was none.
    fn remove_rendered_item(&mut self, element_id: &str) -> bool;

    fn render_aggregates(&mut self, aggregates: &Aggregates);

    /// Assign percentages to expense rows by position.
    fn render_expense_percentages(&mut self, percentages: &[Percentage]);

    fn render_month(&mut self, date: NaiveDate);

    /// Map a row's element id back to the item it shows.
    fn resolve_target(&self, element_id: &str) -> Option<(Kind, ItemId)>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub element_id: String,
    pub description: String,
    pub value: String,
    /// Only expense rows have a percentage cell.
    pub percentage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Labels {
    pub month: String,
    pub budget: String,
    pub income: String,
    pub expense: String,
    pub percentage: String,
}

/// The budget widget as text: entry form, summary labels and both item lists.
#[derive(Debug, Clone)]
pub struct Page {
    form: FormInput,
    labels: Labels,
    income_rows: Vec<Row>,
    expense_rows: Vec<Row>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            form: FormInput {
                kind: Kind::Income,
                description: String::new(),
                value: String::new(),
            },
            labels: Labels::default(),
            income_rows: Vec::new(),
            expense_rows: Vec::new(),
        }
    }

    pub fn form(&self) -> &FormInput {
        &self.form
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn rows(&self, kind: Kind) -> &[Row] {
        match kind {
            Kind::Income => &self.income_rows,
            Kind::Expense => &self.expense_rows,
        }
    }

    pub fn row(&self, element_id: &str) -> Option<&Row> {
        self.income_rows
            .iter()
            .chain(&self.expense_rows)
            .find(|row| row.element_id == element_id)
    }

    /// Type into all three form fields at once.
    pub fn fill_form(&mut self, kind: Kind, description: impl Into<String>, value: impl Into<String>) {
        self.form.kind = kind;
        self.form.description = description.into();
        self.form.value = value.into();
    }

    pub fn select_kind(&mut self, kind: Kind) {
        self.form.kind = kind;
    }

    /// Flip the type selector between income and expense.
    pub fn toggle_kind(&mut self) -> Kind {
        self.form.kind = self.form.kind.toggled();
        self.form.kind
    }

    fn rows_mut(&mut self, kind: Kind) -> &mut Vec<Row> {
        match kind {
            Kind::Income => &mut self.income_rows,
            Kind::Expense => &mut self.expense_rows,
        }
    }
}

impl Presenter for Page {
    fn read_input(&self) -> FormInput {
        self.form.clone()
    }

    fn clear_fields(&mut self) {
        self.form.description.clear();
        self.form.value.clear();
    }

    fn render_new_item(&mut self, item: &Item) {
        let row = Row {
            element_id: item.element_id(),
            description: item.description.clone(),
            value: format_amount(item.value, item.kind),
            percentage: item.percentage.map(|_| PLACEHOLDER.to_string()),
        };
        self.rows_mut(item.kind).push(row);
    }

    fn remove_rendered_item(&mut self, element_id: &str) -> bool {
        for kind in [Kind::Income, Kind::Expense] {
            let rows = self.rows_mut(kind);
            if let Some(index) = rows.iter().position(|row| row.element_id == element_id) {
                rows.remove(index);
                return true;
            }
        }
        false
    }

    fn render_aggregates(&mut self, aggregates: &Aggregates) {
        self.labels.budget = format_budget(aggregates.budget);
        self.labels.income = format_amount(aggregates.total_income, Kind::Income);
        self.labels.expense = format_amount(aggregates.total_expense, Kind::Expense);
        self.labels.percentage = format_percentage(aggregates.percentage);
    }

    fn render_expense_percentages(&mut self, percentages: &[Percentage]) {
        for (row, percentage) in self.expense_rows.iter_mut().zip(percentages) {
            row.percentage = Some(format_percentage(*percentage));
        }
    }

    fn render_month(&mut self, date: NaiveDate) {
        self.labels.month = date.format("%B %Y").to_string();
    }

    fn resolve_target(&self, element_id: &str) -> Option<(Kind, ItemId)> {
        let element_id = element_id.trim();
        self.row(element_id)?;
        parse_element_id(element_id)
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

fn write_rows(f: &mut fmt::Formatter<'_>, title: &str, rows: &[Row]) -> fmt::Result {
    writeln!(f, "{}", title)?;
    if rows.is_empty() {
        return writeln!(f, "  (none)");
    }
    for row in rows {
        write!(
            f,
            "  {:<12} {:<30} {:>16}",
            row.element_id,
            truncate(&row.description, 30),
            row.value
        )?;
        match &row.percentage {
            Some(percentage) => writeln!(f, " {:>6}", percentage)?,
            None => writeln!(f)?,
        }
    }
    Ok(())
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Available budget in {}:", self.labels.month)?;
        writeln!(f, "  {}", self.labels.budget)?;
        writeln!(f)?;
        writeln!(f, "  {:<10} {:>16}", "INCOME", self.labels.income)?;
        writeln!(
            f,
            "  {:<10} {:>16} {:>6}",
            "EXPENSES", self.labels.expense, self.labels.percentage
        )?;
        writeln!(f)?;
        write_rows(f, "INCOME", &self.income_rows)?;
        write_rows(f, "EXPENSES", &self.expense_rows)
    }
}
