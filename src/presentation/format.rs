use crate::domain::{Cents, Kind, Percentage};

/// Shown wherever a percentage has no meaning yet.
pub const PLACEHOLDER: &str = "---";

/// Sign prefix used when rendering amounts of the given kind.
pub fn sign_for(kind: Kind) -> char {
    match kind {
        Kind::Income => '+',
        Kind::Expense => '-',
    }
}

/// Group the integer part of a decimal string with commas.
/// Example: "2310" -> "2,310", "1234567" -> "1,234,567"
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Absolute value with 2 decimals and comma-grouped thousands, prefixed
/// with the sign for `kind`.
/// Example: (231046, Income) -> "+ 2,310.46", (2000_00, Expense) -> "- 2,000.00"
pub fn format_amount(cents: Cents, kind: Kind) -> String {
    let abs_cents = cents.unsigned_abs();
    let units = group_thousands(&(abs_cents / 100).to_string());
    format!("{} {}.{:02}", sign_for(kind), units, abs_cents % 100)
}

/// Budget reads as income only when something is left; zero shows as `- 0.00`.
pub fn format_budget(budget: Cents) -> String {
    let kind = if budget > 0 {
        Kind::Income
    } else {
        Kind::Expense
    };
    format_amount(budget, kind)
}

pub fn format_percentage(percentage: Percentage) -> String {
    match percentage {
        Percentage::Undefined => PLACEHOLDER.to_string(),
        Percentage::Value(v) => format!("{}%", v),
    }
}
