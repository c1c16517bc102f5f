use serde::{Deserialize, Serialize};

use super::Cents;

pub type ItemId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Money coming in: salary, sales, refunds
    Income,
    /// Money going out: rent, groceries, bills
    Expense,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" | "inc" | "+" => Some(Kind::Income),
            "expense" | "exp" | "-" => Some(Kind::Expense),
            _ => None,
        }
    }

    /// The other kind; used by the type selector toggle.
    pub fn toggled(&self) -> Self {
        match self {
            Kind::Income => Kind::Expense,
            Kind::Expense => Kind::Income,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Share of income, rounded to a whole percent.
///
/// `Undefined` means no income has been recorded, which is not the same
/// reading as `Value(0)`. On the wire it is written as `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i64", from = "i64")]
pub enum Percentage {
    #[default]
    Undefined,
    Value(u32),
}

impl Percentage {
    /// `round(part / whole * 100)` with half-up rounding, or `Undefined` when
    /// `whole` is not positive.
    pub fn of(part: Cents, whole: Cents) -> Self {
        if whole <= 0 {
            return Percentage::Undefined;
        }
        let part = i128::from(part.max(0));
        let whole = i128::from(whole);
        let rounded = (part * 200 + whole) / (whole * 2);
        Percentage::Value(u32::try_from(rounded).unwrap_or(u32::MAX))
    }
}

impl From<Percentage> for i64 {
    fn from(p: Percentage) -> Self {
        match p {
            Percentage::Undefined => -1,
            Percentage::Value(v) => i64::from(v),
        }
    }
}

impl From<i64> for Percentage {
    fn from(raw: i64) -> Self {
        match u32::try_from(raw) {
            Ok(v) => Percentage::Value(v),
            Err(_) => Percentage::Undefined,
        }
    }
}

/// A single income or expense line.
///
/// `percentage` is only ever `Some` for expenses; it holds the item's share
/// of total income as of the last recalculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: Kind,
    pub description: String,
    pub value: Cents,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Percentage>,
}

impl Item {
    pub fn new(id: ItemId, kind: Kind, description: String, value: Cents) -> Self {
        let percentage = match kind {
            Kind::Income => None,
            Kind::Expense => Some(Percentage::Undefined),
        };
        Self {
            id,
            kind,
            description,
            value,
            percentage,
        }
    }

    /// Page handle for this item, e.g. `expense-3`.
    pub fn element_id(&self) -> String {
        format!("{}-{}", self.kind, self.id)
    }

    /// Refresh the share of income. Has no effect on income items.
    pub fn calc_percentage(&mut self, total_income: Cents) {
        if self.kind == Kind::Expense {
            self.percentage = Some(Percentage::of(self.value, total_income));
        }
    }
}

/// Split an element id like `income-4` back into kind and id.
pub fn parse_element_id(element_id: &str) -> Option<(Kind, ItemId)> {
    let (kind, id) = element_id.trim().split_once('-')?;
    let kind = match kind {
        "income" => Kind::Income,
        "expense" => Kind::Expense,
        _ => return None,
    };
    Some((kind, id.parse().ok()?))
}
