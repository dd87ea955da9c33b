use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::validate;

/// Lifecycle state of an expense request as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Other,
}

impl ExpenseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseStatus::Pending => "Pending",
            ExpenseStatus::Approved => "Approved",
            ExpenseStatus::Rejected => "Rejected",
            ExpenseStatus::Other => "Other",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            ExpenseStatus::Pending => "badge-warning",
            ExpenseStatus::Approved => "badge-success",
            ExpenseStatus::Rejected => "badge-danger",
            ExpenseStatus::Other => "badge-muted",
        }
    }

    /// Pending and approved requests count against the budget.
    pub fn is_committed(&self) -> bool {
        matches!(self, ExpenseStatus::Pending | ExpenseStatus::Approved)
    }
}

/// A single spend record owned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExpenseWire")]
pub struct Expense {
    #[serde(rename = "_id")]
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub status: ExpenseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Expense document as the backend sends it. Documents may carry `_id`, `id`
/// or both; `_id` wins.
#[derive(Deserialize)]
struct ExpenseWire {
    #[serde(rename = "_id", default)]
    doc_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    description: String,
    amount: f64,
    #[serde(deserialize_with = "deserialize_date")]
    date: NaiveDate,
    #[serde(default)]
    status: ExpenseStatus,
    #[serde(default)]
    category: Option<String>,
}

impl TryFrom<ExpenseWire> for Expense {
    type Error = String;

    fn try_from(wire: ExpenseWire) -> Result<Self, Self::Error> {
        let id = wire
            .doc_id
            .or(wire.id)
            .ok_or_else(|| "missing field `_id`".to_string())?;
        Ok(Self {
            id,
            description: wire.description,
            amount: wire.amount,
            date: wire.date,
            status: wire.status,
            category: wire.category,
        })
    }
}

impl Expense {
    pub fn amount_display(&self) -> String {
        format!("{:.2}", self.amount)
    }
}

/// Sum of all pending and approved amounts.
pub fn committed_total(expenses: &[Expense]) -> f64 {
    expenses
        .iter()
        .filter(|e| e.status.is_committed())
        .map(|e| e.amount)
        .sum()
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; only the calendar date is kept.
fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_wire_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
}

pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    // Timestamps without an offset, e.g. "2024-12-01T00:00:00".
    raw.get(..10)
        .filter(|_| raw.as_bytes().get(10) == Some(&b'T'))
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Payload sent to the backend when an employee requests a new expense.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    pub user_id: String,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Submitted request-expense form. The filter fields carry the active date
/// range so the redirect can restore it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseRequestForm {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

/// Values echoed back into the form after a failed submit.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFormValues {
    pub description: String,
    pub amount: String,
    pub date: String,
    pub category: String,
}

impl From<&ExpenseRequestForm> for ExpenseFormValues {
    fn from(form: &ExpenseRequestForm) -> Self {
        Self {
            description: form.description.clone(),
            amount: form.amount.clone(),
            date: form.date.clone(),
            category: form.category.clone(),
        }
    }
}

impl ExpenseRequestForm {
    /// Validate the form and build the backend payload, or return every error found.
    pub fn to_draft(&self, user_id: &str) -> Result<ExpenseDraft, Vec<String>> {
        let mut errors = vec![];
        errors.extend(validate::validate_required(&self.description, "Description", 200));
        errors.extend(validate::validate_optional(&self.category, "Category", 50));

        let amount = match validate::parse_amount(&self.amount) {
            Ok(amount) => Some(amount),
            Err(e) => {
                errors.push(e);
                None
            }
        };
        let date = match validate::parse_date(&self.date, "Date") {
            Ok(date) => Some(date),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        match (amount, date) {
            (Some(amount), Some(date)) if errors.is_empty() => {
                let category = self.category.trim();
                Ok(ExpenseDraft {
                    user_id: user_id.to_string(),
                    description: self.description.trim().to_string(),
                    amount,
                    date,
                    category: (!category.is_empty()).then(|| category.to_string()),
                })
            }
            _ => Err(errors),
        }
    }
}
