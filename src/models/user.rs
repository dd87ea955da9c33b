use serde::{Deserialize, Serialize};

/// Profile of the employee whose expenses are shown. Read-only on this side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "UserWire")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: Option<String>,
    pub budget: Option<f64>,
}

/// Profile document as the backend sends it; the id may arrive under `_id`,
/// `id` or `userId`, in that order of preference.
#[derive(Deserialize)]
struct UserWire {
    #[serde(rename = "_id", default)]
    doc_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "userId", default)]
    user_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    budget: Option<f64>,
}

impl From<UserWire> for User {
    fn from(wire: UserWire) -> Self {
        Self {
            id: wire.doc_id.or(wire.id).or(wire.user_id).unwrap_or_default(),
            name: wire.name,
            budget: wire.budget,
        }
    }
}

impl User {
    /// Name to show in the page header, falling back to the requested id.
    pub fn display_name(&self, fallback_id: &str) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ if !self.id.is_empty() => self.id.clone(),
            _ => fallback_id.to_string(),
        }
    }
}

/// Budget figures shown above the request form.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSummary {
    pub budget: f64,
    pub committed: f64,
}

impl BudgetSummary {
    pub fn remaining(&self) -> f64 {
        self.budget - self.committed
    }

    pub fn is_over(&self) -> bool {
        self.remaining() < 0.0
    }

    pub fn budget_display(&self) -> String {
        format!("{:.2}", self.budget)
    }

    pub fn committed_display(&self) -> String {
        format!("{:.2}", self.committed)
    }

    pub fn remaining_display(&self) -> String {
        format!("{:.2}", self.remaining())
    }
}
