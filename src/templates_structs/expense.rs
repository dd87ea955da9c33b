use askama::Template;

use super::PageContext;
use crate::models::expense::{Expense, ExpenseFormValues};
use crate::models::user::BudgetSummary;

#[derive(Template)]
#[template(path = "expenses.html")]
pub struct EmployeeExpenseTemplate {
    pub ctx: PageContext,
    pub user_id: String,
    pub display_name: String,
    pub budget: Option<BudgetSummary>,
    pub group_names: Vec<String>,
    pub form_action: String,
    pub form: ExpenseFormValues,
    pub form_errors: Vec<String>,
    pub filter_start: String,
    pub filter_end: String,
    pub filter_errors: Vec<String>,
    pub filter_active: bool,
    /// `None` when the expense fetch failed.
    pub expenses: Option<Vec<Expense>>,
}
