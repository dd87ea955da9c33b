use async_trait::async_trait;
use chrono::{Duration, Local};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{ApiClient, ApiError, ApiResult};
use crate::models::expense::{Expense, ExpenseDraft, ExpenseStatus};
use crate::models::group::Group;
use crate::models::user::User;

#[derive(Default)]
struct Store {
    users: Vec<User>,
    groups: Vec<Group>,
    expenses: HashMap<String, Vec<Expense>>,
    next_id: u64,
}

/// Stateful backend kept in process memory. Used when no backend URL is
/// configured; requested expenses are stored as pending.
#[derive(Default)]
pub struct InMemoryApiClient {
    store: Mutex<Store>,
}

impl InMemoryApiClient {
    pub fn new(users: Vec<User>, groups: Vec<Group>) -> Self {
        Self {
            store: Mutex::new(Store { users, groups, expenses: HashMap::new(), next_id: 1 }),
        }
    }

    /// Store an existing expense for `user_id`.
    pub fn insert_expense(&self, user_id: &str, expense: Expense) {
        self.lock()
            .expenses
            .entry(user_id.to_string())
            .or_default()
            .push(expense);
    }

    /// A small seeded organisation for trying the UI without a backend.
    pub fn demo() -> Self {
        let person = |id: &str, name: &str, budget: f64| User {
            id: id.to_string(),
            name: Some(name.to_string()),
            budget: Some(budget),
        };
        let users = vec![
            person("alice", "Alice Johnson", 1500.0),
            person("bob", "Bob Smith", 800.0),
            person("carol", "Carol White", 2500.0),
            person("dave", "Dave Brown", 600.0),
        ];
        let groups = vec![
            Group {
                id: "g-sales".into(),
                name: "Sales".into(),
                manager: Some("carol".into()),
                members: vec!["alice".into(), "bob".into()],
            },
            Group {
                id: "g-support".into(),
                name: "Support".into(),
                manager: Some("carol".into()),
                members: vec!["dave".into()],
            },
        ];
        let client = Self::new(users, groups);

        let today = Local::now().date_naive();
        let seed = [
            ("alice", "Client lunch", 86.40, 3, ExpenseStatus::Approved),
            ("alice", "Train to conference", 142.00, 17, ExpenseStatus::Pending),
            ("alice", "Hotel upgrade", 210.00, 45, ExpenseStatus::Rejected),
            ("bob", "Office supplies", 37.15, 9, ExpenseStatus::Approved),
        ];
        for (n, (user, description, amount, days_ago, status)) in seed.into_iter().enumerate() {
            client.insert_expense(
                user,
                Expense {
                    id: format!("demo-{}", n + 1),
                    description: description.to_string(),
                    amount,
                    date: today - Duration::days(days_ago),
                    status,
                    category: None,
                },
            );
        }
        client
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ApiClient for InMemoryApiClient {
    async fn get_groups(&self) -> ApiResult<Vec<Group>> {
        Ok(self.lock().groups.clone())
    }

    async fn get_user_by_id(&self, user_id: &str) -> ApiResult<User> {
        self.lock()
            .users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or(ApiError::Status(404))
    }

    async fn get_expenses_by_user_id(&self, user_id: &str) -> ApiResult<Vec<Expense>> {
        Ok(self.lock().expenses.get(user_id).cloned().unwrap_or_default())
    }

    async fn request_expense(&self, draft: &ExpenseDraft) -> ApiResult<()> {
        let mut store = self.lock();
        let id = format!("exp-{}", store.next_id);
        store.next_id += 1;
        store
            .expenses
            .entry(draft.user_id.clone())
            .or_default()
            .push(Expense {
                id,
                description: draft.description.clone(),
                amount: draft.amount,
                date: draft.date,
                status: ExpenseStatus::Pending,
                category: draft.category.clone(),
            });
        Ok(())
    }
}
