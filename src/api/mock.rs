use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{ApiClient, ApiError, ApiResult};
use crate::models::expense::{Expense, ExpenseDraft};
use crate::models::group::Group;
use crate::models::user::User;

/// A call received by [`MockApiClient`], in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    GetGroups,
    GetUserById(String),
    GetExpensesByUserId(String),
    RequestExpense(ExpenseDraft),
}

/// One-shot responses are consumed first, then the sticky default applies.
struct Scripted<T> {
    once: VecDeque<ApiResult<T>>,
    default: ApiResult<T>,
}

impl<T: Clone> Scripted<T> {
    fn new(default: T) -> Self {
        Self { once: VecDeque::new(), default: Ok(default) }
    }

    fn next(&mut self) -> ApiResult<T> {
        self.once.pop_front().unwrap_or_else(|| self.default.clone())
    }
}

struct MockState {
    groups: Scripted<Vec<Group>>,
    user: Scripted<User>,
    expenses: Scripted<Vec<Expense>>,
    request: Scripted<()>,
    calls: Vec<ApiCall>,
}

/// Scripted test double for the expense backend.
pub struct MockApiClient {
    state: Mutex<MockState>,
}

impl Default for MockApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApiClient {
    /// Every call succeeds: no groups, a user named "Test User", no expenses.
    pub fn new() -> Self {
        let user = User { id: String::new(), name: Some("Test User".into()), budget: None };
        Self {
            state: Mutex::new(MockState {
                groups: Scripted::new(Vec::new()),
                user: Scripted::new(user),
                expenses: Scripted::new(Vec::new()),
                request: Scripted::new(()),
                calls: Vec::new(),
            }),
        }
    }

    pub fn with_user(self, user: User) -> Self {
        self.lock().user.default = Ok(user);
        self
    }

    pub fn with_groups(self, groups: Vec<Group>) -> Self {
        self.lock().groups.default = Ok(groups);
        self
    }

    pub fn with_expenses(self, expenses: Vec<Expense>) -> Self {
        self.lock().expenses.default = Ok(expenses);
        self
    }

    /// Queue the result of the next not-yet-scripted expense fetch.
    pub fn push_expenses_once(&self, expenses: Vec<Expense>) {
        self.lock().expenses.once.push_back(Ok(expenses));
    }

    pub fn fail_groups(&self, err: ApiError) {
        self.lock().groups.default = Err(err);
    }

    pub fn fail_user(&self, err: ApiError) {
        self.lock().user.default = Err(err);
    }

    pub fn fail_expenses(&self, err: ApiError) {
        self.lock().expenses.default = Err(err);
    }

    pub fn fail_request(&self, err: ApiError) {
        self.lock().request.default = Err(err);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    pub fn expense_fetches(&self) -> usize {
        self.count(|c| matches!(c, ApiCall::GetExpensesByUserId(_)))
    }

    /// Drafts passed to `request_expense`, oldest first.
    pub fn requested(&self) -> Vec<ExpenseDraft> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                ApiCall::RequestExpense(draft) => Some(draft.clone()),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&ApiCall) -> bool) -> usize {
        self.lock().calls.iter().filter(|c| pred(c)).count()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ApiClient for MockApiClient {
    async fn get_groups(&self) -> ApiResult<Vec<Group>> {
        let mut state = self.lock();
        state.calls.push(ApiCall::GetGroups);
        state.groups.next()
    }

    async fn get_user_by_id(&self, user_id: &str) -> ApiResult<User> {
        let mut state = self.lock();
        state.calls.push(ApiCall::GetUserById(user_id.to_string()));
        state.user.next()
    }

    async fn get_expenses_by_user_id(&self, user_id: &str) -> ApiResult<Vec<Expense>> {
        let mut state = self.lock();
        state.calls.push(ApiCall::GetExpensesByUserId(user_id.to_string()));
        state.expenses.next()
    }

    async fn request_expense(&self, draft: &ExpenseDraft) -> ApiResult<()> {
        let mut state = self.lock();
        state.calls.push(ApiCall::RequestExpense(draft.clone()));
        state.request.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn once_responses_take_priority() {
        let mock = MockApiClient::new();
        mock.push_expenses_once(vec![]);
        mock.push_expenses_once(vec![Expense {
            id: "1".into(),
            description: "New expense".into(),
            amount: 50.0,
            date: chrono::NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            status: Default::default(),
            category: None,
        }]);

        assert!(mock.get_expenses_by_user_id("u").await.unwrap().is_empty());
        assert_eq!(mock.get_expenses_by_user_id("u").await.unwrap().len(), 1);
        assert!(mock.get_expenses_by_user_id("u").await.unwrap().is_empty());
        assert_eq!(mock.expense_fetches(), 3);
    }

    #[actix_rt::test]
    async fn failures_are_sticky_and_calls_recorded() {
        let mock = MockApiClient::new();
        mock.fail_user(ApiError::Unavailable("down".into()));

        assert!(mock.get_user_by_id("u1").await.is_err());
        assert!(mock.get_user_by_id("u1").await.is_err());
        assert_eq!(mock.get_groups().await, Ok(vec![]));
        assert_eq!(
            mock.calls(),
            vec![
                ApiCall::GetUserById("u1".into()),
                ApiCall::GetUserById("u1".into()),
                ApiCall::GetGroups,
            ]
        );
    }
}
