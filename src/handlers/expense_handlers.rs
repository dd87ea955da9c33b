use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::api::ApiClient;
use crate::auth::{csrf, session::set_flash};
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::date_filter::{DateFilterQuery, DateRange};
use crate::models::expense::{self, Expense, ExpenseFormValues, ExpenseRequestForm};
use crate::models::group::{self, Group};
use crate::models::user::{BudgetSummary, User};
use crate::templates_structs::{EmployeeExpenseTemplate, PageContext};
use crate::validate;

/// Everything the page needs from the backend. A failed fetch leaves its slot empty.
struct PageData {
    user: Option<User>,
    expenses: Option<Vec<Expense>>,
    groups: Vec<Group>,
}

impl PageData {
    async fn fetch(api: &dyn ApiClient, user_id: &str) -> Self {
        let (user, expenses, groups) = tokio::join!(
            api.get_user_by_id(user_id),
            api.get_expenses_by_user_id(user_id),
            api.get_groups(),
        );

        let user = user
            .map_err(|e| log::warn!("Could not load user {user_id}: {e}"))
            .ok();
        let expenses = expenses
            .map_err(|e| log::error!("Could not load expenses for {user_id}: {e}"))
            .ok();
        let groups = groups
            .map_err(|e| log::warn!("Could not load groups: {e}"))
            .unwrap_or_default();

        Self { user, expenses, groups }
    }
}

fn page_path(user_id: &str) -> String {
    format!("/users/{user_id}/expenses")
}

fn checked_user_id(raw: String) -> Result<String, AppError> {
    if validate::is_valid_user_id(&raw) {
        Ok(raw)
    } else {
        Err(AppError::NotFound)
    }
}

fn build_page(
    ctx: PageContext,
    user_id: &str,
    data: PageData,
    query: &DateFilterQuery,
    form: ExpenseFormValues,
    form_errors: Vec<String>,
) -> EmployeeExpenseTemplate {
    let (range, filter_errors) = match DateRange::parse(query) {
        Ok(range) => (range, vec![]),
        Err(errors) => (DateRange::default(), errors),
    };

    let display_name = data
        .user
        .as_ref()
        .map(|u| u.display_name(user_id))
        .unwrap_or_else(|| user_id.to_string());
    let budget = match (&data.user, &data.expenses) {
        (Some(User { budget: Some(budget), .. }), Some(list)) => Some(BudgetSummary {
            budget: *budget,
            committed: expense::committed_total(list),
        }),
        _ => None,
    };
    let group_names = group::names_for_user(&data.groups, user_id);
    let expenses = data.expenses.map(|list| range.apply(&list));

    EmployeeExpenseTemplate {
        ctx,
        user_id: user_id.to_string(),
        display_name,
        budget,
        group_names,
        form_action: page_path(user_id),
        form,
        form_errors,
        filter_start: query.start_str().to_string(),
        filter_end: query.end_str().to_string(),
        filter_errors,
        filter_active: !range.is_unbounded(),
        expenses,
    }
}

pub async fn page(
    api: web::Data<dyn ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<String>,
    query: web::Query<DateFilterQuery>,
) -> Result<HttpResponse, AppError> {
    let user_id = checked_user_id(path.into_inner())?;
    let ctx = PageContext::build(&session, &config, &page_path(&user_id));

    let data = PageData::fetch(api.get_ref(), &user_id).await;
    let tmpl = build_page(ctx, &user_id, data, &query, ExpenseFormValues::default(), vec![]);
    render(tmpl)
}

pub async fn request(
    api: web::Data<dyn ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<ExpenseRequestForm>,
) -> Result<HttpResponse, AppError> {
    let user_id = checked_user_id(path.into_inner())?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let query = DateFilterQuery::new(&form.start, &form.end);

    let errors = match form.to_draft(&user_id) {
        Ok(draft) => match api.request_expense(&draft).await {
            Ok(()) => {
                log::info!(
                    "Expense requested for {user_id}: {:.2} on {}",
                    draft.amount,
                    draft.date
                );
                csrf::rotate_token(&session);
                set_flash(&session, "Expense request submitted");
                // Only a well-formed range survives the redirect.
                let filter = DateRange::parse(&query).unwrap_or_default().to_query();
                return Ok(HttpResponse::SeeOther()
                    .insert_header(("Location", format!("{}{filter}", page_path(&user_id))))
                    .finish());
            }
            Err(e) => {
                log::error!("Expense request for {user_id} failed: {e}");
                vec![format!("Could not submit expense request: {e}")]
            }
        },
        Err(errors) => errors,
    };

    let ctx = PageContext::build(&session, &config, &page_path(&user_id));
    let data = PageData::fetch(api.get_ref(), &user_id).await;
    let tmpl = build_page(ctx, &user_id, data, &query, ExpenseFormValues::from(&*form), errors);
    render(tmpl)
}

/// `/expenses` shortcut to the configured default user's page.
pub async fn my_expenses(config: web::Data<AppConfig>) -> Result<HttpResponse, AppError> {
    match config.default_user_id.as_deref() {
        Some(user_id) if validate::is_valid_user_id(user_id) => Ok(HttpResponse::SeeOther()
            .insert_header(("Location", page_path(user_id)))
            .finish()),
        _ => Err(AppError::NotFound),
    }
}
