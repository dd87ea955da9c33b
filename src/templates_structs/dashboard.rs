use askama::Template;

use super::PageContext;
use crate::models::group::Group;
use crate::models::stats::StatsCounts;

/// Three head-count cards: Employees, Managers, Groups.
#[derive(Template, Debug, Clone, Default, PartialEq)]
#[template(path = "partials/stats_panel.html")]
pub struct StatsPanel {
    pub employees: u64,
    pub managers: u64,
    pub groups: u64,
}

impl StatsPanel {
    pub fn new(employees: Option<u64>, managers: Option<u64>, groups: Option<u64>) -> Self {
        Self {
            employees: employees.unwrap_or(0),
            managers: managers.unwrap_or(0),
            groups: groups.unwrap_or(0),
        }
    }
}

impl From<StatsCounts> for StatsPanel {
    fn from(counts: StatsCounts) -> Self {
        Self::new(counts.employees, counts.managers, counts.groups)
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub stats: StatsPanel,
    pub groups: Vec<Group>,
    pub load_error: Option<String>,
}
