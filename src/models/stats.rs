use std::collections::HashSet;

use crate::models::group::Group;

/// Head counts shown in the stats panel. `None` renders as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsCounts {
    pub employees: Option<u64>,
    pub managers: Option<u64>,
    pub groups: Option<u64>,
}

impl StatsCounts {
    /// Derive counts from the group list: distinct managers, distinct
    /// non-manager members, and the number of groups.
    pub fn from_groups(groups: &[Group]) -> Self {
        let managers: HashSet<&str> = groups.iter().filter_map(|g| g.manager.as_deref()).collect();
        let employees: HashSet<&str> = groups
            .iter()
            .flat_map(|g| g.members.iter().map(String::as_str))
            .filter(|m| !managers.contains(m))
            .collect();

        Self {
            employees: Some(employees.len() as u64),
            managers: Some(managers.len() as u64),
            groups: Some(groups.len() as u64),
        }
    }
}
