use serde::{Deserialize, Serialize};

/// A team of employees with an optional manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
}

impl Group {
    pub fn has_member(&self, user_id: &str) -> bool {
        self.manager.as_deref() == Some(user_id) || self.members.iter().any(|m| m == user_id)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// Names of the groups a user belongs to, in backend order.
pub fn names_for_user(groups: &[Group], user_id: &str) -> Vec<String> {
    groups
        .iter()
        .filter(|g| g.has_member(user_id))
        .map(|g| g.name.clone())
        .collect()
}
