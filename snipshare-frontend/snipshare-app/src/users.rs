use snipshare_api_types::UserSummary;

pub const PERMITTED_USERS_FIELD: &str = "permitted_users[]";

/// The users a private snippet is shared with, and the pool they are picked
/// from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserPicker {
    users: Vec<UserSummary>,
    selected: Vec<UserSummary>,
}

impl UserPicker {
    pub fn new(users: Vec<UserSummary>) -> Self {
        Self {
            users,
            selected: Vec::new(),
        }
    }

    pub fn with_selected(mut self, selected: impl IntoIterator<Item = UserSummary>) -> Self {
        for user in selected {
            self.select(user);
        }
        self
    }

    pub fn selected(&self) -> &[UserSummary] {
        &self.selected
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.iter().any(|user| user.id == id)
    }

    /// Returns false when the user was already picked.
    pub fn select(&mut self, user: UserSummary) -> bool {
        if self.is_selected(user.id) {
            return false;
        }
        self.selected.push(user);
        true
    }

    pub fn deselect(&mut self, id: i64) -> bool {
        let before = self.selected.len();
        self.selected.retain(|user| user.id != id);
        before != self.selected.len()
    }

    /// Users whose name contains `filter`, minus the ones already picked. An
    /// empty filter matches nothing so the list stays hidden.
    pub fn matches(&self, filter: &str) -> Vec<UserSummary> {
        let filter = filter.trim().to_lowercase();
        if filter.is_empty() {
            return Vec::new();
        }
        self.users
            .iter()
            .filter(|user| user.name.to_lowercase().contains(&filter))
            .filter(|user| !self.is_selected(user.id))
            .cloned()
            .collect()
    }

    /// `(name, value)` pairs for the hidden inputs submitted with the form.
    pub fn hidden_fields(&self) -> Vec<(&'static str, String)> {
        self.selected
            .iter()
            .map(|user| (PERMITTED_USERS_FIELD, user.id.to_string()))
            .collect()
    }
}

/// Public/private flag of a snippet as carried in the `is_public` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub fn from_field(value: &str) -> Self {
        if value.trim() == "0" {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }

    pub fn field_value(self) -> &'static str {
        match self {
            Visibility::Public => "1",
            Visibility::Private => "0",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Visibility::Public => Visibility::Private,
            Visibility::Private => Visibility::Public,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Visibility::Public => "Public",
            Visibility::Private => "Private",
        }
    }

    pub fn is_private(self) -> bool {
        self == Visibility::Private
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, name: &str) -> UserSummary {
        UserSummary {
            id,
            name: name.to_string(),
            profile_picture: None,
        }
    }

    fn picker() -> UserPicker {
        UserPicker::new(vec![user(1, "Ana"), user(2, "anton"), user(3, "Bea")])
    }

    #[test]
    fn filters_by_name_case_insensitively() {
        let picker = picker();
        let names: Vec<_> = picker.matches("AN").into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Ana", "anton"]);
        assert!(picker.matches("  ").is_empty());
        assert!(picker.matches("zed").is_empty());
    }

    #[test]
    fn selected_users_leave_the_results() {
        let mut picker = picker();
        assert!(picker.select(user(1, "Ana")));
        assert!(!picker.select(user(1, "Ana")));
        let names: Vec<_> = picker.matches("an").into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["anton"]);
        assert!(picker.deselect(1));
        assert_eq!(picker.matches("an").len(), 2);
    }

    #[test]
    fn hidden_fields_follow_selection() {
        let picker = picker().with_selected([user(3, "Bea"), user(1, "Ana"), user(3, "Bea")]);
        assert_eq!(
            picker.hidden_fields(),
            vec![
                (PERMITTED_USERS_FIELD, "3".to_string()),
                (PERMITTED_USERS_FIELD, "1".to_string())
            ]
        );
    }

    #[test]
    fn visibility_round_trips_through_field() {
        assert_eq!(Visibility::from_field("1"), Visibility::Public);
        assert_eq!(Visibility::from_field("0"), Visibility::Private);
        assert_eq!(Visibility::from_field(""), Visibility::Public);
        assert_eq!(Visibility::Public.toggled().field_value(), "0");
        assert_eq!(Visibility::Private.label(), "Private");
    }
}
