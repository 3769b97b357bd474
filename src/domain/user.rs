use std::fmt;

use serde::{Deserialize, Serialize};

/// Determines which dashboard and pages a user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
    Vendor,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
            Role::Vendor => "vendor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a registered user in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            role,
        }
    }
}

/// A user together with its credential. Only the auth service holds these.
#[derive(Clone)]
pub struct Account {
    pub user: User,
    pub(crate) password: String,
}

impl Account {
    pub fn new(user: User, password: impl Into<String>) -> Self {
        Self { user, password: password.into() }
    }

    pub(crate) fn matches(&self, email: &str, password: &str) -> bool {
        self.user.email == email && self.password == password
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account").field("user", &self.user).finish_non_exhaustive()
    }
}

/// The signed-in state mirrored to storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

impl Session {
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user), is_authenticated: true }
    }

    /// The current user, only when the session is authenticated.
    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref().filter(|_| self.is_authenticated)
    }
}

/// Payload for registering a new account.
#[derive(Clone)]
pub struct Signup {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

impl fmt::Debug for Signup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signup")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Criteria for the admin user listing.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Case-insensitive substring matched against name and email.
    pub search: Option<String>,
    pub role: Option<Role>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        let matches_search = match &self.search {
            Some(term) => {
                let term = term.to_lowercase();
                user.name.to_lowercase().contains(&term) || user.email.to_lowercase().contains(&term)
            }
            None => true,
        };
        let matches_role = self.role.map_or(true, |role| user.role == role);
        matches_search && matches_role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_serializes_like_local_storage() {
        let session = Session::signed_in(User::new("1", "a@example.com", "A", Role::Admin));
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["isAuthenticated"], true);
        assert_eq!(value["user"]["role"], "admin");
    }

    #[test]
    fn test_current_user_requires_flag() {
        let session = Session {
            user: Some(User::new("1", "a@example.com", "A", Role::Admin)),
            is_authenticated: false,
        };
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_user_filter() {
        let user = User::new("2", "student@example.com", "Student User", Role::Student);
        assert!(UserFilter::default().matches(&user));
        assert!(UserFilter { search: Some("STUDENT@".into()), role: None }.matches(&user));
        assert!(UserFilter { search: Some("user".into()), role: Some(Role::Student) }.matches(&user));
        assert!(!UserFilter { search: None, role: Some(Role::Vendor) }.matches(&user));
        assert!(!UserFilter { search: Some("nobody".into()), role: None }.matches(&user));
    }
}
