use serde::{Deserialize, Serialize};

/// Represents a registered user in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Payload for creating a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
}

impl UserCreate {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// The verified caller of an order operation, as established by the
/// identity provider. The order core never re-checks credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requester {
    Customer(String),
    Staff,
}

impl Requester {
    pub fn customer(user_id: impl Into<String>) -> Self {
        Self::Customer(user_id.into())
    }

    /// Whether this caller may act on an order owned by `owner_id`.
    pub fn can_access(&self, owner_id: &str) -> bool {
        match self {
            Requester::Staff => true,
            Requester::Customer(user_id) => user_id == owner_id,
        }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, Requester::Staff)
    }
}

impl std::fmt::Display for Requester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Requester::Customer(user_id) => write!(f, "customer:{}", user_id),
            Requester::Staff => write!(f, "staff"),
        }
    }
}
