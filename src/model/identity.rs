use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Account id issued by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Restaurant,
    Customer,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Restaurant => f.write_str("restaurant"),
            Role::Customer => f.write_str("customer"),
        }
    }
}

/// Role-specific registration details. The variant *is* the role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Profile {
    #[serde(rename_all = "camelCase")]
    Restaurant {
        business_name: String,
        phone: String,
        address: String,
    },
    Customer {
        name: String,
        phone: String,
    },
}

impl Profile {
    pub fn role(&self) -> Role {
        match self {
            Profile::Restaurant { .. } => Role::Restaurant,
            Profile::Customer { .. } => Role::Customer,
        }
    }

    /// Name shown in the navigation bar.
    pub fn display_name(&self) -> &str {
        match self {
            Profile::Restaurant { business_name, .. } => business_name,
            Profile::Customer { name, .. } => name,
        }
    }
}

/// The `users` document written at registration.
///
/// Role never changes after creation; see [`crate::user_actor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    #[serde(flatten)]
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    pub fn role(&self) -> Role {
        self.profile.role()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_is_flattened_with_role_tag() {
        let identity = Identity {
            id: UserId("u1".into()),
            email: "chef@example.com".into(),
            profile: Profile::Restaurant {
                business_name: "Noodle Bar".into(),
                phone: "555".into(),
                address: "1 Main St".into(),
            },
            created_at: Utc::now(),
        };

        let doc = serde_json::to_value(&identity).unwrap();
        assert_eq!(doc["role"], "restaurant");
        assert_eq!(doc["businessName"], "Noodle Bar");

        let back: Identity = serde_json::from_value(doc).unwrap();
        assert_eq!(back.role(), Role::Restaurant);
        assert_eq!(back.profile.display_name(), "Noodle Bar");
    }
}
