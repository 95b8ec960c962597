use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Public struct `User` used across Quill components.
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Server-scoped membership record; `nickname` overrides the global username
/// when resolving mentions inside that server.
pub struct Member {
    pub server_id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Public struct `Channel` used across Quill components.
pub struct Channel {
    pub id: String,
    /// Absent for direct-message channels, which have no display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Response payload of the onboarding-status endpoint.
pub struct OnboardingStatus {
    pub onboarding: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Server-pushed advisory shown to all clients until dismissed.
pub struct HealthAlert {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Response payload of the health-notice endpoint; `alert` is null when the
/// service has nothing to announce.
pub struct HealthNotice {
    #[serde(default)]
    pub alert: Option<HealthAlert>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Hydrated session produced by a successful login: the bearer token, the
/// persisted session identifier, and the account it authenticates.
pub struct Session {
    pub token: String,
    pub session_id: Option<String>,
    pub user: User,
}
