//! Backend HTTP API client and in-memory directory cache for Quill.
//!
//! Exposes the typed endpoint surface consumed by the startup sequencer
//! (reachability probe, session validation, onboarding status, session
//! hydration, health notice) plus the owned user/channel/member directory
//! used by mention resolution.

mod client;
mod directory;
mod error;
mod retry_after;
mod types;

pub use client::{ApiClient, ApiConfig};
pub use directory::Directory;
pub use error::ApiError;
pub use retry_after::parse_retry_after_ms;
pub use types::{Channel, HealthAlert, HealthNotice, Member, OnboardingStatus, Session, User};
