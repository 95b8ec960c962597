//! Application-startup bootstrap sequencing for Quill clients.
//!
//! Implements the linear connectivity → reachability → session validation →
//! onboarding → hydration flow that decides the first screen a client shows,
//! publishing its observable state through a single watch channel. Every
//! network-consuming step folds its own transport failures into flags rather
//! than propagating errors; rate limiting is the one transient exception.

mod connectivity;
mod flags;
mod sequencer;
mod state;

pub use connectivity::{ConnectivityProbe, StaticConnectivityProbe, SystemConnectivityProbe};
pub use flags::FeatureFlags;
pub use sequencer::{
    StartupRuntime, DESTINATION_CHAT, DESTINATION_LOGIN_GREETING, DESTINATION_ONBOARDING,
    SESSION_ID_KEY, SESSION_TOKEN_KEY,
};
pub use state::StartupState;
