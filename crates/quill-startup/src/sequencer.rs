//! The startup bootstrap sequencer.
//!
//! One invocation of [`StartupRuntime::check_logged_in_state`] produces
//! exactly one terminal outcome: a next destination, a login-failure flag, or
//! an offline/deferred state with no destination. Steps run sequentially;
//! a user-initiated re-invocation is the only retry.

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use quill_api::{ApiClient, Session};
use quill_core::KvStorage;
use tokio::sync::watch;
use tracing::{debug, error};

use crate::connectivity::ConnectivityProbe;
use crate::flags::FeatureFlags;
use crate::state::{StartupState, StartupStatePublisher};

pub const SESSION_TOKEN_KEY: &str = "session_token";
pub const SESSION_ID_KEY: &str = "session_id";

pub const DESTINATION_LOGIN_GREETING: &str = "login/greeting";
pub const DESTINATION_ONBOARDING: &str = "register/onboarding";
pub const DESTINATION_CHAT: &str = "chat";

const RATE_LIMIT_NOTICE: &str = "You are being rate limited. Try again in a moment.";

/// Public struct `StartupRuntime` used across Quill components.
///
/// Owns the key-value store, the API client, the connectivity probe, and the
/// single-writer state channel. UI layers hold receivers from [`subscribe`]
/// and invoke the retry/logout/dismiss operations.
///
/// [`subscribe`]: StartupRuntime::subscribe
pub struct StartupRuntime {
    kv: Mutex<KvStorage>,
    api: ApiClient,
    connectivity: Arc<dyn ConnectivityProbe>,
    publisher: StartupStatePublisher,
    session: Mutex<Option<Session>>,
    flags: Mutex<FeatureFlags>,
}

impl StartupRuntime {
    pub fn new(kv: KvStorage, api: ApiClient, connectivity: Arc<dyn ConnectivityProbe>) -> Self {
        Self {
            kv: Mutex::new(kv),
            api,
            connectivity,
            publisher: StartupStatePublisher::new(),
            session: Mutex::new(None),
            flags: Mutex::new(FeatureFlags::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<StartupState> {
        self.publisher.subscribe()
    }

    pub fn state(&self) -> StartupState {
        self.publisher.snapshot()
    }

    /// Returns the hydrated session after a successful `chat` routing.
    pub fn session(&self) -> Option<Session> {
        self.session.lock().expect("session lock poisoned").clone()
    }

    pub fn feature_flags(&self) -> FeatureFlags {
        *self.flags.lock().expect("flags lock poisoned")
    }

    /// Pre-startup work independent of the login decision: feature-flag
    /// hydration from storage and the health-notice fetch.
    pub async fn run_pre_startup_tasks(&self) {
        debug!("performing pre-startup tasks");
        let hydrated = {
            let kv = self.kv.lock().expect("kv lock poisoned");
            FeatureFlags::hydrate_from_kv(&kv)
        };
        *self.flags.lock().expect("flags lock poisoned") = hydrated;
        self.run_health_check().await;
    }

    /// Runs the full bootstrap decision sequence once.
    pub async fn check_logged_in_state(&self) {
        debug!("checking logged in state");

        let connected = self.connectivity.has_active_transport().await;
        self.publisher.update(|state| {
            state.connected = connected;
            state.transient_notice = None;
        });
        if !connected {
            debug!("no active transport, staying on offline state");
            return self.start_without_destination();
        }

        let (token, session_id) = {
            let kv = self.kv.lock().expect("kv lock poisoned");
            (
                kv.get(SESSION_TOKEN_KEY).map(str::to_string),
                kv.get(SESSION_ID_KEY).map(str::to_string),
            )
        };
        let Some(token) = token else {
            debug!("no stored session token, routing to login greeting");
            return self.start_with_destination(DESTINATION_LOGIN_GREETING);
        };

        debug!("stored session token found, probing backend and validating token");
        let reachable = self.api.probe_root().await.is_ok();
        let valid = self.api.check_session_token(&token).await.unwrap_or(false);

        // Only a confirmed-reachable backend rejecting the token counts as a
        // login failure; an unconfirmed probe proceeds to the onboarding gate
        // so offline flakes never report a false credential failure.
        if reachable && !valid {
            debug!("session token is invalid, could not log in");
            self.publisher.update(|state| state.could_not_log_in = true);
            return;
        }

        debug!("session token accepted, checking onboarding state");
        match self.api.needs_onboarding(&token).await {
            Ok(true) => {
                debug!("onboarding incomplete, routing to onboarding");
                return self.start_with_destination(DESTINATION_ONBOARDING);
            }
            Ok(false) => {}
            Err(api_error) if api_error.is_rate_limited() => {
                error!("rate limited while checking onboarding state: {api_error}");
                self.publisher
                    .update(|state| state.transient_notice = Some(RATE_LIMIT_NOTICE.to_string()));
                return self.start_without_destination();
            }
            Err(api_error) => {
                error!("failed to check onboarding state, could not log in: {api_error}");
                self.publisher.update(|state| state.could_not_log_in = true);
                return;
            }
        }

        debug!("onboarding complete, hydrating session");
        match self.api.fetch_own_user(&token).await {
            Ok(user) => {
                let session = Session {
                    token,
                    session_id,
                    user,
                };
                *self.session.lock().expect("session lock poisoned") = Some(session);
                self.start_with_destination(DESTINATION_CHAT);
            }
            Err(api_error) => {
                error!("failed to log in, could not log in: {api_error}");
                self.publisher.update(|state| state.could_not_log_in = true);
            }
        }
    }

    /// Clears the persisted credential and routes to the login greeting,
    /// regardless of prior state.
    pub fn log_out(&self) -> Result<()> {
        {
            let mut kv = self.kv.lock().expect("kv lock poisoned");
            kv.remove(SESSION_TOKEN_KEY)
                .context("failed to remove stored session token")?;
            kv.remove(SESSION_ID_KEY)
                .context("failed to remove stored session id")?;
        }
        *self.session.lock().expect("session lock poisoned") = None;
        self.start_with_destination(DESTINATION_LOGIN_GREETING);
        Ok(())
    }

    /// Re-routes the UI. The destination is cleared before being set so an
    /// unchanged value still notifies watchers.
    pub fn update_next_destination(&self, destination: &str) {
        self.publisher.update(|state| state.next_destination = None);
        self.publisher
            .update(|state| state.next_destination = Some(destination.to_string()));
    }

    /// Fetches the service health notice; failures are logged and swallowed.
    pub async fn run_health_check(&self) {
        debug!("performing health check");
        match self.api.health_notice().await {
            Ok(notice) => {
                if let Some(alert) = notice.alert {
                    self.publisher.update(|state| {
                        state.active_alert = Some(alert);
                        state.alert_active = true;
                    });
                }
            }
            Err(api_error) => {
                error!("failed to perform health check: {api_error}");
            }
        }
    }

    pub fn dismiss_health_alert(&self) {
        self.publisher.update(|state| {
            state.active_alert = None;
            state.alert_active = false;
        });
    }

    pub fn dismiss_login_error(&self) {
        self.publisher.update(|state| state.could_not_log_in = false);
    }

    fn start_with_destination(&self, destination: &str) {
        self.publisher
            .update(|state| state.next_destination = Some(destination.to_string()));
        self.publisher.update(|state| state.ready = true);
    }

    fn start_without_destination(&self) {
        self.publisher.update(|state| state.ready = true);
    }
}
