//! Observable session state.
//!
//! One `SessionStore` is built at the composition root and shared. UI layers
//! subscribe to it to learn about login, profile loads and (forced) logout.

use tokio::sync::watch;

use crate::api::types::MemberProfile;

/// Login state as seen by the rest of the application.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn {
        /// Filled in once the member profile has been fetched.
        profile: Option<MemberProfile>,
    },
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, SessionState::LoggedIn { .. })
    }

    pub fn profile(&self) -> Option<&MemberProfile> {
        match self {
            SessionState::LoggedIn { profile } => profile.as_ref(),
            SessionState::LoggedOut => None,
        }
    }
}

/// Watch-channel backed session holder with subscribe/notify semantics.
///
/// Subscribers are only woken when the state actually changes.
#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new(initial: SessionState) -> Self {
        Self {
            tx: watch::Sender::new(initial),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Mark the session as logged in, keeping an already loaded profile.
    pub fn set_logged_in(&self) {
        self.tx.send_if_modified(|state| match state {
            SessionState::LoggedIn { .. } => false,
            SessionState::LoggedOut => {
                *state = SessionState::LoggedIn { profile: None };
                true
            }
        });
    }

    pub fn set_profile(&self, profile: MemberProfile) {
        self.tx.send_if_modified(|state| {
            let next = SessionState::LoggedIn {
                profile: Some(profile),
            };
            if *state == next {
                return false;
            }
            *state = next;
            true
        });
    }

    pub fn set_logged_out(&self) {
        self.tx.send_if_modified(|state| {
            if *state == SessionState::LoggedOut {
                return false;
            }
            log::info!("Session ended");
            *state = SessionState::LoggedOut;
            true
        });
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionState::LoggedOut)
    }
}
