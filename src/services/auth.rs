use crate::market::{Api, REGISTER_SUCCESS_MESSAGE};
use crate::services::storage::{self, audit};

/// Session lifecycle: Anonymous -> Authenticating (token held, not yet
/// validated) -> Authenticated. Any validation failure drops straight back
/// to Anonymous and removes the persisted token.
#[derive(Debug, Clone)]
pub enum SessionState {
    Anonymous,
    Authenticating { token: String },
    Authenticated { token: String, user: String },
}

pub struct AuthSession {
    state: SessionState,
}

impl AuthSession {
    pub fn anonymous() -> Self {
        Self {
            state: SessionState::Anonymous,
        }
    }

    /// Rehydrates the persisted token and runs the who-am-I check. A stale
    /// or rejected token leaves the session Anonymous with the file gone.
    pub fn load(api: &Api) -> Self {
        let mut session = match storage::load_token() {
            Some(token) => Self {
                state: SessionState::Authenticating { token },
            },
            None => Self::anonymous(),
        };
        session.validate(api);
        session
    }

    fn validate(&mut self, api: &Api) {
        let token = match &self.state {
            SessionState::Anonymous => return,
            SessionState::Authenticating { token } => token.clone(),
            SessionState::Authenticated { token, .. } => token.clone(),
        };
        match api.whoami(&token) {
            Ok(who) => {
                self.state = SessionState::Authenticated {
                    token,
                    user: who.user,
                };
            }
            Err(e) => {
                audit(
                    "session_invalidated",
                    serde_json::json!({"error": e.to_string()}),
                );
                storage::clear_token();
                self.state = SessionState::Anonymous;
            }
        }
    }

    /// Posts credentials, stores the returned token, and immediately
    /// validates it. Returns success; never errors.
    pub fn login(&mut self, api: &Api, username: &str, password: &str) -> bool {
        match api.login(username, password) {
            Ok(token) => {
                if let Err(e) = storage::save_token(&token) {
                    audit("token_persist_failed", serde_json::json!({"error": e.to_string()}));
                }
                self.state = SessionState::Authenticating { token };
                self.validate(api);
                let ok = self.is_authenticated();
                audit("login", serde_json::json!({"username": username, "ok": ok}));
                ok
            }
            Err(e) => {
                audit(
                    "login_failed",
                    serde_json::json!({"username": username, "error": e.to_string()}),
                );
                false
            }
        }
    }

    /// True iff the server answered with its exact creation message.
    pub fn register(&self, api: &Api, username: &str, password: &str) -> bool {
        match api.register(username, password) {
            Ok(message) => {
                let ok = message == REGISTER_SUCCESS_MESSAGE;
                audit("register", serde_json::json!({"username": username, "ok": ok}));
                ok
            }
            Err(e) => {
                audit(
                    "register_failed",
                    serde_json::json!({"username": username, "error": e.to_string()}),
                );
                false
            }
        }
    }

    /// Synchronous, no network call.
    pub fn logout(&mut self) {
        storage::clear_token();
        self.state = SessionState::Anonymous;
        audit("logout", serde_json::json!({}));
    }

    /// Re-runs the who-am-I check when a token is present; no-op otherwise.
    pub fn refresh_user(&mut self, api: &Api) {
        if !matches!(self.state, SessionState::Anonymous) {
            self.validate(api);
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Anonymous => None,
            SessionState::Authenticating { token } => Some(token),
            SessionState::Authenticated { token, .. } => Some(token),
        }
    }

    pub fn user(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_session_exposes_nothing() {
        let session = AuthSession::anonymous();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn logout_clears_in_memory_state() {
        let mut session = AuthSession {
            state: SessionState::Authenticated {
                token: "t".to_string(),
                user: "alice".to_string(),
            },
        };
        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }
}
