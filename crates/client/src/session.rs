//! Session state shared by all stores.

use std::sync::{Arc, PoisonError, RwLock};

use crate::{
    client::Client,
    error::{AppError, Result},
};

/// Basic-auth credential pair for the authenticated user. The username is
/// the owner every entity row is scoped to.
#[derive(Clone, Debug)]
pub struct Session {
    pub username: String,
    pub password: String,
}

/// Shared handle the stores consult before every operation. Absence of a
/// session blocks the operation with [`AppError::NotAuthenticated`].
#[derive(Clone, Debug, Default)]
pub struct SessionHandle {
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    pub fn get(&self) -> Result<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(AppError::NotAuthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn clear(&self) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn set(&self, session: Session) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    /// Validate the credentials against the backend's identity echo and
    /// install the session on success.
    pub async fn login(&self, client: &Client, username: &str, password: &str) -> Result<()> {
        let candidate = Session {
            username: username.to_string(),
            password: password.to_string(),
        };
        let echoed = client.session(&candidate).await?;
        if echoed.username != candidate.username {
            return Err(AppError::Remote(format!(
                "backend answered for a different user: {}",
                echoed.username
            )));
        }
        self.set(candidate);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_handle_blocks_with_not_authenticated() {
        let handle = SessionHandle::default();
        assert!(!handle.is_authenticated());
        assert!(matches!(handle.get(), Err(AppError::NotAuthenticated)));
    }

    #[test]
    fn clear_drops_the_session() {
        let handle = SessionHandle::default();
        handle.set(Session {
            username: "alice".to_string(),
            password: "password".to_string(),
        });
        assert!(handle.is_authenticated());
        handle.clear();
        assert!(!handle.is_authenticated());
    }
}
