use actix_session::Session;

use crate::errors::AppError;
use crate::models::user::User;

const USER_KEY: &str = "user";
const TOKEN_KEY: &str = "token";
const FLASH_KEY: &str = "flash";

/// The logged-in user and their remote token, loaded from the cookie session
/// for each request and passed explicitly to whatever needs it.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user: User,
    pub token: Option<String>,
}

impl SessionContext {
    pub fn load(session: &Session) -> Result<Self, AppError> {
        let user = session
            .get::<User>(USER_KEY)
            .map_err(|e| AppError::Session(format!("Session error: {e}")))?
            .ok_or_else(|| AppError::Session("Not logged in".to_string()))?;
        let token = session.get::<String>(TOKEN_KEY).unwrap_or(None);
        Ok(Self { user, token })
    }

    pub fn store(&self, session: &Session) -> Result<(), AppError> {
        session
            .insert(USER_KEY, &self.user)
            .map_err(|e| AppError::Session(format!("Failed to store user: {e}")))?;
        match &self.token {
            Some(token) => session
                .insert(TOKEN_KEY, token)
                .map_err(|e| AppError::Session(format!("Failed to store token: {e}")))?,
            None => {
                session.remove(TOKEN_KEY);
            }
        }
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

pub fn is_logged_in(session: &Session) -> bool {
    session.get::<User>(USER_KEY).unwrap_or(None).is_some()
}

pub fn set_flash(session: &Session, message: &str) {
    let _ = session.insert(FLASH_KEY, message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}
