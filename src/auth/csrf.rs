//! Per-session CSRF tokens for the expense request form.
//!
//! The token lives in the cookie session and is rotated once a request is
//! accepted, so a replayed submission of the same form is refused.

use actix_session::Session;
use rand::Rng;

use crate::errors::AppError;

const SESSION_KEY: &str = "csrf_token";

/// Token embedded in rendered forms; issued on first use.
pub fn get_or_create_token(session: &Session) -> String {
    match session.get::<String>(SESSION_KEY) {
        Ok(Some(token)) if !token.is_empty() => token,
        _ => issue_token(session),
    }
}

/// Replace the session token after a form has been consumed.
pub fn rotate_token(session: &Session) -> String {
    issue_token(session)
}

pub fn validate_csrf(session: &Session, submitted: &str) -> Result<(), AppError> {
    let expected = match session.get::<String>(SESSION_KEY) {
        Ok(Some(token)) if !token.is_empty() => token,
        Ok(_) => {
            log::warn!("Form posted without a CSRF token in the session");
            return Err(AppError::Csrf);
        }
        Err(e) => {
            log::warn!("Could not read CSRF token from session: {e}");
            return Err(AppError::Csrf);
        }
    };

    if tokens_match(expected.as_bytes(), submitted.as_bytes()) {
        Ok(())
    } else {
        log::warn!("Rejected form submission with a stale or forged CSRF token");
        Err(AppError::Csrf)
    }
}

fn issue_token(session: &Session) -> String {
    let token = hex::encode(rand::rng().random::<[u8; 32]>());
    if let Err(e) = session.insert(SESSION_KEY, &token) {
        log::warn!("Could not store CSRF token in session: {e}");
    }
    token
}

/// Compares every byte regardless of where the first mismatch is.
fn tokens_match(expected: &[u8], given: &[u8]) -> bool {
    expected.len() == given.len()
        && expected
            .iter()
            .zip(given)
            .fold(0u8, |acc, (x, y)| acc | (x ^ y))
            == 0
}
