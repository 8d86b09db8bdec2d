//! Access code hashing and verification.
//!
//! Codes are canonicalised to the hex SHA-256 of their UTF-8 bytes before
//! being handed to bcrypt, so long codes are never truncated.

use crate::db::queries::find_by_link;
use crate::errors::{AppError, AppResult};
use crate::models::event::Event;
use rusqlite::Connection;
use sha2::{Digest, Sha256};

fn canonical(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

/// Salted one-way hash of an access code.
pub fn hash(secret: &str, cost: u32) -> AppResult<String> {
    Ok(bcrypt::hash(canonical(secret), cost)?)
}

/// Check a supplied code against a stored hash. A malformed hash never matches.
pub fn verify(access_hash: &str, secret: &str) -> bool {
    bcrypt::verify(canonical(secret), access_hash).unwrap_or_else(|e| {
        log::warn!("Stored access hash could not be checked: {}", e);
        false
    })
}

/// Load the event behind `link` and check the supplied access code.
///
/// Unknown link → NotFound, absent code → MissingAccess, wrong code → Forbidden.
pub fn authorize(conn: &Connection, link: &str, access: Option<&str>) -> AppResult<Event> {
    let event = find_by_link(conn, link)?.ok_or_else(|| AppError::NotFound(link.to_string()))?;

    let secret = match access {
        Some(s) if !s.is_empty() => s,
        _ => return Err(AppError::MissingAccess),
    };

    if !verify(event.access_hash(), secret) {
        log::info!("Rejected access code for event {}", link);
        return Err(AppError::Forbidden);
    }

    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COST: u32 = 4;

    #[test]
    fn hash_verifies_its_own_secret() {
        let h = hash("access", COST).unwrap();
        assert!(verify(&h, "access"));
        assert!(!verify(&h, "Access"));
        assert!(!verify(&h, "access "));
        assert!(!verify(&h, ""));
    }

    #[test]
    fn hashing_is_salted() {
        let a = hash("same secret", COST).unwrap();
        let b = hash("same secret", COST).unwrap();
        assert_ne!(a, b);
        assert!(verify(&a, "same secret"));
        assert!(verify(&b, "same secret"));
    }

    #[test]
    fn plaintext_never_appears_in_hash() {
        let h = hash("hunter2", COST).unwrap();
        assert!(!h.contains("hunter2"));
    }

    #[test]
    fn long_secrets_differing_after_72_bytes_do_not_match() {
        let base = "x".repeat(100);
        let h = hash(&format!("{}a", base), COST).unwrap();
        assert!(verify(&h, &format!("{}a", base)));
        assert!(!verify(&h, &format!("{}b", base)));
    }

    #[test]
    fn non_ascii_secrets_round_trip() {
        let h = hash("clé-überprüfung-秘密", COST).unwrap();
        assert!(verify(&h, "clé-überprüfung-秘密"));
    }

    #[test]
    fn malformed_hash_is_rejected_without_panicking() {
        assert!(!verify("not a bcrypt hash", "access"));
        assert!(!verify("", "access"));
    }
}
