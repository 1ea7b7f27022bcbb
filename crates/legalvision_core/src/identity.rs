//! crates/legalvision_core/src/identity.rs
//!
//! Derives the demo identity from a login email. No credential is verified.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::UserSession;

pub const DEFAULT_DISPLAY_NAME: &str = "Arun Perera";
pub const PLACEHOLDER_ROLE: &str = "Legal Analyst";
pub const PLACEHOLDER_FIRM: &str = "Perera & Associates";

/// Builds a display name from the local part of an email address.
///
/// `jane.doe@example.com` becomes `Jane Doe`. Empty dot segments are
/// dropped; if nothing remains the fixed default name is used.
pub fn derive_display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let name = local
        .split('.')
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    if name.trim().is_empty() {
        DEFAULT_DISPLAY_NAME.to_string()
    } else {
        name
    }
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Constructs the session for `email`. Everything except `created_at` is a
/// pure function of the email.
pub fn session_for_email(email: &str, now: DateTime<Utc>) -> UserSession {
    UserSession {
        id: Uuid::new_v5(&Uuid::NAMESPACE_OID, email.as_bytes()),
        name: derive_display_name(email),
        email: email.to_string(),
        role: PLACEHOLDER_ROLE.to_string(),
        firm: PLACEHOLDER_FIRM.to_string(),
        avatar: None,
        created_at: now,
    }
}
