//! Request validation and normalization for the client endpoints.
//!
//! Pure functions, no I/O. Validation always runs before any storage
//! access; a payload that comes out of here is safe to persist as-is.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ApiError;
use crate::models::{ClientPatch, CreateClientRequest, NewClient, UpdateClientRequest};

/// Basic `local@domain.tld` shape. Checked after trimming, so surrounding
/// whitespace normalizes away instead of failing the match.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// Validate and normalize a create payload.
///
/// All three fields must be present and non-empty after trimming, and the
/// email must match [`EMAIL_RE`]. Email is lowercased so uniqueness is
/// case-insensitive at the store.
pub fn validate_create(input: &CreateClientRequest) -> Result<NewClient, ApiError> {
    let name = input.name.as_deref().map(str::trim).unwrap_or_default();
    let email = input.email.as_deref().map(str::trim).unwrap_or_default();
    let business_name = input
        .business_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();

    if name.is_empty() || email.is_empty() || business_name.is_empty() {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    }

    if !EMAIL_RE.is_match(email) {
        return Err(ApiError::Validation("Invalid email format".to_string()));
    }

    Ok(NewClient {
        name: name.to_string(),
        email: email.to_lowercase(),
        business_name: business_name.to_string(),
    })
}

/// Validate and normalize an update payload.
///
/// Protected fields never reach this function (the request type cannot
/// represent them); with nothing left to change the update is rejected
/// before touching storage. Present fields are trimmed, and an email is
/// re-validated and lowercased exactly as on create. Absent fields stay
/// untouched in storage.
pub fn validate_update(input: &UpdateClientRequest) -> Result<ClientPatch, ApiError> {
    if input.name.is_none() && input.email.is_none() && input.business_name.is_none() {
        return Err(ApiError::Validation("No valid fields to update".to_string()));
    }

    let email = match input.email.as_deref().map(str::trim) {
        Some(e) if EMAIL_RE.is_match(e) => Some(e.to_lowercase()),
        Some(_) => return Err(ApiError::Validation("Invalid email format".to_string())),
        None => None,
    };

    Ok(ClientPatch {
        name: input.name.as_deref().map(|s| s.trim().to_string()),
        email,
        business_name: input.business_name.as_deref().map(|s| s.trim().to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_req(name: &str, email: &str, business_name: &str) -> CreateClientRequest {
        CreateClientRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            business_name: Some(business_name.to_string()),
        }
    }

    #[test]
    fn create_normalizes_fields() {
        let out = create_req("Jane Doe", "JANE@EX.com", " Acme ");
        let payload = validate_create(&out).unwrap();
        assert_eq!(payload.name, "Jane Doe");
        assert_eq!(payload.email, "jane@ex.com");
        assert_eq!(payload.business_name, "Acme");
    }

    #[test]
    fn create_trims_email_before_matching() {
        let payload = validate_create(&create_req("J", " jane@ex.com ", "Acme")).unwrap();
        assert_eq!(payload.email, "jane@ex.com");
    }

    #[test]
    fn create_rejects_missing_fields() {
        let missing = CreateClientRequest {
            name: Some("Jane".to_string()),
            email: None,
            business_name: Some("Acme".to_string()),
        };
        match validate_create(&missing) {
            Err(ApiError::Validation(msg)) => assert_eq!(msg, "Missing required fields"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn create_rejects_whitespace_only_fields() {
        let blank = create_req("   ", "jane@ex.com", "Acme");
        assert!(matches!(validate_create(&blank), Err(ApiError::Validation(_))));
    }

    #[test]
    fn create_rejects_bad_email() {
        for email in ["not-an-email", "no-at.example.com", "a@b", "a b@c.d", "a@b@c.d"] {
            match validate_create(&create_req("Jane", email, "Acme")) {
                Err(ApiError::Validation(msg)) => {
                    assert_eq!(msg, "Invalid email format", "email {email:?}")
                }
                other => panic!("email {email:?} produced {other:?}"),
            }
        }
    }

    #[test]
    fn update_rejects_empty_patch() {
        match validate_update(&UpdateClientRequest::default()) {
            Err(ApiError::Validation(msg)) => assert_eq!(msg, "No valid fields to update"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn update_normalizes_present_fields_only() {
        let req = UpdateClientRequest {
            name: Some("  Jane  ".to_string()),
            email: Some("JANE@EX.com".to_string()),
            business_name: None,
        };
        let patch = validate_update(&req).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Jane"));
        assert_eq!(patch.email.as_deref(), Some("jane@ex.com"));
        assert!(patch.business_name.is_none());
    }

    #[test]
    fn update_rejects_bad_email() {
        let req = UpdateClientRequest {
            email: Some("nope".to_string()),
            ..Default::default()
        };
        match validate_update(&req) {
            Err(ApiError::Validation(msg)) => assert_eq!(msg, "Invalid email format"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
