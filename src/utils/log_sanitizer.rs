//! Log sanitization utilities for masking sensitive data.
//!
//! Login identifiers are dealer codes or email addresses; both are PII and
//! are masked before they reach the logs.

/// Mask a login identifier for safe logging.
///
/// Emails keep the first 3 characters of the local part plus the domain;
/// anything else keeps only the first 3 characters.
///
/// # Examples
/// ```ignore
/// assert_eq!(mask_identifier("user@example.com"), "use***@example.com");
/// assert_eq!(mask_identifier("dealer-0042"), "dea***");
/// ```
pub fn mask_identifier(identifier: &str) -> String {
    if let Some(at_pos) = identifier.find('@') {
        let local_part = &identifier[..at_pos];
        let domain = &identifier[at_pos..];

        let visible: String = local_part.chars().take(3).collect();
        format!("{}***{}", visible, domain)
    } else {
        let visible: String = identifier.chars().take(3).collect();
        format!("{}***", visible)
    }
}
