//! Package- and attachment-name decoding and validation.
//!
//! Path segments arrive already percent-decoded once by axum's router; this
//! module enforces an additional guard: reject names containing `..`, a
//! backslash, a NUL byte, or a residual `%` (a sign of double-encoding,
//! which would otherwise let a second decode pass smuggle a path-traversal
//! sequence through).

use crate::error::RegistryError;

fn has_forbidden_bytes(s: &str) -> bool {
    s.contains("..") || s.contains('\\') || s.contains('\0') || s.contains('%')
}

/// Validates a decoded package name. Scoped names (`@scope/pkg`) are
/// allowed; anything containing the forbidden sequences above is rejected.
///
/// # Errors
/// Returns [`RegistryError::BadRequest`] if `name` is empty or contains a
/// forbidden sequence.
pub fn validate_package_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() {
        return Err(RegistryError::BadRequest("package name must not be empty".to_string()));
    }
    if has_forbidden_bytes(name) {
        return Err(RegistryError::BadRequest(format!("invalid package name '{name}'")));
    }
    Ok(())
}

/// Reduces an attachment filename to its basename and re-validates it, so a
/// crafted attachment key can't escape the package's storage directory.
///
/// # Errors
/// Returns [`RegistryError::BadRequest`] if the basename is empty or
/// contains a forbidden sequence.
pub fn sanitize_attachment_filename(raw: &str) -> Result<String, RegistryError> {
    let basename = raw.rsplit(['/', '\\']).next().unwrap_or(raw).to_string();
    if basename.is_empty() || has_forbidden_bytes(&basename) {
        return Err(RegistryError::BadRequest(format!("invalid attachment filename '{raw}'")));
    }
    Ok(basename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_names_are_valid() {
        assert!(validate_package_name("@scope/pkg").is_ok());
    }

    #[test]
    fn traversal_sequences_are_rejected() {
        assert!(validate_package_name("../../etc/passwd").is_err());
        assert!(validate_package_name("pkg\\..\\x").is_err());
        assert!(validate_package_name("pkg\0").is_err());
        assert!(validate_package_name("pkg%2e%2e").is_err());
    }

    #[test]
    fn attachment_filename_is_reduced_to_basename() {
        assert_eq!(sanitize_attachment_filename("../../left-pad-1.0.0.tgz").expect("sanitize"), "left-pad-1.0.0.tgz");
        assert_eq!(sanitize_attachment_filename("nested/dir/left-pad-1.0.0.tgz").expect("sanitize"), "left-pad-1.0.0.tgz");
    }

    #[test]
    fn bare_traversal_filename_is_rejected() {
        assert!(sanitize_attachment_filename("..").is_err());
    }
}
