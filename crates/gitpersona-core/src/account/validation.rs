//! Name and email validation.

/// Validation error for a name/email pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty after trimming.
    EmptyName,
    /// Email address is empty after trimming.
    EmptyEmail,
    /// Email address format is invalid.
    InvalidEmail,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyName => "Name is required",
            Self::EmptyEmail => "Email address is required",
            Self::InvalidEmail => "Invalid email address format",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyEmail | Self::InvalidEmail => "email",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Result of validating a name/email pair.
///
/// On success carries the trimmed `(name, email)`.
pub type ValidationResult = Result<(String, String), Vec<ValidationError>>;

/// Trim and validate a name/email pair.
///
/// Returns the trimmed values, or every problem found.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if any field is invalid.
pub fn validate_identity(name: &str, email: &str) -> ValidationResult {
    let name = name.trim();
    let email = email.trim();
    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push(ValidationError::EmptyName);
    }

    if email.is_empty() {
        errors.push(ValidationError::EmptyEmail);
    } else if !is_valid_email(email) {
        errors.push(ValidationError::InvalidEmail);
    }

    if errors.is_empty() {
        Ok((name.to_string(), email.to_string()))
    } else {
        Err(errors)
    }
}

/// Basic email shape check: `local@label.label[.label…]`.
///
/// No whitespace anywhere, exactly one `@`, a non-empty local part, and a
/// domain of at least two non-empty dot-separated labels.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let mut labels = domain.split('.');
    let Some(first) = labels.next() else {
        return false;
    };
    let rest: Vec<&str> = labels.collect();

    !first.is_empty() && !rest.is_empty() && rest.iter().all(|label| !label.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_email() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("user.name@example.com"));
        assert!(is_valid_email("user@sub.example.com"));
        assert!(is_valid_email("user+tag@example.co.kr"));
    }

    #[test]
    fn test_invalid_email() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("user"));
        assert!(!is_valid_email("foo@bar"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("user@exa mple.com"));
        assert!(!is_valid_email("user@example..com"));
    }

    #[test]
    fn test_validate_trims_fields() {
        let (name, email) = validate_identity("  Jo  ", "\tjo@x.com \n").unwrap();
        assert_eq!(name, "Jo");
        assert_eq!(email, "jo@x.com");
    }

    #[test]
    fn test_validate_empty_fields() {
        let errors = validate_identity("   ", "").unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::EmptyName, ValidationError::EmptyEmail]
        );
    }

    #[test]
    fn test_validate_bad_email_only() {
        let errors = validate_identity("Jo", "jo@x").unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidEmail]);
        assert_eq!(errors[0].field(), "email");
    }

    proptest! {
        #[test]
        fn well_formed_addresses_pass(
            local in "[a-z0-9._+-]{1,16}",
            host in "[a-z0-9-]{1,16}",
            tld in "[a-z]{2,6}",
        ) {
            let email = format!("{local}@{host}.{tld}");
            prop_assert!(is_valid_email(&email));
        }

        #[test]
        fn addresses_without_at_fail(s in "[^@]{0,32}") {
            prop_assert!(!is_valid_email(&s));
        }

        #[test]
        fn whitespace_anywhere_fails(
            local in "[a-z]{1,8}",
            pad in "[ \t]{1,3}",
        ) {
            let email = format!("{local}{pad}@example.com");
            prop_assert!(!is_valid_email(&email));
        }
    }
}
