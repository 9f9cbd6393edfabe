//! Declarative request validation. Handlers chain per-field rules and get
//! back the `400 {"errors": [...]}` response when any rule fails.

use crate::error::{ApiError, FieldError};

#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field must be present and non-blank.
    pub fn require(mut self, param: &'static str, value: Option<&str>, msg: &str) -> Self {
        if value.map_or(true, |v| v.trim().is_empty()) {
            self.errors.push(FieldError::new(msg, param));
        }
        self
    }

    /// Field must look like an email address.
    pub fn email(mut self, param: &'static str, value: Option<&str>, msg: &str) -> Self {
        if !value.map_or(false, is_valid_email) {
            self.errors.push(FieldError::new(msg, param));
        }
        self
    }

    /// Field must be at least `min` characters; absent counts as too short.
    pub fn min_length(
        mut self,
        param: &'static str,
        value: Option<&str>,
        min: usize,
        msg: &str,
    ) -> Self {
        if value.map_or(true, |v| v.chars().count() < min) {
            self.errors.push(FieldError::new(msg, param));
        }
        self
    }

    /// Custom rule outcome computed by the caller.
    pub fn check(mut self, param: &'static str, ok: bool, msg: &str) -> Self {
        if !ok {
            self.errors.push(FieldError::new(msg, param));
        }
        self
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(self.errors))
        }
    }
}

/// Structural email check: one `@`, non-empty local part, dotted domain,
/// no whitespace. Deliberately loose; the mailbox is never verified.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors(result: Result<(), ApiError>) -> Vec<FieldError> {
        match result {
            Err(ApiError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn passes_when_all_rules_hold() {
        let result = Validator::new()
            .require("name", Some("Ada"), "Name is required")
            .email("email", Some("ada@example.com"), "Please include a valid email")
            .min_length("password", Some("longenough"), 6, "too short")
            .finish();
        assert!(result.is_ok());
    }

    #[test]
    fn require_rejects_missing_and_blank() {
        let errs = errors(
            Validator::new()
                .require("status", None, "Status is required")
                .require("skills", Some("   "), "Skills is required")
                .finish(),
        );
        assert_eq!(errs.len(), 2);
        assert_eq!(errs[0].param, Some("status"));
        assert_eq!(errs[1].msg, "Skills is required");
    }

    #[test]
    fn min_length_counts_missing_as_too_short() {
        let errs = errors(
            Validator::new()
                .min_length("password", None, 6, "Please enter a password with 6 or more characters")
                .finish(),
        );
        assert_eq!(errs[0].param, Some("password"));
    }

    #[test]
    fn errors_keep_rule_order() {
        let errs = errors(
            Validator::new()
                .require("name", None, "Name is required")
                .email("email", Some("nope"), "Please include a valid email")
                .min_length("password", Some("abc"), 6, "short")
                .finish(),
        );
        let params: Vec<_> = errs.iter().map(|e| e.param.unwrap()).collect();
        assert_eq!(params, vec!["name", "email", "password"]);
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("dev@example.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("dev@"));
        assert!(!is_valid_email("dev@nodot"));
        assert!(!is_valid_email("dev@.com"));
        assert!(!is_valid_email("dev @example.com"));
    }
}
