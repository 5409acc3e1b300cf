/// Validate an email: must contain '@' and '.', max 254 chars.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > 254 {
        return Some("Email must be at most 254 characters".to_string());
    }
    if !trimmed.contains('@') || !trimmed.contains('.') {
        return Some("Email must be a valid address (contain '@' and '.')".to_string());
    }
    None
}

/// Validate a required text field with a max length (in characters).
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an identifier: required, letters, digits, '-' and '_' only.
pub fn validate_identifier(value: &str, field_name: &str) -> Option<String> {
    if let Some(err) = validate_required(value, field_name, 64) {
        return Some(err);
    }
    if !value.trim().chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
        return Some(format!("{field_name} may only contain letters, numbers, '-' and '_'"));
    }
    None
}

/// Validate a phone number: digits with optional '+', '-' and spaces, 5-20 chars.
pub fn validate_phone(value: &str, required: bool) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return required.then(|| "Phone number is required".to_string());
    }
    let digits = trimmed.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ');
    if !allowed || !(5..=20).contains(&digits) {
        return Some("Phone number must contain 5 to 20 digits".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_and_length() {
        assert!(validate_required("  ", "Name", 10).is_some());
        assert!(validate_required("张三", "Name", 2).is_none());
        assert!(validate_required("张三丰", "Name", 2).is_some());
    }

    #[test]
    fn optional_allows_empty() {
        assert!(validate_optional("", "Title", 5).is_none());
        assert!(validate_optional("Professor", "Title", 5).is_some());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("a@b.c").is_none());
        assert!(validate_email("nope").is_some());
        assert!(validate_email("").is_some());
    }

    #[test]
    fn identifiers() {
        assert!(validate_identifier("2021001", "Student ID").is_none());
        assert!(validate_identifier("s-01_a", "Student ID").is_none());
        assert!(validate_identifier("s 01", "Student ID").is_some());
        assert!(validate_identifier("", "Student ID").is_some());
    }

    #[test]
    fn phones() {
        assert!(validate_phone("13800138000", true).is_none());
        assert!(validate_phone("+86 138-0013-8000", true).is_none());
        assert!(validate_phone("", true).is_some());
        assert!(validate_phone("", false).is_none());
        assert!(validate_phone("12ab5", false).is_some());
        assert!(validate_phone("123", false).is_some());
    }
}
