use chrono::NaiveDate;

/// Largest amount a single expense request may carry.
pub const MAX_AMOUNT: f64 = 1_000_000.0;

/// Validate a required text field with a max length.
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

/// Parse an expense amount: finite, greater than zero, at most `MAX_AMOUNT`.
pub fn parse_amount(raw: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Amount is required".to_string());
    }
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| "Amount must be a number".to_string())?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err("Amount must be greater than zero".to_string());
    }
    if amount > MAX_AMOUNT {
        return Err(format!("Amount must be at most {MAX_AMOUNT:.0}"));
    }
    Ok(amount)
}

/// Parse a required `YYYY-MM-DD` date.
pub fn parse_date(raw: &str, field_name: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{field_name} is required"));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| format!("{field_name} must be a valid date (YYYY-MM-DD)"))
}

/// User ids end up in URLs: 1-64 chars of letters, digits, '-' and '_'.
pub fn is_valid_user_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 64
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
