//! Input validation functions
//!
//! Inputs are only checked for presence; anything non-blank is accepted.

/// Validate that a required field was supplied
pub fn validate_present(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    Ok(())
}

/// Validate signup/signin credentials
pub fn validate_credentials(id: &str, password: &str) -> Result<(), String> {
    validate_present("id", id)?;
    // Passwords may contain leading/trailing spaces, so only reject truly empty ones
    if password.is_empty() {
        return Err("password is required".to_string());
    }
    Ok(())
}

/// Validate a to-do title
pub fn validate_title(title: &str) -> Result<(), String> {
    validate_present("title", title)
}
