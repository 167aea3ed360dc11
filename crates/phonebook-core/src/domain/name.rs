use crate::error::CoreError;

pub const MIN_NAME_CHARS: usize = 2;

pub fn is_valid_name(raw: &str) -> bool {
    raw.trim().chars().count() >= MIN_NAME_CHARS
}

pub fn normalize_name(raw: &str) -> Result<String, CoreError> {
    if !is_valid_name(raw) {
        return Err(CoreError::InvalidName);
    }
    Ok(raw.trim().to_string())
}
