//! Input checks run before any state is read or staged.

use dims_types::{ContentId, FileHash, RegistryParams};

use crate::RegistryError;

/// Trim `value` and check it is non-empty and within `max_len` bytes.
pub fn text_field(field: &str, value: &str, max_len: usize) -> Result<String, RegistryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistryError::InvalidInput(format!("{field} must not be empty")));
    }
    if trimmed.len() > max_len {
        return Err(RegistryError::InvalidInput(format!(
            "{field} is {} bytes, limit is {max_len}",
            trimmed.len()
        )));
    }
    if trimmed.chars().any(char::is_control) {
        return Err(RegistryError::InvalidInput(format!(
            "{field} contains control characters"
        )));
    }
    Ok(trimmed.to_string())
}

pub fn content_id(id: &ContentId) -> Result<(), RegistryError> {
    id.validate()
        .map_err(|e| RegistryError::InvalidInput(e.to_string()))
}

/// The all-zero digest is the empty sentinel and never a valid commitment.
pub fn file_hash(hash: &FileHash) -> Result<(), RegistryError> {
    if hash.is_zero() {
        return Err(RegistryError::InvalidInput("file hash must not be zero".into()));
    }
    Ok(())
}

/// Validated registration fields.
pub(crate) struct Fields {
    pub name: String,
    pub email: String,
}

pub(crate) fn registration(
    params: &RegistryParams,
    name: &str,
    email: &str,
    id: &ContentId,
    hash: &FileHash,
) -> Result<Fields, RegistryError> {
    let name = text_field("name", name, params.max_name_len)?;
    let email = text_field("email", email, params.max_email_len)?;
    content_id(id)?;
    file_hash(hash)?;
    Ok(Fields { name, email })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_trimmed() {
        assert_eq!(text_field("name", "  Alice ", 10).unwrap(), "Alice");
    }

    #[test]
    fn blank_and_oversized_text_rejected() {
        assert!(text_field("name", "   ", 10).is_err());
        assert!(text_field("name", "abcdefghijk", 10).is_err());
        assert!(text_field("email", "a\u{7}@x.com", 64).is_err());
    }

    #[test]
    fn zero_hash_rejected() {
        assert!(file_hash(&FileHash::ZERO).is_err());
        assert!(file_hash(&FileHash::new([1; 32])).is_ok());
    }
}
