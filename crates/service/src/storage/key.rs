use std::fmt;

use crate::errors::ServiceError;

pub const MAX_KEY_LEN: usize = 200;

/// A storage key checked to be safe as a single file basename.
///
/// Keys are otherwise used verbatim: no trimming and no case folding, so
/// `Cart` and `cart` are distinct records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        if raw.is_empty() {
            return Err(ServiceError::invalid_key(raw, "must not be empty"));
        }
        if raw.len() > MAX_KEY_LEN {
            return Err(ServiceError::invalid_key(raw, "is too long"));
        }
        if raw.contains(['/', '\\']) {
            return Err(ServiceError::invalid_key(raw, "must not contain path separators"));
        }
        if raw.chars().any(char::is_control) {
            return Err(ServiceError::invalid_key(raw, "must not contain control characters"));
        }
        // Covers "." and ".." as well as temp files written next to records.
        if raw.starts_with('.') {
            return Err(ServiceError::invalid_key(raw, "must not start with '.'"));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Basename of the record file for this key.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_unicode_keys() {
        for k in ["cart42", "Menu", "a b", "ç-menü_1", "admin", "x.json"] {
            let key = StorageKey::parse(k).unwrap();
            assert_eq!(key.as_str(), k);
        }
        assert_eq!(StorageKey::parse("cart42").unwrap().file_name(), "cart42.json");
    }

    #[test]
    fn rejects_traversal_and_separators() {
        for k in ["", ".", "..", "../etc/passwd", "a/b", "a\\b", ".hidden", "a\0b", "a\nb"] {
            assert!(
                matches!(StorageKey::parse(k), Err(ServiceError::InvalidKey(_))),
                "key {k:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_overlong_keys() {
        let long = "k".repeat(MAX_KEY_LEN + 1);
        assert!(StorageKey::parse(&long).is_err());
        assert!(StorageKey::parse(&"k".repeat(MAX_KEY_LEN)).is_ok());
    }
}
