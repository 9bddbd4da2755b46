// ============================================================
// CONTACT TYPES
// ============================================================
// Data structures representing a loaded contact list

use serde::{Deserialize, Serialize};

/// A single contact from the spreadsheet.
///
/// Built once during loading and immutable afterwards; a fresh load
/// replaces the whole `ContactBook`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    /// Display name, trimmed, never empty
    pub name: String,

    /// Phone number: digits with an optional leading '+'
    pub phone: String,
}

impl Contact {
    pub fn new(name: String, phone: String) -> Self {
        Self { name, phone }
    }

    /// Whether the phone already carries an international prefix
    pub fn has_country_code(&self) -> bool {
        self.phone.starts_with('+')
    }
}

/// An ordered contact list together with the file it came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactBook {
    /// Path of the spreadsheet the contacts were loaded from
    pub source_path: String,

    /// Contacts in spreadsheet row order
    pub contacts: Vec<Contact>,
}

impl ContactBook {
    pub fn new(source_path: String, contacts: Vec<Contact>) -> Self {
        Self {
            source_path,
            contacts,
        }
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Contact> {
        self.contacts.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_country_code() {
        let with_code = Contact::new("Ana".to_string(), "+5511999990000".to_string());
        let without = Contact::new("Ana".to_string(), "11999990000".to_string());
        assert!(with_code.has_country_code());
        assert!(!without.has_country_code());
    }
}
