//! Contact domain model.
//!
//! # Invariants
//! - `first_name`, `last_name` and `email` are required on every write path.
//! - `full_name` is always derived, never stored.

use crate::model::{is_blank, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a contact record.
pub type ContactId = Uuid;

/// Person record assignable to tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Contact {
    /// Materializes a confirmed record from a draft plus a store-assigned id.
    pub fn from_new(draft: &NewContact, id: ContactId) -> Self {
        Self {
            id,
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            address: draft.address.clone(),
        }
    }

    /// Derived display name: first + last, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required(&self.first_name, &self.last_name, &self.email)
    }

    /// Applies a patch in place. Does not validate; callers validate after.
    pub fn apply_patch(&mut self, patch: &ContactPatch) {
        if let Some(first_name) = &patch.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &patch.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(phone) = &patch.phone {
            self.phone = phone.clone();
        }
        if let Some(address) = &patch.address {
            self.address = address.clone();
        }
    }
}

/// Creation draft. The store assigns `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl NewContact {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required(&self.first_name, &self.last_name, &self.email)
    }
}

/// Partial update; inner options distinguish "set" from "clear" for the
/// optional phone/address fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub address: Option<Option<String>>,
}

fn validate_required(
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Result<(), ValidationError> {
    if is_blank(first_name) {
        return Err(ValidationError::MissingContactField("first_name"));
    }
    if is_blank(last_name) {
        return Err(ValidationError::MissingContactField("last_name"));
    }
    if is_blank(email) {
        return Err(ValidationError::MissingContactField("email"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Contact, NewContact};
    use crate::model::ValidationError;
    use uuid::Uuid;

    #[test]
    fn full_name_joins_and_trims() {
        let contact = Contact::from_new(
            &NewContact::new("Ada", "Lovelace", "ada@example.com"),
            Uuid::new_v4(),
        );
        assert_eq!(contact.full_name(), "Ada Lovelace");
    }

    #[test]
    fn missing_email_is_rejected() {
        let draft = NewContact::new("Ada", "Lovelace", "  ");
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingContactField("email"))
        );
    }
}
