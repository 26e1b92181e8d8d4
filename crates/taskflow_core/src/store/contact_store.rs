//! Contact store contract and SQLite implementation.
//!
//! # Invariants
//! - Listing is ordered by last name, then first name.
//! - Bulk deletion is atomic: either every requested id is removed or none is.

use crate::model::contact::{Contact, ContactId, ContactPatch, NewContact};
use crate::store::{ensure_schema, parse_row_uuid, StoreError, StoreResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const CONTACT_SELECT_SQL: &str = "SELECT
    uuid,
    first_name,
    last_name,
    email,
    phone,
    address
FROM contacts";

const CONTACT_COLUMNS: &[&str] = &[
    "uuid",
    "first_name",
    "last_name",
    "email",
    "phone",
    "address",
];

/// Store contract for contact records.
pub trait ContactStore {
    fn list(&self) -> StoreResult<Vec<Contact>>;
    fn get(&self, id: ContactId) -> StoreResult<Contact>;
    fn create(&self, draft: &NewContact) -> StoreResult<Contact>;
    fn update(&self, id: ContactId, patch: &ContactPatch) -> StoreResult<Contact>;
    /// Returns true iff the record existed and was removed.
    fn delete(&self, id: ContactId) -> StoreResult<bool>;
    /// Removes a set of contacts atomically.
    ///
    /// Returns true iff every requested record was removed. When any id is
    /// absent, nothing is removed and false is returned.
    fn delete_many(&self, ids: &[ContactId]) -> StoreResult<bool>;
}

/// SQLite-backed contact store.
pub struct SqliteContactStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactStore<'conn> {
    /// Wraps a migrated connection, rejecting unprepared schemas up front.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_schema(conn, "contacts", CONTACT_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl ContactStore for SqliteContactStore<'_> {
    fn list(&self) -> StoreResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CONTACT_SELECT_SQL} ORDER BY last_name ASC, first_name ASC"
        ))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }
        Ok(contacts)
    }

    fn get(&self, id: ContactId) -> StoreResult<Contact> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE uuid = ?1"))?;
        let mut rows = stmt.query(params![id.to_string()])?;
        match rows.next()? {
            Some(row) => parse_contact_row(row),
            None => Err(StoreError::NotFound(id)),
        }
    }

    fn create(&self, draft: &NewContact) -> StoreResult<Contact> {
        draft.validate()?;
        let contact = Contact::from_new(draft, Uuid::new_v4());

        self.conn.execute(
            "INSERT INTO contacts (uuid, first_name, last_name, email, phone, address)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                contact.id.to_string(),
                contact.first_name.as_str(),
                contact.last_name.as_str(),
                contact.email.as_str(),
                contact.phone.as_deref(),
                contact.address.as_deref(),
            ],
        )?;

        Ok(contact)
    }

    fn update(&self, id: ContactId, patch: &ContactPatch) -> StoreResult<Contact> {
        let mut contact = self.get(id)?;
        contact.apply_patch(patch);
        contact.validate()?;

        let changed = self.conn.execute(
            "UPDATE contacts
             SET first_name = ?1, last_name = ?2, email = ?3, phone = ?4, address = ?5
             WHERE uuid = ?6;",
            params![
                contact.first_name.as_str(),
                contact.last_name.as_str(),
                contact.email.as_str(),
                contact.phone.as_deref(),
                contact.address.as_deref(),
                id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(contact)
    }

    fn delete(&self, id: ContactId) -> StoreResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE uuid = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }

    fn delete_many(&self, ids: &[ContactId]) -> StoreResult<bool> {
        if ids.is_empty() {
            return Ok(true);
        }

        self.conn.execute_batch("BEGIN IMMEDIATE;")?;
        let result = self.delete_many_inner(ids);
        match &result {
            Ok(true) => self.conn.execute_batch("COMMIT;")?,
            _ => {
                // Nothing to keep on a partial match or error.
                let _ = self.conn.execute_batch("ROLLBACK;");
            }
        }
        result
    }
}

impl SqliteContactStore<'_> {
    fn delete_many_inner(&self, ids: &[ContactId]) -> StoreResult<bool> {
        // Repeated ids in the request refer to one record each.
        let mut unique = ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let placeholders = vec!["?"; unique.len()].join(", ");
        let bind_values: Vec<Value> = unique
            .iter()
            .map(|id| Value::Text(id.to_string()))
            .collect();

        let present: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM contacts WHERE uuid IN ({placeholders});"),
            params_from_iter(bind_values.clone()),
            |row| row.get(0),
        )?;
        if present != unique.len() as i64 {
            return Ok(false);
        }

        self.conn.execute(
            &format!("DELETE FROM contacts WHERE uuid IN ({placeholders});"),
            params_from_iter(bind_values),
        )?;
        Ok(true)
    }
}

fn parse_contact_row(row: &Row<'_>) -> StoreResult<Contact> {
    let uuid_text: String = row.get("uuid")?;
    let contact = Contact {
        id: parse_row_uuid(&uuid_text, "contacts.uuid")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        address: row.get("address")?,
    };
    contact.validate()?;
    Ok(contact)
}
