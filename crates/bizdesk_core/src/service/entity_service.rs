//! Generic CRUD service shared by every dashboard section.
//!
//! # Responsibility
//! - Expose the snapshot/create/update/delete contract over a repository.
//! - Merge partial patches and bulk imports without bypassing validation.
//!
//! # Invariants
//! - `create` always assigns a fresh identity; `import` keeps incoming ids.
//! - `update` never changes a record's id.
//! - Mutation events log ids and counts only, never record contents.

use crate::model::entity::{Entity, EntityId};
use crate::repo::record_repo::{RecordRepository, RepoError, RepoResult};
use log::{info, warn};
use serde_json::Value;
use std::marker::PhantomData;
use uuid::Uuid;

/// CRUD facade for one record family.
pub struct EntityService<E, R> {
    repo: R,
    _record: PhantomData<E>,
}

impl<E: Entity, R: RecordRepository<E>> EntityService<E, R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            _record: PhantomData,
        }
    }

    /// Returns the full snapshot in insertion order.
    pub fn get_all(&self) -> RepoResult<Vec<E>> {
        self.repo.list_all()
    }

    pub fn get(&self, id: EntityId) -> RepoResult<Option<E>> {
        self.repo.get(id)
    }

    /// Loads one record or fails with `NotFound`.
    pub fn require(&self, id: EntityId) -> RepoResult<E> {
        self.repo
            .get(id)?
            .ok_or(RepoError::NotFound { kind: E::KIND, id })
    }

    /// Assigns a new identity to `data` and appends it.
    pub fn create(&self, mut data: E) -> RepoResult<E> {
        data.set_id(Uuid::new_v4());
        match self.repo.insert(&data) {
            Ok(id) => {
                info!(
                    "event=record_create module=service status=ok kind={} id={id}",
                    E::KIND
                );
                Ok(data)
            }
            Err(err) => {
                warn!(
                    "event=record_create module=service status=error kind={} error={err}",
                    E::KIND
                );
                Err(err)
            }
        }
    }

    /// Merges `patch` into the stored record and writes the result.
    ///
    /// # Contract
    /// - `patch` must be a JSON object using the record's wire field names.
    /// - The `id` key is ignored; keys the record does not know are ignored.
    /// - The merged record is validated before it is written.
    pub fn update(&self, id: EntityId, patch: &Value) -> RepoResult<E> {
        let current = self.require(id)?;
        let merged = apply_patch(&current, patch)?;
        self.replace(merged)
    }

    /// Writes a full replacement for an existing record.
    pub fn replace(&self, record: E) -> RepoResult<E> {
        let id = record.id();
        match self.repo.replace(&record) {
            Ok(()) => {
                info!(
                    "event=record_update module=service status=ok kind={} id={id}",
                    E::KIND
                );
                Ok(record)
            }
            Err(err) => {
                warn!(
                    "event=record_update module=service status=error kind={} id={id} error={err}",
                    E::KIND
                );
                Err(err)
            }
        }
    }

    pub fn delete(&self, id: EntityId) -> RepoResult<()> {
        self.repo.delete(id)?;
        info!(
            "event=record_delete module=service status=ok kind={} id={id}",
            E::KIND
        );
        Ok(())
    }

    /// Bulk-creates records, keeping their ids.
    ///
    /// Either every record is stored or none is.
    pub fn import(&self, records: &[E]) -> RepoResult<usize> {
        match self.repo.insert_all(records) {
            Ok(count) => {
                info!(
                    "event=record_import module=service status=ok kind={} count={count}",
                    E::KIND
                );
                Ok(count)
            }
            Err(err) => {
                warn!(
                    "event=record_import module=service status=error kind={} requested={} error={err}",
                    E::KIND,
                    records.len()
                );
                Err(err)
            }
        }
    }

    /// Snapshot for serialization; identical to `get_all`.
    pub fn export(&self) -> RepoResult<Vec<E>> {
        self.get_all()
    }
}

/// Applies a JSON object patch to a record, keeping its id.
pub fn apply_patch<E: Entity>(record: &E, patch: &Value) -> RepoResult<E> {
    let Value::Object(changes) = patch else {
        return Err(RepoError::InvalidPatch(format!(
            "{} patch must be a JSON object",
            E::KIND
        )));
    };

    let mut document = serde_json::to_value(record)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode {}: {err}", E::KIND)))?;
    let Value::Object(fields) = &mut document else {
        return Err(RepoError::InvalidData(format!(
            "{} does not encode as an object",
            E::KIND
        )));
    };

    for (key, value) in changes {
        if key == "id" {
            continue;
        }
        fields.insert(key.clone(), value.clone());
    }

    let mut merged: E = serde_json::from_value(document)
        .map_err(|err| RepoError::InvalidPatch(format!("{} patch rejected: {err}", E::KIND)))?;
    merged.set_id(record.id());
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::apply_patch;
    use crate::model::client::Client;
    use crate::repo::record_repo::RepoError;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn patch_replaces_listed_fields_only() {
        let client = Client::new("Anna", "+7 900 000 00 00");
        let patched = apply_patch(&client, &json!({ "totalOrders": 4, "email": "a@b.c" })).unwrap();

        assert_eq!(patched.total_orders, 4);
        assert_eq!(patched.email, "a@b.c");
        assert_eq!(patched.name, "Anna");
        assert_eq!(patched.id, client.id);
    }

    #[test]
    fn patch_cannot_change_identity() {
        let client = Client::new("Anna", "1");
        let patched = apply_patch(&client, &json!({ "id": Uuid::new_v4() })).unwrap();
        assert_eq!(patched.id, client.id);
    }

    #[test]
    fn patch_null_clears_optional_fields_and_rejects_required_ones() {
        let mut client = Client::new("Anna", "1");
        client.address = Some("Main st".to_string());

        let cleared = apply_patch(&client, &json!({ "address": null })).unwrap();
        assert_eq!(cleared.address, None);

        let err = apply_patch(&client, &json!({ "name": null })).unwrap_err();
        assert!(matches!(err, RepoError::InvalidPatch(_)));
    }

    #[test]
    fn non_object_patch_is_rejected() {
        let client = Client::new("Anna", "1");
        let err = apply_patch(&client, &json!(["name"])).unwrap_err();
        assert!(matches!(err, RepoError::InvalidPatch(_)));
    }
}
