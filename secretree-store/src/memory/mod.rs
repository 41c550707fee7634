//! In-process secret store.
//!
//! Keeps secrets in insertion order, pages its listing like the real service
//! and can be told to fail upcoming calls, which is how the retry paths are
//! exercised without a network.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::store::{
    CreateSecretRequest, CreateSecretResponse, DeleteSecretResponse, GetSecretRequest,
    SecretListItem, SecretListPage, SecretPayload, SecretRecord, SecretStore, StoreError,
};

const DEFAULT_PAGE_SIZE: usize = 100;
const CURRENT_STAGE: &str = "AWSCURRENT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    List,
    Get,
    Create,
    Delete,
}

/// Makes the next `times` calls of `operation` fail with `error`.
#[derive(Debug, Clone)]
pub struct FailureSpec {
    pub operation: StoreOperation,
    pub error: StoreError,
    pub times: usize,
}

pub struct MemoryStore {
    page_size: usize,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    entries: Vec<Entry>,
    failures: Vec<FailureSpec>,
    calls: HashMap<StoreOperation, usize>,
    next_version: u64,
}

struct Entry {
    name: String,
    arn: String,
    description: Option<String>,
    version_id: String,
    payload: SecretPayload,
    created_date: DateTime<Utc>,
    deletion_date: Option<DateTime<Utc>>,
}

impl Entry {
    fn record(&self) -> SecretRecord {
        let (secret_string, secret_binary) = match &self.payload {
            SecretPayload::String(s) => (Some(s.clone()), None),
            SecretPayload::Binary(b) => (None, Some(b.clone())),
        };
        SecretRecord {
            name: self.name.clone(),
            arn: self.arn.clone(),
            version_id: self.version_id.clone(),
            secret_string,
            secret_binary,
            version_stages: vec![CURRENT_STAGE.to_string()],
            created_date: Some(self.created_date),
        }
    }

    fn list_item(&self) -> SecretListItem {
        SecretListItem {
            name: self.name.clone(),
            arn: self.arn.clone(),
            description: self.description.clone(),
            created_date: Some(self.created_date),
            last_changed_date: Some(self.created_date),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            state: Mutex::new(State::default()),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Seed a string secret, replacing any existing secret of the same name.
    pub fn insert(&self, name: impl Into<String>, value: impl Into<String>) {
        self.insert_payload(name.into(), SecretPayload::String(value.into()));
    }

    pub fn insert_binary(&self, name: impl Into<String>, value: Vec<u8>) {
        self.insert_payload(name.into(), SecretPayload::Binary(value));
    }

    pub fn fail_next(&self, operation: StoreOperation, error: StoreError, times: usize) {
        self.lock().failures.push(FailureSpec {
            operation,
            error,
            times,
        });
    }

    /// Number of calls made to `operation`, including injected failures.
    pub fn calls(&self, operation: StoreOperation) -> usize {
        self.lock().calls.get(&operation).copied().unwrap_or(0)
    }

    /// Names of live (not deleted) secrets in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.lock()
            .entries
            .iter()
            .filter(|e| e.deletion_date.is_none())
            .map(|e| e.name.clone())
            .collect()
    }

    pub fn is_scheduled_for_deletion(&self, name: &str) -> bool {
        self.lock()
            .entries
            .iter()
            .any(|e| e.name == name && e.deletion_date.is_some())
    }

    fn insert_payload(&self, name: String, payload: SecretPayload) {
        let mut state = self.lock();
        state.entries.retain(|e| e.name != name);
        let entry = new_entry(&mut *state, name, payload, None);
        state.entries.push(entry);
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count the call and consume an injected failure if one is pending.
    fn enter(&self, operation: StoreOperation) -> Result<MutexGuard<'_, State>, StoreError> {
        let mut state = self.lock();
        *state.calls.entry(operation).or_insert(0) += 1;
        if let Some(spec) = state
            .failures
            .iter_mut()
            .find(|f| f.operation == operation && f.times > 0)
        {
            spec.times -= 1;
            let err = spec.error.clone();
            state.failures.retain(|f| f.times > 0);
            return Err(err);
        }
        Ok(state)
    }
}

fn new_entry(state: &mut State, name: String, payload: SecretPayload, description: Option<String>) -> Entry {
    state.next_version += 1;
    Entry {
        arn: format!("arn:aws:secretsmanager:memory:000000000000:secret:{name}"),
        name,
        description,
        version_id: format!("v{}", state.next_version),
        payload,
        created_date: Utc::now(),
        deletion_date: None,
    }
}

fn find<'a>(entries: &'a [Entry], id: &str) -> Option<&'a Entry> {
    entries.iter().find(|e| e.name == id || e.arn == id)
}

fn not_found(id: &str) -> StoreError {
    StoreError::NotFound(format!("secret {id} can't be found"))
}

#[async_trait]
impl SecretStore for MemoryStore {
    async fn list_secrets_page(&self, next_token: Option<&str>) -> Result<SecretListPage, StoreError> {
        let state = self.enter(StoreOperation::List)?;
        let start = match next_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| StoreError::Validation(format!("invalid next token: {token}")))?,
            None => 0,
        };
        let live: Vec<&Entry> = state.entries.iter().filter(|e| e.deletion_date.is_none()).collect();
        let end = (start + self.page_size).min(live.len());
        let secrets = live.get(start..end).unwrap_or_default().iter().map(|e| e.list_item()).collect();
        let next_token = (end < live.len()).then(|| end.to_string());
        Ok(SecretListPage { secrets, next_token })
    }

    async fn get_secret_value(&self, request: &GetSecretRequest) -> Result<SecretRecord, StoreError> {
        let state = self.enter(StoreOperation::Get)?;
        let entry = find(&state.entries, &request.id).ok_or_else(|| not_found(&request.id))?;
        if entry.deletion_date.is_some() {
            return Err(StoreError::Validation(format!(
                "secret {} is marked for deletion",
                request.id
            )));
        }
        if let Some(version) = &request.version_id {
            if *version != entry.version_id {
                return Err(StoreError::NotFound(format!(
                    "secret {} has no version {version}",
                    request.id
                )));
            }
        }
        if let Some(stage) = &request.version_stage {
            if stage != CURRENT_STAGE {
                return Err(StoreError::NotFound(format!(
                    "secret {} has no version labelled {stage}",
                    request.id
                )));
            }
        }
        Ok(entry.record())
    }

    async fn create_secret(&self, request: CreateSecretRequest) -> Result<CreateSecretResponse, StoreError> {
        let mut state = self.enter(StoreOperation::Create)?;
        if let Some(existing) = state.entries.iter().find(|e| e.name == request.name) {
            return Err(if existing.deletion_date.is_some() {
                StoreError::Validation(format!("secret {} is scheduled for deletion", request.name))
            } else {
                StoreError::AlreadyExists(format!("secret {} already exists", request.name))
            });
        }
        let entry = new_entry(&mut *state, request.name, request.payload, request.description);
        let response = CreateSecretResponse {
            name: entry.name.clone(),
            arn: entry.arn.clone(),
            version_id: Some(entry.version_id.clone()),
        };
        state.entries.push(entry);
        Ok(response)
    }

    async fn delete_secret(&self, id: &str, force: bool) -> Result<DeleteSecretResponse, StoreError> {
        let mut state = self.enter(StoreOperation::Delete)?;
        let index = state
            .entries
            .iter()
            .position(|e| e.name == id || e.arn == id)
            .ok_or_else(|| not_found(id))?;
        let now = Utc::now();
        if force {
            let entry = state.entries.remove(index);
            return Ok(DeleteSecretResponse {
                name: entry.name,
                arn: entry.arn,
                deletion_date: Some(now),
            });
        }
        let entry = &mut state.entries[index];
        let deletion_date = now + chrono::Duration::days(30);
        entry.deletion_date = Some(deletion_date);
        Ok(DeleteSecretResponse {
            name: entry.name.clone(),
            arn: entry.arn.clone(),
            deletion_date: Some(deletion_date),
        })
    }
}
