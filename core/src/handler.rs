use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::info;

use crate::errors::ApplyError;
use crate::traits::StateStore;
use crate::types::{make_address, Action, ActionPayload, FamilyConfig, Purpose};

/// Simple in-memory state store suitable for tests and single-process demos.
/// A whole `set_state` batch is applied under one lock, so each call is
/// atomic and every address is confirmed.
#[derive(Default)]
pub struct InMemoryStateStore {
    inner: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryStateStore {
    /// Create a new, empty in-memory store.
    pub fn new() -> Self {
        Self { inner: Mutex::new(HashMap::new()) }
    }

    /// Copy of the full store contents.
    pub fn snapshot(&self) -> HashMap<String, Vec<u8>> {
        self.inner.lock().unwrap().clone()
    }
}

impl StateStore for InMemoryStateStore {
    fn get_state(&self, addresses: &[String]) -> HashMap<String, Vec<u8>> {
        let inner = self.inner.lock().unwrap();
        addresses
            .iter()
            .filter_map(|a| inner.get(a).map(|v| (a.clone(), v.clone())))
            .collect()
    }

    fn set_state(&self, entries: HashMap<String, Vec<u8>>) -> Vec<String> {
        let mut inner = self.inner.lock().unwrap();
        let mut written = Vec::with_capacity(entries.len());
        for (address, value) in entries {
            written.push(address.clone());
            inner.insert(address, value);
        }
        written
    }
}

/// AuthHandler validates inbound actions and applies them to the state store.
pub struct AuthHandler {
    config: FamilyConfig,
    store: Arc<dyn StateStore>,
}

impl AuthHandler {
    /// Create a handler over the given state store.
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { config: FamilyConfig::iot_auth(), store }
    }

    /// Family identity and namespace registration values.
    pub fn config(&self) -> &FamilyConfig {
        &self.config
    }

    /// Parse a raw payload, route it to the matching action, and apply it.
    /// State is only touched on the success path of validation.
    pub fn apply(&self, raw: &[u8]) -> Result<(), ApplyError> {
        let payload: ActionPayload = serde_json::from_slice(raw)
            .map_err(|e| ApplyError::MalformedPayload(e.to_string()))?;

        let name = payload.action.as_deref().unwrap_or("<missing>");
        let action =
            Action::parse(name).ok_or_else(|| ApplyError::UnknownAction(name.to_string()))?;

        match action {
            Action::StoreKey => self.store_key(&payload.device_address, &payload.key),
            Action::VerifyKey => self.verify_key(&payload.device_address, &payload.key),
            Action::StoreData => {
                let data = payload.data.as_deref().ok_or_else(|| {
                    ApplyError::MalformedPayload("missing field `data` for store_data".into())
                })?;
                self.store_data(&payload.device_address, &payload.key, data)
            }
        }
    }

    /// Store a new device key. A device gets exactly one key record; repeat
    /// attempts fail regardless of the presented value.
    pub fn store_key(&self, device_id: &str, key: &str) -> Result<(), ApplyError> {
        let address = make_address(&self.config, device_id, Purpose::Key);
        let entries = self.store.get_state(std::slice::from_ref(&address));
        if entries.contains_key(&address) {
            return Err(ApplyError::AlreadyExists(device_id.to_string()));
        }

        self.write(address, key.as_bytes().to_vec())?;
        info!("stored key for device {device_id}");
        Ok(())
    }

    /// Check the presented key against the stored one, byte-exact. Read-only.
    pub fn verify_key(&self, device_id: &str, key: &str) -> Result<(), ApplyError> {
        let address = make_address(&self.config, device_id, Purpose::Key);
        let mut entries = self.store.get_state(std::slice::from_ref(&address));
        let stored = entries
            .remove(&address)
            .ok_or_else(|| ApplyError::NotFound(device_id.to_string()))?;
        if stored != key.as_bytes() {
            return Err(ApplyError::Mismatch(device_id.to_string()));
        }

        info!("key verified for device {device_id}");
        Ok(())
    }

    /// Store device data, gated by a fresh key verification each time. The
    /// data record has no existence precondition; overwrite is allowed.
    pub fn store_data(&self, device_id: &str, key: &str, data: &str) -> Result<(), ApplyError> {
        self.verify_key(device_id, key)?;

        let address = make_address(&self.config, device_id, Purpose::Data);
        self.write(address, data.as_bytes().to_vec())?;
        info!("stored data for device {device_id}");
        Ok(())
    }

    /// Single-entry write; the store must confirm the address it was handed.
    fn write(&self, address: String, value: Vec<u8>) -> Result<(), ApplyError> {
        let confirmed = self.store.set_state(HashMap::from([(address.clone(), value)]));
        if !confirmed.iter().any(|a| *a == address) {
            return Err(ApplyError::WriteFailed(address));
        }
        Ok(())
    }
}
