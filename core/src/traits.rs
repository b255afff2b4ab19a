/// Abstraction over the external key-value state store. Implementers decide
/// where addressed values live; each call must be atomic and isolated on its
/// own, as the handler performs no locking. A store that does not serialize
/// per-address access between calls must wrap a verify-then-write action
/// sequence in its own transaction.
use std::collections::HashMap;

pub trait StateStore: Send + Sync {
    /// Fetch the current values at `addresses`. Addresses holding no value
    /// are omitted from the result; absence is not an error.
    fn get_state(&self, addresses: &[String]) -> HashMap<String, Vec<u8>>;

    /// Write every entry and return the addresses actually written. An
    /// address missing from the confirmation list was not applied.
    fn set_state(&self, entries: HashMap<String, Vec<u8>>) -> Vec<String>;
}
