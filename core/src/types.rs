use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

/// Transaction family name; scopes every address this handler produces.
pub const FAMILY_NAME: &str = "iot_auth";

/// Supported family version.
pub const FAMILY_VERSION: &str = "1.0";

/// Identity of the transaction family served by the handler.
#[derive(Clone, Debug)]
pub struct FamilyConfig {
    pub family_name: &'static str,
    pub family_versions: &'static [&'static str],
}

impl FamilyConfig {
    /// The `("iot_auth", "1.0")` family.
    pub const fn iot_auth() -> Self {
        Self { family_name: FAMILY_NAME, family_versions: &[FAMILY_VERSION] }
    }

    /// Routing prefix: first 6 hex chars of the family-name digest. Must stay
    /// stable for address compatibility with previously written state.
    pub fn namespace_prefix(&self) -> String {
        sha512_hex(self.family_name)[..6].to_string()
    }

    /// Namespaces registered by this handler.
    pub fn namespaces(&self) -> Vec<String> {
        vec![self.namespace_prefix()]
    }
}

impl Default for FamilyConfig {
    fn default() -> Self {
        Self::iot_auth()
    }
}

/// Which record of a device an address points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Purpose {
    Key,
    Data,
}

impl Purpose {
    /// Tag hashed into the address suffix.
    pub fn tag(self) -> &'static str {
        match self {
            Purpose::Key => "key",
            Purpose::Data => "data",
        }
    }
}

/// Operations recognized by the handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    StoreKey,
    VerifyKey,
    StoreData,
}

impl Action {
    /// Map an `action` field value to an operation, if recognized.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "store_key" => Some(Action::StoreKey),
            "verify_key" => Some(Action::VerifyKey),
            "store_data" => Some(Action::StoreData),
            _ => None,
        }
    }
}

/// Inbound action payload as defined in the wire format. `device_address` is
/// the device identifier, not a state address; `data` is only meaningful for
/// `store_data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionPayload {
    #[serde(default)]
    pub action: Option<String>,
    pub device_address: String,
    pub key: String,
    #[serde(default)]
    pub data: Option<String>,
}

/// Hex-encoded SHA-512 of a UTF-8 string.
fn sha512_hex(input: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Derive the state address for one record of a device: 6-char namespace
/// prefix + 64-char device digest + 6-char purpose digest, all SHA-512
/// truncations. Deterministic; the two purposes of a device never collide.
pub fn make_address(config: &FamilyConfig, device_id: &str, purpose: Purpose) -> String {
    let device = &sha512_hex(device_id)[..64];
    let tag = &sha512_hex(purpose.tag())[..6];
    format!("{}{}{}", config.namespace_prefix(), device, tag)
}
