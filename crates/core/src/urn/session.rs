//! Session identifiers
//!
//! A session id is a URN under a base namespace (default `aff4:/flows`) whose
//! basename is `queue:flowIdentifier`, e.g. `aff4:/flows/W:1A2B3C`. The
//! basename must match `^[-0-9a-zA-Z]+:[0-9a-zA-Z]+$` on every construction
//! path. Operations that return a plain [`Urn`] (such as [`SessionId::add`])
//! leave the session invariant behind.

use super::Urn;
use crate::config::SessionConfig;
use crate::contract::{SemanticValue, StorageType, StoredValue, ValueMeta};
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Namespace new session ids are created under
pub const DEFAULT_FLOW_BASE: &str = "aff4:/flows";

/// Queue new session ids are assigned to
pub const DEFAULT_FLOW_QUEUE: &str = "F";

static SESSION_BASENAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-0-9a-zA-Z]+:[0-9a-zA-Z]+$").expect("session basename regex is valid")
});

static QUEUE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-0-9a-zA-Z]+$").expect("queue name regex is valid"));

static FLOW_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-zA-Z]+$").expect("flow name regex is valid"));

/// Check a `queue:flowIdentifier` basename
///
/// Queues may contain dashes (`DEBUG-user1`); flow identifiers are
/// alphanumeric (`1A2B3C`, `TransferStore`).
pub fn validate_id(id: &str) -> Result<()> {
    if SESSION_BASENAME.is_match(id) {
        Ok(())
    } else {
        Err(Error::validation(format!("invalid SessionID basename '{}'", id)))
    }
}

/// True if `name` is usable as a queue name
pub fn is_valid_queue_name(name: &str) -> bool {
    QUEUE_NAME.is_match(name)
}

fn random_flow_name() -> String {
    format!("{:X}", rand::random::<u32>())
}

/// A URN naming one flow on one queue
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId {
    urn: Urn,
}

impl SessionId {
    /// A fresh id with a random flow identifier on the default queue
    pub fn random() -> Self {
        let base = Urn::new(DEFAULT_FLOW_BASE);
        let urn = base.add(&format!("{}:{}", DEFAULT_FLOW_QUEUE, random_flow_name()));
        Self { urn }
    }

    /// A fresh id with a given flow name on the default queue
    pub fn with_flow_name(flow_name: &str) -> Result<Self> {
        Self::create(
            &Urn::new(DEFAULT_FLOW_BASE),
            &Urn::new(DEFAULT_FLOW_QUEUE),
            Some(flow_name),
        )
    }

    /// A fresh id under `base` on `queue`
    ///
    /// `queue` contributes its basename. A missing `flow_name` is replaced by
    /// a random identifier rendered in uppercase hex.
    ///
    /// # Errors
    ///
    /// Returns a validation failure if the queue or flow name is outside its
    /// character class. Both are checked before joining, so separators and
    /// dot segments are rejected rather than normalized away.
    pub fn create(base: &Urn, queue: &Urn, flow_name: Option<&str>) -> Result<Self> {
        let queue_name = queue.basename();
        if !is_valid_queue_name(queue_name) {
            return Err(Error::validation(format!(
                "invalid SessionID queue '{}'",
                queue_name
            )));
        }
        let flow_name = match flow_name {
            Some(name) if FLOW_NAME.is_match(name) => name.to_string(),
            Some(name) => {
                return Err(Error::validation(format!(
                    "invalid SessionID flow name '{}'",
                    name
                )))
            }
            None => random_flow_name(),
        };
        let urn = base.add(&format!("{}:{}", queue_name, flow_name));
        Self::from_urn(&urn)
    }

    /// A fresh id using configured base and queue
    pub fn from_config(config: &SessionConfig, flow_name: Option<&str>) -> Result<Self> {
        Self::create(&Urn::new(&config.base), &Urn::new(&config.queue), flow_name)
    }

    /// Adopt an existing URN
    ///
    /// # Errors
    ///
    /// Returns a validation failure if the basename is not `queue:flow`.
    pub fn from_urn(urn: &Urn) -> Result<Self> {
        validate_id(urn.basename())?;
        Ok(Self { urn: urn.clone() })
    }

    /// Parse and adopt a URN string
    pub fn from_string(text: &str) -> Result<Self> {
        Self::from_urn(&Urn::new(text))
    }

    /// Queue part as a URN (`aff4:/W` for `W:1A2B3C`)
    pub fn queue(&self) -> Urn {
        Urn::new(self.basename_part(0))
    }

    /// Flow identifier part (`1A2B3C` for `W:1A2B3C`)
    pub fn flow_name(&self) -> &str {
        self.basename_part(1)
    }

    fn basename_part(&self, index: usize) -> &str {
        self.urn.basename().split(':').nth(index).unwrap_or("")
    }

    /// Join a segment, producing a plain URN
    ///
    /// The result is no longer a session id.
    pub fn add(&self, segment: &str) -> Urn {
        self.urn.add(segment)
    }

    /// Normalized path
    pub fn path(&self) -> &str {
        self.urn.path()
    }

    /// Basename (`queue:flow`)
    pub fn basename(&self) -> &str {
        self.urn.basename()
    }

    /// The underlying URN
    pub fn as_urn(&self) -> &Urn {
        &self.urn
    }

    /// Unwrap into the underlying URN
    pub fn into_urn(self) -> Urn {
        self.urn
    }
}

impl AsRef<Urn> for SessionId {
    fn as_ref(&self) -> &Urn {
        &self.urn
    }
}

impl TryFrom<Urn> for SessionId {
    type Error = Error;

    fn try_from(urn: Urn) -> Result<Self> {
        Self::from_urn(&urn)
    }
}

impl std::str::FromStr for SessionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}

impl SemanticValue for SessionId {
    const TYPE_NAME: &'static str = "SessionID";
    const STORAGE_TYPE: StorageType = StorageType::String;

    fn parse_from(raw: &[u8]) -> Result<Self> {
        Self::from_string(std::str::from_utf8(raw)?)
    }

    fn serialize_to_wire(&self) -> Vec<u8> {
        self.urn.serialize_to_wire()
    }

    fn serialize_to_storage(&self) -> StoredValue {
        self.urn.serialize_to_storage()
    }

    fn meta(&self) -> &ValueMeta {
        &self.urn.meta
    }

    fn meta_mut(&mut self) -> &mut ValueMeta {
        &mut self.urn.meta
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.urn, f)
    }
}

impl Serialize for SessionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.urn.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SessionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        SessionId::from_string(&text).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Legacy flow session ids
// ============================================================================

/// Session id accepting bare flow identifiers from older producers
///
/// Input that does not start with `aff4` is qualified into
/// `aff4:/flows/` before parsing. The qualified form is validated like any
/// other session id; a bare identifier without a queue (`"Foo"`) is still
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlowSessionId(SessionId);

impl FlowSessionId {
    /// Parse, qualifying bare identifiers into the default flow namespace
    pub fn from_string(text: &str) -> Result<Self> {
        let qualified = if text.starts_with(super::SCHEME) {
            text.to_string()
        } else {
            format!("{}/{}", DEFAULT_FLOW_BASE, text)
        };
        SessionId::from_string(&qualified).map(FlowSessionId)
    }

    /// The session id
    pub fn as_session_id(&self) -> &SessionId {
        &self.0
    }

    /// Unwrap into the session id
    pub fn into_session_id(self) -> SessionId {
        self.0
    }
}

impl From<SessionId> for FlowSessionId {
    fn from(id: SessionId) -> Self {
        FlowSessionId(id)
    }
}

impl SemanticValue for FlowSessionId {
    const TYPE_NAME: &'static str = "FlowSessionID";
    const STORAGE_TYPE: StorageType = StorageType::String;

    fn parse_from(raw: &[u8]) -> Result<Self> {
        Self::from_string(std::str::from_utf8(raw)?)
    }

    fn serialize_to_wire(&self) -> Vec<u8> {
        self.0.serialize_to_wire()
    }

    fn serialize_to_storage(&self) -> StoredValue {
        self.0.serialize_to_storage()
    }

    fn meta(&self) -> &ValueMeta {
        self.0.meta()
    }

    fn meta_mut(&mut self) -> &mut ValueMeta {
        self.0.meta_mut()
    }
}

impl fmt::Display for FlowSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
