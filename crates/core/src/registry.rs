//! Type Registry
//!
//! Maps type names to [`TypeDescriptor`]s so that stored and transmitted
//! values can be parsed back by name. Value types may refer to each other
//! before every type is defined: a consumer registers a callback for a
//! name, and the callback runs once that name is defined.
//!
//! ## Lifecycle
//!
//! 1. Start-up code defines types (`define`, `define_type`)
//! 2. Forward references are resolved as their targets are defined
//! 3. `seal()` ends the start-up phase; later definitions fail with
//!    [`Error::RegistrySealed`]
//!
//! A callback registered for a name that is never defined is never invoked.
//! That is an accepted limitation, not a fault.
//!
//! ## Process-wide registry
//!
//! ```ignore
//! use rdfvalue_core::registry;
//!
//! registry::register_callback("Foo", |ty| println!("resolved {}", ty.name));
//! registry::define_type::<Foo>()?;
//! let value = registry::parse_by_name("RDFInteger", b"42")?;
//! ```
//!
//! The global registry starts with every builtin type defined.

use crate::contract::{AnyValue, SemanticValue, StorageType};
use crate::error::{Error, Result};
use crate::primitives::{HashDigest, RdfBool, RdfBytes, RdfInteger, RdfString};
use crate::size::ByteSize;
use crate::temporal::{Duration, RdfDatetime, RdfDatetimeSeconds};
use crate::urn::{FlowSessionId, SessionId, Subject, Urn};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, warn};

/// Builds a type-erased value from wire bytes
pub type ParseFn = fn(&[u8]) -> Result<Box<dyn AnyValue>>;

/// Late-binding callback, invoked once with the resolved type
pub type Callback = Box<dyn FnOnce(&TypeDescriptor) + Send + Sync>;

fn parse_boxed<T: SemanticValue>(raw: &[u8]) -> Result<Box<dyn AnyValue>> {
    Ok(Box::new(T::parse_from(raw)?))
}

/// A registered type
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    /// Name the type was defined under
    pub name: &'static str,
    /// Storage tag of the type's storage form
    pub storage_type: StorageType,
    /// Queryable sub-field names
    pub fields: &'static [&'static str],
    parser: ParseFn,
}

impl TypeDescriptor {
    /// Descriptor for a concrete value type
    pub fn of<T: SemanticValue>() -> Self {
        Self {
            name: T::TYPE_NAME,
            storage_type: T::STORAGE_TYPE,
            fields: T::fields(),
            parser: parse_boxed::<T>,
        }
    }

    /// Parse wire bytes as this type
    pub fn parse(&self, raw: &[u8]) -> Result<Box<dyn AnyValue>> {
        (self.parser)(raw)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("storage_type", &self.storage_type)
            .finish()
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.storage_type == other.storage_type
    }
}

/// Name → type table with deferred resolution
#[derive(Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeDescriptor>,
    pending: HashMap<String, Vec<Callback>>,
    sealed: bool,
}

impl TypeRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every builtin type defined
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtin_types(&mut registry)
            .expect("builtin type names are unique in a fresh registry");
        registry
    }

    /// Register `descriptor` under `name`
    ///
    /// Pending callbacks for `name` run exactly once, in registration order,
    /// and are then discarded.
    ///
    /// # Errors
    ///
    /// Fails if `name` is already defined or the registry is sealed.
    pub fn define(&mut self, name: &str, descriptor: TypeDescriptor) -> Result<()> {
        let callbacks = self.admit(name, descriptor)?;
        fire(name, &descriptor, callbacks);
        Ok(())
    }

    /// Register a concrete type under its own name
    pub fn define_type<T: SemanticValue>(&mut self) -> Result<()> {
        self.define(T::TYPE_NAME, TypeDescriptor::of::<T>())
    }

    /// Insert a definition and hand back the callbacks waiting on it
    fn admit(&mut self, name: &str, descriptor: TypeDescriptor) -> Result<Vec<Callback>> {
        if self.sealed {
            warn!(name, "Rejected type definition after seal");
            return Err(Error::RegistrySealed(name.to_string()));
        }
        if self.types.contains_key(name) {
            warn!(name, "Rejected duplicate type definition");
            return Err(Error::AlreadyDefined(name.to_string()));
        }
        self.types.insert(name.to_string(), descriptor);
        debug!(name, storage_type = %descriptor.storage_type, "Defined type");
        Ok(self.pending.remove(name).unwrap_or_default())
    }

    /// Look up a type by name
    pub fn lookup(&self, name: &str) -> Result<TypeDescriptor> {
        self.types
            .get(name)
            .copied()
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// True if `name` is defined
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Run `callback` when `name` is defined
    ///
    /// If `name` is already defined the callback runs immediately. Extra
    /// arguments are captured by the closure.
    pub fn register_callback<C>(&mut self, name: &str, callback: C)
    where
        C: FnOnce(&TypeDescriptor) + Send + Sync + 'static,
    {
        match self.types.get(name).copied() {
            Some(descriptor) => fire(name, &descriptor, vec![Box::new(callback)]),
            None => self.defer(name, Box::new(callback)),
        }
    }

    fn defer(&mut self, name: &str, callback: Callback) {
        let queue = self.pending.entry(name.to_string()).or_default();
        queue.push(callback);
        debug!(name, pending = queue.len(), "Deferred type resolution");
    }

    /// Number of callbacks waiting on `name`
    pub fn pending_callbacks(&self, name: &str) -> usize {
        self.pending.get(name).map_or(0, Vec::len)
    }

    /// Parse wire bytes as the type registered under `name`
    pub fn parse_by_name(&self, name: &str, raw: &[u8]) -> Result<Box<dyn AnyValue>> {
        self.lookup(name)?.parse(raw)
    }

    /// End the start-up phase
    pub fn seal(&mut self) {
        if !self.sealed {
            self.sealed = true;
            info!(types = self.types.len(), "Sealed type registry");
        }
    }

    /// True once `seal` has been called
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Defined names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of defined types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True if nothing is defined
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.names())
            .field("pending", &self.pending.keys().collect::<Vec<_>>())
            .field("sealed", &self.sealed)
            .finish()
    }
}

fn fire(name: &str, descriptor: &TypeDescriptor, callbacks: Vec<Callback>) {
    if callbacks.is_empty() {
        return;
    }
    debug!(name, callbacks = callbacks.len(), "Resolving late-bound references");
    for callback in callbacks {
        callback(descriptor);
    }
}

/// Define every builtin value type under its platform name
pub fn register_builtin_types(registry: &mut TypeRegistry) -> Result<()> {
    registry.define_type::<RdfBytes>()?;
    registry.define_type::<RdfString>()?;
    registry.define_type::<RdfInteger>()?;
    registry.define_type::<RdfBool>()?;
    registry.define_type::<HashDigest>()?;
    registry.define_type::<RdfDatetime>()?;
    registry.define_type::<RdfDatetimeSeconds>()?;
    registry.define_type::<Duration>()?;
    registry.define_type::<ByteSize>()?;
    registry.define_type::<Urn>()?;
    registry.define_type::<Subject>()?;
    registry.define_type::<SessionId>()?;
    registry.define_type::<FlowSessionId>()?;
    Ok(())
}

// ============================================================================
// Process-wide registry
// ============================================================================

/// Global registry, builtins installed on first access
static GLOBAL_REGISTRY: Lazy<RwLock<TypeRegistry>> =
    Lazy::new(|| RwLock::new(TypeRegistry::with_builtins()));

/// Define a type in the process-wide registry
///
/// Callbacks run after the registry lock is released, so they may look
/// types up themselves.
pub fn define(name: &str, descriptor: TypeDescriptor) -> Result<()> {
    let callbacks = GLOBAL_REGISTRY.write().admit(name, descriptor)?;
    fire(name, &descriptor, callbacks);
    Ok(())
}

/// Define a concrete type in the process-wide registry
pub fn define_type<T: SemanticValue>() -> Result<()> {
    define(T::TYPE_NAME, TypeDescriptor::of::<T>())
}

/// Look up a type in the process-wide registry
pub fn lookup(name: &str) -> Result<TypeDescriptor> {
    GLOBAL_REGISTRY.read().lookup(name)
}

/// Run `callback` once `name` is defined in the process-wide registry
pub fn register_callback<C>(name: &str, callback: C)
where
    C: FnOnce(&TypeDescriptor) + Send + Sync + 'static,
{
    let descriptor = {
        let mut registry = GLOBAL_REGISTRY.write();
        match registry.types.get(name).copied() {
            Some(descriptor) => descriptor,
            None => {
                registry.defer(name, Box::new(callback));
                return;
            }
        }
    };
    fire(name, &descriptor, vec![Box::new(callback)]);
}

/// Parse wire bytes by type name using the process-wide registry
pub fn parse_by_name(name: &str, raw: &[u8]) -> Result<Box<dyn AnyValue>> {
    let descriptor = lookup(name)?;
    descriptor.parse(raw)
}

/// Seal the process-wide registry
pub fn seal() {
    GLOBAL_REGISTRY.write().seal();
}

/// True once the process-wide registry is sealed
pub fn is_sealed() -> bool {
    GLOBAL_REGISTRY.read().is_sealed()
}

/// Names defined in the process-wide registry, sorted
pub fn registered_names() -> Vec<String> {
    GLOBAL_REGISTRY
        .read()
        .names()
        .into_iter()
        .map(str::to_owned)
        .collect()
}
