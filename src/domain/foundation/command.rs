//! Command and query markers for the CQRS dispatch tables.
//!
//! Messages carry no behavior. Their identity for dispatch is the concrete
//! Rust type, captured as a [`MessageType`].

use std::any::{Any, TypeId};
use std::fmt;

/// Marker for intent-to-change messages. Handled by exactly one handler.
pub trait Command: Any + Send + Sync {}

/// Marker for read requests. Handled by exactly one handler.
pub trait Query: Any + Send + Sync {
    /// Typed response produced by the query's handler.
    type Response: QueryResponse;
}

/// Marker for query results.
pub trait QueryResponse: Any + Send {}

/// Runtime identity of a concrete command or query type.
#[derive(Clone, Copy)]
pub struct MessageType {
    id: TypeId,
    name: &'static str,
}

impl MessageType {
    /// Identity of the type `M`.
    pub fn of<M: Any>() -> Self {
        Self {
            id: TypeId::of::<M>(),
            name: short_type_name(std::any::type_name::<M>()),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Unqualified type name, used in error messages and logs.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for MessageType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MessageType {}

impl fmt::Debug for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageType({})", self.name)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    // Keep generic arguments intact; only strip the leading module path.
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}
