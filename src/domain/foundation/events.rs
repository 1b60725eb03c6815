//! Event infrastructure for domain event publishing and handling.
//!
//! This module provides the core types and traits for event-driven architecture:
//! - `DomainEvent` - Object-safe trait every recorded event implements
//! - `DomainEventClass` - Static side of an event type (stable name, reconstruction)
//! - `DomainEventPrimitives` - The primitive fields an event is rebuilt from
//! - `EventDescriptor` - Type-erased handle a subscriber uses to declare interest
//! - `domain_event!` - Macro to implement both traits with minimal boilerplate

use serde_json::Value as JsonValue;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::{DomainError, EventId, Timestamp};

// ============================================
// DomainEvent Trait
// ============================================

/// Trait that all domain events must implement.
///
/// Events are immutable facts. They travel through the bus as
/// `Arc<dyn DomainEvent>` and subscribers recover the concrete type with
/// [`downcast_ref`](trait.DomainEvent.html#method.downcast_ref).
pub trait DomainEvent: Any + Send + Sync + fmt::Debug {
    /// Returns the stable event name (e.g., "order.placed").
    ///
    /// Used for routing and serialization, so it MUST NOT change once events
    /// of this type have been persisted.
    fn event_name(&self) -> &'static str;

    /// Returns the unique ID for this event instance.
    fn event_id(&self) -> EventId;

    /// Returns the ID of the aggregate that recorded this event.
    fn aggregate_id(&self) -> &str;

    /// Returns when the event occurred.
    fn occurred_on(&self) -> Timestamp;

    /// Returns the event-specific payload in primitive (JSON) form.
    fn to_primitives(&self) -> Result<JsonValue, DomainError>;

    /// Upcast used for downcasting to the concrete event type.
    fn as_any(&self) -> &dyn Any;
}

impl dyn DomainEvent {
    /// Returns the concrete event if it is of type `E`.
    pub fn downcast_ref<E: DomainEvent>(&self) -> Option<&E> {
        self.as_any().downcast_ref::<E>()
    }

    /// Checks whether this event is of type `E`.
    pub fn is<E: DomainEvent>(&self) -> bool {
        self.as_any().is::<E>()
    }
}

/// Primitive fields an event is reconstructed from.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainEventPrimitives {
    pub event_id: EventId,
    pub aggregate_id: String,
    pub occurred_on: Timestamp,
    pub attributes: JsonValue,
}

/// Static side of a domain event type.
pub trait DomainEventClass: DomainEvent + Sized {
    /// Stable, serialized name of this event type.
    const EVENT_NAME: &'static str;

    /// Rebuilds an event from its primitive representation.
    fn from_primitives(primitives: DomainEventPrimitives) -> Result<Self, DomainError>;
}

type ReconstructFn = fn(DomainEventPrimitives) -> Result<Arc<dyn DomainEvent>, DomainError>;

fn reconstruct<E: DomainEventClass>(
    primitives: DomainEventPrimitives,
) -> Result<Arc<dyn DomainEvent>, DomainError> {
    Ok(Arc::new(E::from_primitives(primitives)?))
}

/// Type-erased description of an event type: its name and how to rebuild it.
///
/// Subscribers return these from `subscribed_to()`; the bus indexes handlers
/// by `name` and the deserializer indexes `reconstruct` by the same name.
#[derive(Clone, Copy)]
pub struct EventDescriptor {
    name: &'static str,
    reconstruct: ReconstructFn,
}

impl EventDescriptor {
    /// Describes the event type `E`.
    pub fn of<E: DomainEventClass>() -> Self {
        Self {
            name: E::EVENT_NAME,
            reconstruct: reconstruct::<E>,
        }
    }

    /// Returns the stable event name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rebuilds an event of the described type.
    pub fn reconstruct(
        &self,
        primitives: DomainEventPrimitives,
    ) -> Result<Arc<dyn DomainEvent>, DomainError> {
        (self.reconstruct)(primitives)
    }
}

impl fmt::Debug for EventDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDescriptor")
            .field("name", &self.name)
            .finish()
    }
}

impl PartialEq for EventDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for EventDescriptor {}

/// Macro to implement `DomainEvent` and `DomainEventClass` with minimal boilerplate.
///
/// The attributes field must be `Serialize + DeserializeOwned`, the aggregate id
/// field a `String`.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct OrderPlacedAttributes {
///     pub total_cents: i64,
/// }
///
/// #[derive(Debug, Clone)]
/// pub struct OrderPlaced {
///     pub event_id: EventId,
///     pub order_id: String,
///     pub occurred_on: Timestamp,
///     pub attributes: OrderPlacedAttributes,
/// }
///
/// domain_event!(
///     OrderPlaced,
///     name = "order.placed",
///     event_id = event_id,
///     aggregate_id = order_id,
///     occurred_on = occurred_on,
///     attributes = attributes
/// );
/// ```
#[macro_export]
macro_rules! domain_event {
    (
        $event_name:ident,
        name = $name:expr,
        event_id = $event_id_field:ident,
        aggregate_id = $agg_id_field:ident,
        occurred_on = $occurred_field:ident,
        attributes = $attributes_field:ident
    ) => {
        impl $crate::domain::foundation::DomainEvent for $event_name {
            fn event_name(&self) -> &'static str {
                $name
            }

            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.$event_id_field
            }

            fn aggregate_id(&self) -> &str {
                &self.$agg_id_field
            }

            fn occurred_on(&self) -> $crate::domain::foundation::Timestamp {
                self.$occurred_field
            }

            fn to_primitives(
                &self,
            ) -> ::std::result::Result<$crate::__private::serde_json::Value, $crate::domain::foundation::DomainError>
            {
                Ok($crate::__private::serde_json::to_value(&self.$attributes_field)?)
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }

        impl $crate::domain::foundation::DomainEventClass for $event_name {
            const EVENT_NAME: &'static str = $name;

            fn from_primitives(
                primitives: $crate::domain::foundation::DomainEventPrimitives,
            ) -> ::std::result::Result<Self, $crate::domain::foundation::DomainError> {
                Ok(Self {
                    $event_id_field: primitives.event_id,
                    $agg_id_field: primitives.aggregate_id,
                    $occurred_field: primitives.occurred_on,
                    $attributes_field: $crate::__private::serde_json::from_value(primitives.attributes)?,
                })
            }
        }
    };
}
