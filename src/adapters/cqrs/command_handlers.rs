//! Command dispatch table and the in-memory command bus built on it.

use async_trait::async_trait;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::domain::foundation::{Command, DomainError, ErrorCode, MessageType};
use crate::ports::{CommandBus, CommandHandler};

/// Type-erased command handler stored in the dispatch table.
#[async_trait]
pub trait ErasedCommandHandler: Send + Sync {
    /// The single concrete command type this handler accepts.
    fn subscribed_to(&self) -> MessageType;

    async fn handle_erased(&self, command: Box<dyn Any + Send>) -> Result<(), DomainError>;
}

struct TypedCommandHandler<C, H> {
    handler: H,
    _command: PhantomData<fn(C)>,
}

#[async_trait]
impl<C, H> ErasedCommandHandler for TypedCommandHandler<C, H>
where
    C: Command,
    H: CommandHandler<C> + 'static,
{
    fn subscribed_to(&self) -> MessageType {
        MessageType::of::<C>()
    }

    async fn handle_erased(&self, command: Box<dyn Any + Send>) -> Result<(), DomainError> {
        let command = command.downcast::<C>().map_err(|_| {
            let expected = MessageType::of::<C>();
            DomainError::for_type(
                ErrorCode::InternalError,
                expected.name(),
                format!("Command routed to the handler of <{}> has another type", expected),
            )
        })?;
        self.handler.handle(*command).await
    }
}

/// Wraps a typed handler so it can be registered alongside handlers of other commands.
pub fn command_handler<C, H>(handler: H) -> Arc<dyn ErasedCommandHandler>
where
    C: Command,
    H: CommandHandler<C> + 'static,
{
    Arc::new(TypedCommandHandler::<C, H> {
        handler,
        _command: PhantomData,
    })
}

/// Exact-type mapping from command type to its sole handler.
///
/// Built once and never mutated afterwards, so lookups need no locking.
pub struct CommandHandlers {
    handlers: HashMap<TypeId, Arc<dyn ErasedCommandHandler>>,
}

impl CommandHandlers {
    /// Builds the table. Two handlers for the same command type is a
    /// configuration fault and fails the build.
    pub fn new(handlers: Vec<Arc<dyn ErasedCommandHandler>>) -> Result<Self, DomainError> {
        let mut table: HashMap<TypeId, Arc<dyn ErasedCommandHandler>> = HashMap::new();
        for handler in handlers {
            let command_type = handler.subscribed_to();
            if table.contains_key(&command_type.id()) {
                return Err(DomainError::for_type(
                    ErrorCode::DuplicateHandler,
                    command_type.name(),
                    format!(
                        "The command <{}> has more than one command handler associated",
                        command_type
                    ),
                ));
            }
            table.insert(command_type.id(), handler);
        }
        Ok(Self { handlers: table })
    }

    /// Resolves the handler for `command_type`.
    pub fn get(&self, command_type: MessageType) -> Result<&Arc<dyn ErasedCommandHandler>, DomainError> {
        self.handlers.get(&command_type.id()).ok_or_else(|| {
            DomainError::for_type(
                ErrorCode::CommandNotRegistered,
                command_type.name(),
                format!(
                    "The command <{}> hasn't a command handler associated",
                    command_type
                ),
            )
        })
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Command bus that runs the resolved handler inline.
pub struct InMemoryCommandBus {
    handlers: CommandHandlers,
}

impl InMemoryCommandBus {
    pub fn new(handlers: CommandHandlers) -> Self {
        Self { handlers }
    }
}

#[async_trait]
impl CommandBus for InMemoryCommandBus {
    async fn dispatch_erased(
        &self,
        command: Box<dyn Any + Send>,
        command_type: MessageType,
    ) -> Result<(), DomainError> {
        let handler = self.handlers.get(command_type)?;
        tracing::debug!(command = %command_type, "Dispatching command");
        handler.handle_erased(command).await
    }
}
