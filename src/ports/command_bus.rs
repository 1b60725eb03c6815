//! CommandBus port - Routes a command to its single handler.
//!
//! The bus itself is object-safe and works on type-erased commands; the
//! typed `dispatch` entry point lives on [`CommandBusExt`], which every bus
//! gets for free.

use async_trait::async_trait;
use std::any::Any;

use crate::domain::foundation::{Command, DomainError, MessageType};

/// Handler for one concrete command type.
///
/// The command type it handles is the `C` it is implemented for; that is
/// the handler's `subscribed_to()` declaration.
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, command: C) -> Result<(), DomainError>;
}

/// Port for dispatching commands.
///
/// Dispatch runs the handler inline, in the caller's flow of control, and
/// produces no value: commands are fire-and-confirm.
#[async_trait]
pub trait CommandBus: Send + Sync {
    /// Dispatch a boxed command whose concrete type is `command_type`.
    async fn dispatch_erased(
        &self,
        command: Box<dyn Any + Send>,
        command_type: MessageType,
    ) -> Result<(), DomainError>;
}

/// Typed entry point for any [`CommandBus`].
#[async_trait]
pub trait CommandBusExt: CommandBus {
    /// Dispatch `command` to the handler registered for its concrete type.
    async fn dispatch<C: Command>(&self, command: C) -> Result<(), DomainError> {
        self.dispatch_erased(Box::new(command), MessageType::of::<C>())
            .await
    }
}

impl<T: CommandBus + ?Sized> CommandBusExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn CommandBus) {}
}
