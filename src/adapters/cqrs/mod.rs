//! In-process CQRS adapters.
//!
//! - `CommandHandlers` / `InMemoryCommandBus` - Exact-type command dispatch
//! - `QueryHandlers` / `InMemoryQueryBus` - Exact-type query dispatch

mod command_handlers;
mod query_handlers;

pub use command_handlers::{command_handler, CommandHandlers, ErasedCommandHandler, InMemoryCommandBus};
pub use query_handlers::{query_handler, ErasedQueryHandler, InMemoryQueryBus, QueryHandlers};
