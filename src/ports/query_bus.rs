//! QueryBus port - Routes a query to its single handler and returns its response.

use async_trait::async_trait;
use std::any::Any;

use crate::domain::foundation::{DomainError, ErrorCode, MessageType, Query};

/// Handler for one concrete query type.
#[async_trait]
pub trait QueryHandler<Q: Query>: Send + Sync {
    async fn handle(&self, query: Q) -> Result<Q::Response, DomainError>;
}

/// Port for asking queries.
///
/// Object-safe; responses travel type-erased and are restored by
/// [`QueryBusExt::ask`].
#[async_trait]
pub trait QueryBus: Send + Sync {
    /// Ask a boxed query whose concrete type is `query_type`.
    async fn ask_erased(
        &self,
        query: Box<dyn Any + Send>,
        query_type: MessageType,
    ) -> Result<Box<dyn Any + Send>, DomainError>;
}

/// Typed entry point for any [`QueryBus`].
#[async_trait]
pub trait QueryBusExt: QueryBus {
    /// Ask `query` and return the typed response of its handler.
    async fn ask<Q: Query>(&self, query: Q) -> Result<Q::Response, DomainError> {
        let query_type = MessageType::of::<Q>();
        let response = self.ask_erased(Box::new(query), query_type).await?;
        response
            .downcast::<Q::Response>()
            .map(|response| *response)
            .map_err(|_| {
                DomainError::for_type(
                    ErrorCode::InternalError,
                    query_type.name(),
                    format!("Handler for <{}> returned an unexpected response type", query_type),
                )
            })
    }
}

impl<T: QueryBus + ?Sized> QueryBusExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn QueryBus) {}
}
