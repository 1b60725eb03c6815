//! Query dispatch table and the in-memory query bus built on it.

use async_trait::async_trait;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, MessageType, Query};
use crate::ports::{QueryBus, QueryHandler};

/// Type-erased query handler stored in the dispatch table.
#[async_trait]
pub trait ErasedQueryHandler: Send + Sync {
    /// The single concrete query type this handler answers.
    fn subscribed_to(&self) -> MessageType;

    async fn handle_erased(
        &self,
        query: Box<dyn Any + Send>,
    ) -> Result<Box<dyn Any + Send>, DomainError>;
}

struct TypedQueryHandler<Q, H> {
    handler: H,
    _query: PhantomData<fn(Q)>,
}

#[async_trait]
impl<Q, H> ErasedQueryHandler for TypedQueryHandler<Q, H>
where
    Q: Query,
    H: QueryHandler<Q> + 'static,
{
    fn subscribed_to(&self) -> MessageType {
        MessageType::of::<Q>()
    }

    async fn handle_erased(
        &self,
        query: Box<dyn Any + Send>,
    ) -> Result<Box<dyn Any + Send>, DomainError> {
        let query = query.downcast::<Q>().map_err(|_| {
            let expected = MessageType::of::<Q>();
            DomainError::for_type(
                ErrorCode::InternalError,
                expected.name(),
                format!("Query routed to the handler of <{}> has another type", expected),
            )
        })?;
        let response = self.handler.handle(*query).await?;
        Ok(Box::new(response))
    }
}

/// Wraps a typed handler so it can be registered alongside handlers of other queries.
pub fn query_handler<Q, H>(handler: H) -> Arc<dyn ErasedQueryHandler>
where
    Q: Query,
    H: QueryHandler<Q> + 'static,
{
    Arc::new(TypedQueryHandler::<Q, H> {
        handler,
        _query: PhantomData,
    })
}

/// Exact-type mapping from query type to its sole handler.
pub struct QueryHandlers {
    handlers: HashMap<TypeId, Arc<dyn ErasedQueryHandler>>,
}

impl QueryHandlers {
    /// Builds the table, rejecting a second handler for the same query type.
    pub fn new(handlers: Vec<Arc<dyn ErasedQueryHandler>>) -> Result<Self, DomainError> {
        let mut table: HashMap<TypeId, Arc<dyn ErasedQueryHandler>> = HashMap::new();
        for handler in handlers {
            let query_type = handler.subscribed_to();
            if table.insert(query_type.id(), handler).is_some() {
                return Err(DomainError::for_type(
                    ErrorCode::DuplicateHandler,
                    query_type.name(),
                    format!(
                        "The query <{}> has more than one query handler associated",
                        query_type
                    ),
                ));
            }
        }
        Ok(Self { handlers: table })
    }

    pub fn get(&self, query_type: MessageType) -> Result<&Arc<dyn ErasedQueryHandler>, DomainError> {
        self.handlers.get(&query_type.id()).ok_or_else(|| {
            DomainError::for_type(
                ErrorCode::QueryNotRegistered,
                query_type.name(),
                format!("The query <{}> hasn't a query handler associated", query_type),
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

/// Query bus that runs the resolved handler inline and returns its response.
pub struct InMemoryQueryBus {
    handlers: QueryHandlers,
}

impl InMemoryQueryBus {
    pub fn new(handlers: QueryHandlers) -> Self {
        Self { handlers }
    }
}

#[async_trait]
impl QueryBus for InMemoryQueryBus {
    async fn ask_erased(
        &self,
        query: Box<dyn Any + Send>,
        query_type: MessageType,
    ) -> Result<Box<dyn Any + Send>, DomainError> {
        let handler = self.handlers.get(query_type)?;
        tracing::debug!(query = %query_type, "Asking query");
        handler.handle_erased(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::QueryResponse;
    use crate::ports::QueryBusExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FindUser {
        id: u32,
    }

    #[derive(Debug, PartialEq)]
    struct UserResponse {
        name: String,
    }
    impl QueryResponse for UserResponse {}

    impl Query for FindUser {
        type Response = UserResponse;
    }

    struct CountUsers;

    #[derive(Debug, PartialEq)]
    struct CountResponse(usize);
    impl QueryResponse for CountResponse {}

    impl Query for CountUsers {
        type Response = CountResponse;
    }

    struct FindUserHandler {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl QueryHandler<FindUser> for FindUserHandler {
        async fn handle(&self, query: FindUser) -> Result<UserResponse, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(UserResponse {
                name: format!("user-{}", query.id),
            })
        }
    }

    fn find_user_handler(calls: Arc<AtomicUsize>) -> Arc<dyn ErasedQueryHandler> {
        query_handler::<FindUser, _>(FindUserHandler { calls })
    }

    #[tokio::test]
    async fn ask_returns_typed_response_from_single_invocation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let bus = InMemoryQueryBus::new(QueryHandlers::new(vec![find_user_handler(calls.clone())]).unwrap());

        let response = bus.ask(FindUser { id: 7 }).await.unwrap();

        assert_eq!(
            response,
            UserResponse {
                name: "user-7".to_string()
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn ask_of_unregistered_query_names_it() {
        let calls = Arc::new(AtomicUsize::new(0));
        let bus = InMemoryQueryBus::new(QueryHandlers::new(vec![find_user_handler(calls)]).unwrap());

        let err = bus.ask(CountUsers).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::QueryNotRegistered);
        assert_eq!(err.type_name(), Some("CountUsers"));
    }

    #[test]
    fn duplicate_query_handler_fails_build() {
        let calls = Arc::new(AtomicUsize::new(0));
        let result = QueryHandlers::new(vec![
            find_user_handler(calls.clone()),
            find_user_handler(calls),
        ]);

        assert_eq!(result.err().unwrap().code, ErrorCode::DuplicateHandler);
    }

    #[test]
    fn empty_table_is_valid() {
        assert!(QueryHandlers::new(Vec::new()).unwrap().is_empty());
    }
}
