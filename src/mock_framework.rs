//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_query`] to assert behavior.

use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{Entity, Filter, ResourceClient, ResourceRequest};

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// When testing *client* logic (e.g. `OrderClient::checkout`) there is no need
/// to run a `ResourceActor`. The mock client sends into a channel the test owns,
/// so the test can inspect each request and answer it (success, failure,
/// silence) deterministically.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, oneshot::Sender<Result<T, T::Error>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, T::Error>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Query request
pub async fn expect_query<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Filter<T>, oneshot::Sender<Result<Vec<T>, T::Error>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Query { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, oneshot::Sender<Result<Option<T::ActionResult>, T::Error>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{CourseClient, ProductClient};
    use crate::domain::{Course, Product};
    use crate::product_actor::{ProductAction, ProductActionResult};

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let restock_task = tokio::spawn(async move { client.restock("1".to_string(), 4).await });

        let (id, action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        assert_eq!(id, "1");
        assert!(matches!(action, ProductAction::Restock(4)));
        responder.send(Ok(Some(ProductActionResult::StockLevel(14)))).unwrap();

        let result = restock_task.await.unwrap();
        assert_eq!(result, Ok(Some(14)));
    }

    #[tokio::test]
    async fn test_mock_lookup_miss() {
        let (inner, mut receiver) = create_mock_client::<Course>(10);
        let client = CourseClient::new(inner);

        let lookup_task = tokio::spawn(async move { client.get_course_by_id("missing".to_string()).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, "missing");
        responder.send(Ok(None)).unwrap();

        assert_eq!(lookup_task.await.unwrap(), Ok(None));
    }
}
