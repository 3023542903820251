//! Backend and channel-directory traits for storage abstraction.
//!
//! Services and the scheduler only see these traits, so tests run against
//! [`crate::test_utils::FakeBackend`] instead of a live project.

use async_trait::async_trait;
use curator_client::{ClientError, Mutation, RemoteQuery, Selection, SupabaseClient, YouTubeClient};
use curator_types::YouTubeChannel;
use serde_json::Value;

/// Remote data operations the curator needs from the hosted backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Run a declarative read.
    async fn select(&self, query: &RemoteQuery) -> Result<Selection, ClientError>;
    /// Run an insert, update, or delete.
    async fn execute(&self, mutation: &Mutation) -> Result<(), ClientError>;
    /// Invoke a named serverless function.
    async fn invoke(&self, function: &str, body: Option<&Value>) -> Result<Value, ClientError>;
}

#[async_trait]
impl Backend for SupabaseClient {
    async fn select(&self, query: &RemoteQuery) -> Result<Selection, ClientError> {
        SupabaseClient::select(self, query).await
    }

    async fn execute(&self, mutation: &Mutation) -> Result<(), ClientError> {
        SupabaseClient::execute(self, mutation).await
    }

    async fn invoke(&self, function: &str, body: Option<&Value>) -> Result<Value, ClientError> {
        SupabaseClient::invoke(self, function, body).await
    }
}

/// Resolves an admin-supplied channel id or handle to channel details.
#[async_trait]
pub trait ChannelDirectory: Send + Sync {
    async fn resolve_channel(&self, input: &str) -> Result<YouTubeChannel, ClientError>;
}

#[async_trait]
impl ChannelDirectory for YouTubeClient {
    async fn resolve_channel(&self, input: &str) -> Result<YouTubeChannel, ClientError> {
        YouTubeClient::resolve_channel(self, input).await
    }
}
