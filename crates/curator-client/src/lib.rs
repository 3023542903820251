#![doc = include_str!("../README.md")]

mod client;
mod error;
pub mod query;
mod types;
pub mod youtube;

pub use client::SupabaseClient;
pub use error::ClientError;
pub use query::{Filter, Mutation, RemoteQuery, Selection};
pub use types::*;
pub use youtube::YouTubeClient;
