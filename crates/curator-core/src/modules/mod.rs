pub mod admin;
pub mod backend;
pub mod content;
pub mod logger;
pub mod query_builder;
