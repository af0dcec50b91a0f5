pub mod api_connection;
pub mod cli;
pub mod generation;
pub mod nutrition;
pub mod pipeline;
pub mod recipe_document;
pub mod shopping;
