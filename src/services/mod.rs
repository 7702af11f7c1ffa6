pub mod credentials;
pub mod graph_client;
pub mod graph_options;
pub mod logger;
pub mod query_encoder;
pub mod tool_executor;
pub mod validation;
