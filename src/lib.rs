//! MCP server exposing read-only Facebook Marketing API tools.
//!
//! Each tool maps one call onto a Graph API GET: the caller's typed options are
//! encoded into the query the API expects, the process-wide access token is
//! attached, and the decoded JSON body is returned unmodified.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod managers;
pub mod mcp;
pub mod services;
pub mod utils;
