// Request/response service over the canonical tree
// This crate implements the document-based contract clients talk to

mod backend;
mod config;
mod protocol;
mod service;

pub use backend::{JsonFileBackend, MemoryBackend, TreeBackend};
pub use config::ServiceConfig;
pub use protocol::{Request, Response};
pub use service::TreeService;
