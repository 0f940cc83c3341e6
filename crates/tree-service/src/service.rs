use anyhow::{Context, Result};
use log::{debug, info, warn};
use tree_diff::TreeDiff;
use tree_store::{Document, TreeError, TreeStore};

use crate::backend::{MemoryBackend, TreeBackend};
use crate::config::ServiceConfig;
use crate::protocol::{Request, Response};

/// Owns the canonical tree and answers client requests
///
/// Every request takes `&mut self`, so mutations are applied one at a time.
/// A mutation is only kept once the backend has stored the new tree; if
/// validation or storage fails the tree stays exactly as it was.
pub struct TreeService<B: TreeBackend = MemoryBackend> {
    /// The canonical tree
    store: TreeStore,
    /// Where the tree lives between requests
    backend: B,
    /// Service settings
    config: ServiceConfig,
}

impl TreeService<MemoryBackend> {
    /// A service over an empty, memory-only tree
    pub fn in_memory() -> Self {
        Self {
            store: TreeStore::new(),
            backend: MemoryBackend::new(),
            config: ServiceConfig::default(),
        }
    }
}

impl<B: TreeBackend> TreeService<B> {
    /// Open a service, loading the current tree from `backend`
    pub fn open(mut backend: B, config: ServiceConfig) -> Result<Self> {
        let document = backend.load().context("Failed to load tree from backend")?;
        let store =
            TreeStore::from_document(&document).context("Stored tree is not a valid tree")?;

        info!("Tree service ready with {} node(s)", store.len());
        Ok(Self {
            store,
            backend,
            config,
        })
    }

    /// Read access to the canonical tree
    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    /// Read access to the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The service settings
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Answer a request given as JSON text, replying with JSON text
    pub fn handle_json(&mut self, text: &str) -> String {
        let response = match serde_json::from_str::<Request>(text) {
            Ok(request) => self.handle(request),
            Err(err) => {
                warn!("Rejected undecodable request: {}", err);
                Response::error(format!("Invalid request: {err}"))
            }
        };

        serde_json::to_string(&response).unwrap_or_else(|err| {
            format!(r#"{{"error":"Failed to encode response: {err}"}}"#)
        })
    }

    /// Answer a request
    pub fn handle(&mut self, request: Request) -> Response {
        info!("Handling {}", request.op());

        let response = match request {
            Request::GetTree => Response::Tree(self.store.to_document()),
            Request::CreateRoot { name } => {
                let name = name.unwrap_or_else(|| self.config.root_name.clone());
                self.mutate(|store| store.create_root(&name).map(drop))
            }
            Request::AddNode { parent_name, name } => {
                self.mutate(|store| store.add_node(&parent_name, &name).map(drop))
            }
            Request::DeleteNode { node_name } => {
                self.mutate(|store| store.delete_node(&node_name))
            }
            Request::MoveNode {
                node_name,
                new_parent_name,
            } => self.mutate(|store| store.move_node(&node_name, &new_parent_name)),
            Request::CompareNodes {
                node_name1,
                node_name2,
            } => match TreeDiff::new(&self.store, &node_name1, &node_name2) {
                Ok(diff) => Response::Differences {
                    differences: diff.messages(),
                },
                Err(err) => Response::error(err),
            },
            Request::LoadTree { contents } => match Document::from_json_str(&contents) {
                Ok(document) => self.mutate(|store| store.replace(document.root())),
                Err(err) => Response::error(err),
            },
            Request::SaveTree => self.save(),
        };

        if let Response::Error { error } = &response {
            debug!("Request failed: {}", error);
        }
        response
    }

    fn save(&self) -> Response {
        if self.store.is_empty() {
            return Response::Status {
                status: "No data to save".to_string(),
            };
        }
        Response::Download {
            filename: self.config.save_filename.clone(),
            contents: self.store.to_document().to_json_pretty(),
        }
    }

    /// Apply `op` to the tree and persist the result, or leave everything as
    /// it was
    fn mutate<F>(&mut self, op: F) -> Response
    where
        F: FnOnce(&mut TreeStore) -> Result<(), TreeError>,
    {
        let snapshot = self.store.clone();

        if let Err(err) = op(&mut self.store) {
            // Store operations validate before touching state
            return Response::error(err);
        }

        let document = self.store.to_document();
        if let Err(err) = self.backend.store(&document) {
            warn!("Rolling back mutation, backend store failed: {:#}", err);
            self.store = snapshot;
            return Response::error(format!("Failed to persist tree: {err:#}"));
        }

        Response::Tree(document)
    }
}
