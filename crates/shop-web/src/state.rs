//! Application state.

use std::path::PathBuf;
use std::sync::Arc;

use shop_core::media::LocalImageStore;
use shop_core::memory::{
    InMemoryCustomerAccounts, InMemoryImageStore, InMemoryProductCatalog, InMemoryPurchaseGraph,
    InMemorySessionStore,
};
use shop_core::{CustomerAccounts, ImageStore, ProductCatalog, PurchaseGraph, SessionStore};

/// Store handles shared across handlers.
///
/// Each handle is opened once at startup and dropped when the server stops.
#[derive(Clone)]
pub struct AppState {
    pub graph: Arc<dyn PurchaseGraph>,
    pub sessions: Arc<dyn SessionStore>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub accounts: Arc<dyn CustomerAccounts>,
    pub images: Arc<dyn ImageStore>,
    /// Directory served under `/media`, if images are stored locally.
    pub media_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(
        graph: Arc<dyn PurchaseGraph>,
        sessions: Arc<dyn SessionStore>,
        catalog: Arc<dyn ProductCatalog>,
        accounts: Arc<dyn CustomerAccounts>,
        images: LocalImageStore,
    ) -> Self {
        Self {
            graph,
            sessions,
            catalog,
            accounts,
            media_dir: Some(images.dir().to_path_buf()),
            images: Arc::new(images),
        }
    }

    /// State backed entirely by in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            graph: Arc::new(InMemoryPurchaseGraph::new()),
            sessions: Arc::new(InMemorySessionStore::new()),
            catalog: Arc::new(InMemoryProductCatalog::new()),
            accounts: Arc::new(InMemoryCustomerAccounts::new()),
            images: Arc::new(InMemoryImageStore::new()),
            media_dir: None,
        }
    }

    /// Store uploaded images on disk and serve them under `/media`.
    pub fn with_local_images(mut self, images: LocalImageStore) -> Self {
        self.media_dir = Some(images.dir().to_path_buf());
        self.images = Arc::new(images);
        self
    }

    /// Replace the graph store.
    pub fn with_graph(mut self, graph: Arc<dyn PurchaseGraph>) -> Self {
        self.graph = graph;
        self
    }
}
