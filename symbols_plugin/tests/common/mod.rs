#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use symbols_plugin::{
    DocumentHost, FetchError, HostError, HostNode, IconFetcher, MemoryDocument, NodeId,
};

pub const BASE_URL: &str = "https://icons.test/symbols/web";

pub const TWO_SHAPES_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 -960 960 960"><path d="M240-200h120v-240h240v240h120v-360L480-740 240-560v360Z"/><circle cx="480" cy="480" r="40"/></svg>"#;

/// Serves canned markup by URL; every other URL is a 404.
#[derive(Clone, Default)]
pub struct MapFetcher {
    responses: HashMap<String, String>,
    pub requested: Arc<Mutex<Vec<String>>>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses.insert(url.into(), body.into());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl IconFetcher for MapFetcher {
    async fn fetch_svg(&self, url: &str) -> Result<String, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or(FetchError::BadStatus {
                status: StatusCode::NOT_FOUND,
            })
    }
}

/// Delegates to a `MemoryDocument` but fails lookups of one id as if the host broke.
pub struct FailingLookupHost {
    pub doc: MemoryDocument,
    pub failing_id: NodeId,
}

impl DocumentHost for FailingLookupHost {
    fn selection(&self) -> Vec<HostNode> {
        self.doc.selection()
    }

    fn node_by_id(&self, id: &str) -> Result<Option<HostNode>, HostError> {
        if id == self.failing_id {
            return Err(HostError::new("host unavailable"));
        }
        self.doc.node_by_id(id)
    }

    fn children(&self, id: &str) -> Result<Vec<NodeId>, HostError> {
        self.doc.children(id)
    }

    fn import_vector(&self, markup: &str) -> Option<NodeId> {
        self.doc.import_vector(markup)
    }

    fn remove_node(&self, id: &str) -> Result<(), HostError> {
        self.doc.remove_node(id)
    }

    fn append_child(&self, parent: &str, child: &str) -> Result<(), HostError> {
        self.doc.append_child(parent, child)
    }

    fn resize_ui(&self, width: u32, height: u32) {
        self.doc.resize_ui(width, height)
    }
}
