use crate::host_api::{DocumentHost, HostError, HostNode, HostNodeType, NodeId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

const SHAPE_TAGS: &[&str] = &["path", "circle", "rect", "polygon", "ellipse", "line", "polyline"];

struct MemNode {
    name: String,
    node_type: HostNodeType,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Default)]
struct DocState {
    nodes: HashMap<NodeId, MemNode>,
    selection: Vec<NodeId>,
    next_id: u64,
    ui_size: Option<(u32, u32)>,
}

impl DocState {
    fn insert(&mut self, parent: Option<&str>, name: &str, node_type: HostNodeType) -> NodeId {
        self.next_id += 1;
        let id = format!("1:{}", self.next_id);
        self.nodes.insert(
            id.clone(),
            MemNode {
                name: name.to_string(),
                node_type,
                parent: parent.map(str::to_string),
                children: Vec::new(),
            },
        );
        if let Some(p) = parent {
            if let Some(pn) = self.nodes.get_mut(p) {
                pn.children.push(id.clone());
            }
        }
        id
    }

    fn detach(&mut self, id: &str) {
        let Some(parent) = self.nodes.get_mut(id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(pn) = self.nodes.get_mut(&parent) {
            pn.children.retain(|c| c != id);
        }
    }

    fn is_ancestor(&self, ancestor: &str, id: &str) -> bool {
        let mut current = id;
        while let Some(parent) = self.nodes.get(current).and_then(|n| n.parent.as_deref()) {
            if parent == ancestor {
                return true;
            }
            current = parent;
        }
        false
    }
}

/// In-process document used by the mock host and the tests. The real document lives in the
/// design tool.
#[derive(Default)]
pub struct MemoryDocument {
    state: Mutex<DocState>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, DocState>, HostError> {
        self.state
            .lock()
            .map_err(|_| HostError::new("document lock poisoned"))
    }

    /// Adds a node at the end of `parent`'s children, or as a page-level node.
    pub fn add_node(&self, parent: Option<&str>, name: &str, node_type: HostNodeType) -> NodeId {
        match self.lock() {
            Ok(mut st) => st.insert(parent, name, node_type),
            Err(_) => NodeId::new(),
        }
    }

    pub fn set_selection(&self, ids: &[&str]) {
        if let Ok(mut st) = self.lock() {
            st.selection = ids.iter().map(|s| s.to_string()).collect();
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().map(|st| st.nodes.contains_key(id)).unwrap_or(false)
    }

    pub fn child_names(&self, id: &str) -> Vec<String> {
        let Ok(st) = self.lock() else {
            return Vec::new();
        };
        st.nodes
            .get(id)
            .map(|n| {
                n.children
                    .iter()
                    .filter_map(|c| st.nodes.get(c).map(|c| c.name.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn ui_size(&self) -> Option<(u32, u32)> {
        self.lock().ok().and_then(|st| st.ui_size)
    }
}

impl DocumentHost for MemoryDocument {
    fn selection(&self) -> Vec<HostNode> {
        let Ok(st) = self.lock() else {
            return Vec::new();
        };
        st.selection
            .iter()
            .filter_map(|id| {
                st.nodes.get(id).map(|n| HostNode {
                    id: id.clone(),
                    name: n.name.clone(),
                    node_type: n.node_type,
                })
            })
            .collect()
    }

    fn node_by_id(&self, id: &str) -> Result<Option<HostNode>, HostError> {
        let st = self.lock()?;
        Ok(st.nodes.get(id).map(|n| HostNode {
            id: id.to_string(),
            name: n.name.clone(),
            node_type: n.node_type,
        }))
    }

    fn children(&self, id: &str) -> Result<Vec<NodeId>, HostError> {
        let st = self.lock()?;
        st.nodes
            .get(id)
            .map(|n| n.children.clone())
            .ok_or_else(|| HostError::new(format!("node {id} not found")))
    }

    /// Stand-in for the host's SVG import: one `Vector` child per shape element, in document
    /// order, under a detached `svg` frame.
    fn import_vector(&self, markup: &str) -> Option<NodeId> {
        if !markup.contains("<svg") {
            return None;
        }
        let mut st = self.lock().ok()?;
        let root = st.insert(None, "svg", HostNodeType::Frame);
        for (pos, _) in markup.match_indices('<') {
            let tag: String = markup[pos + 1..]
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric())
                .collect();
            if SHAPE_TAGS.contains(&tag.as_str()) {
                st.insert(Some(root.as_str()), &tag, HostNodeType::Vector);
            }
        }
        Some(root)
    }

    fn remove_node(&self, id: &str) -> Result<(), HostError> {
        let mut st = self.lock()?;
        if !st.nodes.contains_key(id) {
            return Err(HostError::new(format!("node {id} not found")));
        }
        st.detach(id);
        let mut stack = vec![id.to_string()];
        while let Some(next) = stack.pop() {
            if let Some(node) = st.nodes.remove(&next) {
                stack.extend(node.children);
            }
        }
        let state = &mut *st;
        state.selection.retain(|s| state.nodes.contains_key(s));
        Ok(())
    }

    fn append_child(&self, parent: &str, child: &str) -> Result<(), HostError> {
        let mut st = self.lock()?;
        if !st.nodes.contains_key(parent) || !st.nodes.contains_key(child) {
            return Err(HostError::new(format!("cannot append {child} to {parent}: node not found")));
        }
        if parent == child || st.is_ancestor(child, parent) {
            return Err(HostError::new(format!("cannot append {child} into its own subtree")));
        }
        st.detach(child);
        if let Some(n) = st.nodes.get_mut(child) {
            n.parent = Some(parent.to_string());
        }
        if let Some(p) = st.nodes.get_mut(parent) {
            p.children.push(child.to_string());
        }
        Ok(())
    }

    fn resize_ui(&self, width: u32, height: u32) {
        if let Ok(mut st) = self.lock() {
            st.ui_size = Some((width, height));
        }
    }
}
