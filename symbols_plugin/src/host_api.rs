use crate::protocol::NodeKind;
use thiserror::Error;

/// Opaque node identifier assigned by the host document.
pub type NodeId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostNodeType {
    Component,
    Frame,
    Group,
    Instance,
    Vector,
    Text,
    Other,
}

impl HostNodeType {
    /// Node kinds the updater accepts from the selection.
    pub fn selectable_kind(self) -> Option<NodeKind> {
        match self {
            HostNodeType::Component => Some(NodeKind::Component),
            HostNodeType::Frame => Some(NodeKind::Frame),
            _ => None,
        }
    }

    pub fn is_container(self) -> bool {
        matches!(
            self,
            HostNodeType::Component | HostNodeType::Frame | HostNodeType::Group | HostNodeType::Instance
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostNode {
    pub id: NodeId,
    pub name: String,
    pub node_type: HostNodeType,
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct HostError {
    pub message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Capabilities the plugin needs from the design tool. The document tree stays owned by the
/// host; the plugin only ever holds ids.
pub trait DocumentHost {
    /// Current selection on the active page, in host order.
    fn selection(&self) -> Vec<HostNode>;

    /// `Ok(None)` when the node no longer exists. `Err` means the host itself failed.
    fn node_by_id(&self, id: &str) -> Result<Option<HostNode>, HostError>;

    fn children(&self, id: &str) -> Result<Vec<NodeId>, HostError>;

    /// Whether the node can hold children, regardless of whether it currently has any.
    fn is_container(&self, id: &str) -> Result<bool, HostError> {
        match self.node_by_id(id)? {
            Some(node) => Ok(node.node_type.is_container()),
            None => Err(HostError::new(format!("node {id} not found"))),
        }
    }

    /// Builds a detached node tree from vector markup. `None` when the markup is rejected.
    fn import_vector(&self, markup: &str) -> Option<NodeId>;

    /// Detaches and destroys a node together with its subtree.
    fn remove_node(&self, id: &str) -> Result<(), HostError>;

    /// Moves `child` (detaching it from any previous parent) to the end of `parent`'s children.
    fn append_child(&self, parent: &str, child: &str) -> Result<(), HostError>;

    fn resize_ui(&self, width: u32, height: u32);
}
