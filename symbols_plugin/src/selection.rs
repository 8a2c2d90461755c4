use crate::host_api::DocumentHost;
use crate::identifier::extract_icon_name;
use crate::protocol::{PluginEvent, SelectableNode};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub nodes: Vec<SelectableNode>,
    pub has_unsupported_nodes: bool,
}

impl SelectionSnapshot {
    pub fn to_event(&self) -> PluginEvent {
        PluginEvent::SelectionChanged {
            nodes: self.nodes.clone(),
            has_unsupported_nodes: self.has_unsupported_nodes,
        }
    }
}

/// Components and frames are eligible whether or not their name is a valid icon name;
/// anything else only raises the unsupported flag.
pub fn scan_selection(api: &dyn DocumentHost) -> SelectionSnapshot {
    let mut snapshot = SelectionSnapshot::default();

    for node in api.selection() {
        let Some(kind) = node.node_type.selectable_kind() else {
            snapshot.has_unsupported_nodes = true;
            continue;
        };
        let icon_name = extract_icon_name(&node.name);
        snapshot.nodes.push(SelectableNode {
            id: node.id,
            name: node.name,
            kind,
            icon_name,
        });
    }

    snapshot
}
