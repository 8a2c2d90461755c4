use crate::host_api::{DocumentHost, HostError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplaceError {
    #[error("failed to import vector content")]
    Import,
    #[error("host error: {0}")]
    Host(#[from] HostError),
}

/// Replaces every child of `target` with the nodes imported from `svg`.
///
/// An imported container is always unwrapped, even when empty; a leaf import is attached as is.
///
/// The markup is imported before anything is removed, so a rejected document leaves the
/// target untouched. A host failure after the clear can leave the target empty or partially
/// populated.
pub fn replace_node_content(
    host: &dyn DocumentHost,
    target: &str,
    svg: &str,
) -> Result<(), ReplaceError> {
    let imported = host.import_vector(svg).ok_or(ReplaceError::Import)?;

    for child in host.children(target)? {
        host.remove_node(&child)?;
    }

    if host.is_container(&imported)? {
        for child in host.children(&imported)? {
            host.append_child(target, &child)?;
        }
        host.remove_node(&imported)?;
    } else {
        host.append_child(target, &imported)?;
    }

    Ok(())
}
