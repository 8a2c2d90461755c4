use crate::fetcher::IconFetcher;
use crate::host_api::DocumentHost;
use crate::protocol::{ParameterSet, PluginEvent, ProgressPhase, SelectableNode};
use crate::replacer::replace_node_content;
use crate::url_builder::build_icon_url;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed { count: usize },
    Failed { message: String },
}

#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub parameters: ParameterSet,
    pub nodes: Vec<SelectableNode>,
}

/// Failures that abort the whole batch. Lookup, fetch and replace failures of a single node
/// never get here.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("invalid icon base URL {base_url:?}: {source}")]
    InvalidBaseUrl {
        base_url: String,
        source: url::ParseError,
    },
    #[error("icon base URL {base_url:?} must use http or https")]
    UnsupportedScheme { base_url: String },
}

/// Runs one batch strictly in input order and reports through `emit`.
///
/// Emits `starting`, then `item-progress`/`item-done` per attempted node, and finally
/// exactly one of `update-complete` or `update-error`. An unusable base URL fails the run
/// before `starting`.
pub async fn run_update(
    host: &dyn DocumentHost,
    fetcher: &dyn IconFetcher,
    base_url: &str,
    request: &UpdateRequest,
    emit: &mut dyn FnMut(PluginEvent),
) -> RunState {
    info!(total = request.nodes.len(), "starting icon update");

    match process_batch(host, fetcher, base_url, request, emit).await {
        Ok(count) => {
            info!(count, total = request.nodes.len(), "icon update complete");
            emit(PluginEvent::UpdateComplete { count });
            RunState::Completed { count }
        }
        Err(e) => {
            error!("icon update failed: {e}");
            let message = format!("Update failed: {e}");
            emit(PluginEvent::UpdateError {
                error: message.clone(),
            });
            RunState::Failed { message }
        }
    }
}

async fn process_batch(
    host: &dyn DocumentHost,
    fetcher: &dyn IconFetcher,
    base_url: &str,
    request: &UpdateRequest,
    emit: &mut dyn FnMut(PluginEvent),
) -> Result<usize, UpdateError> {
    check_base_url(base_url)?;

    let total = request.nodes.len();
    let mut updated = 0;

    emit(progress(ProgressPhase::Starting, "Starting icon updates...".to_string(), 0, total));

    for (i, node) in request.nodes.iter().enumerate() {
        let Some(icon_name) = node.icon_name.as_deref() else {
            warn!("skipping {}: could not extract icon name", node.name);
            continue;
        };

        emit(progress(
            ProgressPhase::ItemProgress,
            format!("Updating {}...", node.name),
            i,
            total,
        ));

        let target = match host.node_by_id(&node.id) {
            Ok(Some(target)) => target,
            Ok(None) => {
                warn!("node {} not found", node.id);
                continue;
            }
            Err(e) => {
                error!("could not resolve node {}: {e}", node.id);
                continue;
            }
        };

        let url = build_icon_url(base_url, icon_name, &request.parameters);
        debug!(%url, "fetching icon");
        let svg = match fetcher.fetch_svg(&url).await {
            Ok(svg) => svg,
            Err(e) => {
                error!("could not fetch icon {icon_name}: {e}");
                continue;
            }
        };

        if let Err(e) = replace_node_content(host, &target.id, &svg) {
            error!("error updating {}: {e}", node.name);
            continue;
        }

        updated += 1;
        emit(progress(
            ProgressPhase::ItemDone,
            format!("Updated {}", node.name),
            i + 1,
            total,
        ));
    }

    Ok(updated)
}

fn check_base_url(base_url: &str) -> Result<(), UpdateError> {
    let parsed = Url::parse(base_url).map_err(|source| UpdateError::InvalidBaseUrl {
        base_url: base_url.to_string(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(UpdateError::UnsupportedScheme {
            base_url: base_url.to_string(),
        }),
    }
}

fn progress(phase: ProgressPhase, message: String, current: usize, total: usize) -> PluginEvent {
    PluginEvent::UpdateProgress {
        phase,
        message,
        current,
        total,
    }
}
