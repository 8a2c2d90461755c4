use clap::Parser;
use crossbeam_channel::bounded;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use symbols_plugin::{
    HostNodeType, HttpFetcher, JsonFileStore, MainLoop, MemoryDocument, NetworkThread,
    PluginConfig,
};
use tracing::info;

/// Runs the updater against an in-memory document and exposes the UI bridge.
#[derive(Parser, Debug)]
#[command(name = "mock_host")]
struct Args {
    /// Bridge address; port 0 picks a free port.
    #[arg(long)]
    addr: Option<String>,

    /// Write the bound bridge address to this file.
    #[arg(long, value_name = "PATH")]
    addr_file: Option<PathBuf>,

    #[arg(long)]
    base_url: Option<String>,

    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    #[arg(long)]
    run_for_ms: Option<u64>,
}

fn seed_document(doc: &MemoryDocument) -> Vec<String> {
    let page = doc.add_node(None, "Icons", HostNodeType::Frame);
    let home = doc.add_node(Some(page.as_str()), "home", HostNodeType::Component);
    doc.add_node(Some(home.as_str()), "old-vector", HostNodeType::Vector);
    let sync = doc.add_node(Some(page.as_str()), "Sync_Disabled", HostNodeType::Component);
    let frame = doc.add_node(Some(page.as_str()), "search", HostNodeType::Frame);
    let bad = doc.add_node(Some(page.as_str()), "My Icon!", HostNodeType::Component);
    let label = doc.add_node(Some(page.as_str()), "caption", HostNodeType::Text);
    vec![home, sync, frame, bad, label]
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    symbols_plugin::init_tracing();
    let args = Args::parse();

    let mut config = PluginConfig::from_env();
    if let Some(addr) = args.addr {
        config.ui_addr = addr;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(path) = args.settings {
        config.settings_path = path;
    }

    let (in_tx, in_rx) = bounded(symbols_plugin::INBOUND_CAP);
    let (out_tx, out_rx) = bounded(symbols_plugin::OUTBOUND_CAP);

    let net = NetworkThread::spawn_with_addr(&config.ui_addr, in_tx, out_rx)?;
    if let Some(path) = &args.addr_file {
        fs::write(path, net.listen_addr().to_string())?;
    }
    info!("mock_host listening on ws://{}", net.listen_addr());

    let doc = MemoryDocument::new();
    let selected = seed_document(&doc);
    let ids: Vec<&str> = selected.iter().map(String::as_str).collect();
    doc.set_selection(&ids);

    let mut main_loop = MainLoop::new(
        in_rx,
        out_tx,
        HttpFetcher::new(),
        JsonFileStore::new(&config.settings_path),
        config.base_url.clone(),
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        main_loop.start(&doc);

        let run_for = args.run_for_ms.map(Duration::from_millis);
        let start = Instant::now();
        loop {
            main_loop.tick(&doc).await;
            tokio::time::sleep(Duration::from_millis(33)).await;
            if run_for.is_some_and(|max| start.elapsed() >= max) {
                break;
            }
        }
    });

    net.shutdown();
    Ok(())
}
