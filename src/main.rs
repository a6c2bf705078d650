use anyhow::Context;
use ringhash::{Ring, RingConfig};
use tracing::info;

// ringhash ring.json key1 key2 ...

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args
        .next()
        .context("usage: ringhash <config.json> <key>...")?;
    let keys: Vec<String> = args.collect();

    let raw = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config {}", config_path))?;
    let config = RingConfig::from_json(&raw)
        .with_context(|| format!("Failed to load config {}", config_path))?;

    let ring = Ring::with_config(&config).context("Failed to build ring")?;
    let stats = ring.stats();
    info!(
        "Ring ready: {} nodes, {} slots, {} hash",
        stats.node_count, stats.slot_count, config.hash
    );

    for key in &keys {
        match ring.locate(key) {
            Some(node) => println!("{} -> {}", key, node),
            None => println!("{} -> (no node)", key),
        }
    }

    Ok(())
}
