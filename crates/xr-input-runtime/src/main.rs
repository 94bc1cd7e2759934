//! XR input runtime entry point.
//!
//! Loads configuration, builds one dispatch router per configured controller,
//! and drives them from a sample source until the source ends or Ctrl-C.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()          -- platform file, or --config <path>
//!  └─ build controllers      -- profile → ControllerState → DispatchRouter
//!  └─ start services
//!       ├─ event consumer     (Tokio task draining the ChannelEventSink)
//!       ├─ Ctrl-C handler     (Tokio task clearing the running flag)
//!       └─ frame_loop::run    (replay recording or idle source)
//! ```

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use xr_input_core::TrackedNode;
use xr_input_runtime::application::build_registry::build_controller;
use xr_input_runtime::application::dispatch::{DispatchRouter, InputEventSink};
use xr_input_runtime::application::manage_controllers::ControllerRegistry;
use xr_input_runtime::infrastructure::event_sink::channel::ChannelEventSink;
use xr_input_runtime::infrastructure::event_sink::tracing_sink::TracingEventSink;
use xr_input_runtime::infrastructure::event_sink::FanOutSink;
use xr_input_runtime::infrastructure::frame_loop;
use xr_input_runtime::infrastructure::playspace::SharedPlayspace;
use xr_input_runtime::infrastructure::sample_source::idle::IdleSampleSource;
use xr_input_runtime::infrastructure::sample_source::replay::ReplaySampleSource;
use xr_input_runtime::infrastructure::sample_source::SampleSource;
use xr_input_runtime::infrastructure::storage::config::{self, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_app_config()?;

    // Level comes from the config file unless `RUST_LOG` is set.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.runtime.log_level)),
        )
        .init();

    info!("XR input runtime starting");

    // ── Sinks and playspace ───────────────────────────────────────────────────
    let (channel_sink, mut events) = ChannelEventSink::channel();
    let sink: Arc<dyn InputEventSink> = Arc::new(FanOutSink::new(vec![
        Arc::new(TracingEventSink::new()) as Arc<dyn InputEventSink>,
        Arc::new(channel_sink) as Arc<dyn InputEventSink>,
    ]));
    let playspace = Arc::new(SharedPlayspace::new(
        config.playspace.as_ref().map(|p| p.transform()),
    ));

    // ── Controllers ───────────────────────────────────────────────────────────
    let settings = config.dispatch.settings();
    let mut controllers = ControllerRegistry::new();
    for entry in &config.controllers {
        let state = build_controller(&entry.profile())
            .with_context(|| format!("invalid controller profile '{}'", entry.name))?;
        let router = DispatchRouter::new(state, Arc::clone(&sink), settings)
            .with_playspace(Arc::clone(&playspace) as _);
        info!(
            controller = %entry.name,
            source = %entry.source_id,
            handedness = ?entry.handedness,
            node = ?router.state().node(),
            "controller ready"
        );
        controllers.add(router)?;
    }
    if controllers.is_empty() {
        warn!("no controllers configured; nothing will be dispatched");
    }
    drop(sink);

    // ── Event consumer ────────────────────────────────────────────────────────
    let consumer = tokio::spawn(async move {
        let mut count: u64 = 0;
        while events.recv().await.is_some() {
            count += 1;
        }
        count
    });

    // ── Ctrl-C / SIGTERM handler ──────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            running_clone.store(false, Ordering::Relaxed);
        }
    });

    // ── Frame loop ────────────────────────────────────────────────────────────
    let mut source = sample_source(&config)?;
    info!("XR input runtime ready.  Press Ctrl-C to exit.");
    let result = frame_loop::run(
        source.as_mut(),
        &mut controllers,
        config.runtime.frame_rate_hz,
        running,
    )
    .await;

    for summary in controllers.summaries() {
        info!(
            source = %summary.source_id,
            handedness = ?summary.handedness,
            tracking = ?summary.tracking,
            "final controller state"
        );
    }

    // Dropping the routers drops the last senders, which ends the consumer.
    drop(controllers);
    let delivered = consumer.await.unwrap_or_default();

    match result {
        Ok(stats) => {
            info!(
                frames = stats.frames,
                updates = stats.updates,
                events = delivered,
                "XR input runtime stopped"
            );
            Ok(())
        }
        Err(e) => {
            error!("frame loop aborted: {e}");
            Err(e.into())
        }
    }
}

/// Loads configuration from `--config <path>` or the platform config file.
fn load_app_config() -> anyhow::Result<AppConfig> {
    match config_path_from_args() {
        Some(path) => config::load_config_from(&path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => config::load_config().context("failed to load config"),
    }
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

/// Replays the configured recording, or idles on the configured hands.
fn sample_source(config: &AppConfig) -> anyhow::Result<Box<dyn SampleSource>> {
    if let Some(replay) = &config.replay {
        let source = ReplaySampleSource::open(&replay.path, replay.looping)?;
        return Ok(Box::new(source));
    }

    let mut nodes: Vec<TrackedNode> = Vec::new();
    for controller in &config.controllers {
        let node = controller
            .node
            .unwrap_or_else(|| controller.handedness.default_node());
        if !nodes.contains(&node) {
            nodes.push(node);
        }
    }
    info!(?nodes, "no recording configured; running idle");
    Ok(Box::new(IdleSampleSource::new(nodes)))
}
