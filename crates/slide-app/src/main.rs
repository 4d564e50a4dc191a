//! Slider simulator entry point
//!
//! `slide-sim [config.json] [script.json]` runs one slider on the tokio host,
//! plays the script against it and prints every notification as a JSON line.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use slide_core::{
    subscriber_from_fn, ItemId, Measure, SharedMeasure, SliderConfig, SliderEvent, SliderId,
};
use slide_host::{HostError, SliderHost};
use tokio::time::{sleep_until, Instant};
use tracing::{info, warn};
use uuid::Uuid;

mod script;

use script::{Action, Script};

#[derive(Parser, Debug)]
#[command(name = "slide-sim", about = "Drive a slider from a timed script")]
struct Cli {
    /// Slider configuration (JSON); defaults to the script's own
    config: Option<PathBuf>,
    /// Interaction script (JSON); runs the built-in demo when omitted
    script: Option<PathBuf>,
}

/// One line of simulator output
#[derive(Serialize)]
struct EventLine<'a> {
    name: String,
    #[serde(flatten)]
    event: &'a SliderEvent,
}

fn print_event(event: &SliderEvent) {
    let line = EventLine {
        name: event.qualified_name(),
        event,
    };
    match serde_json::to_string(&line) {
        Ok(json) => println!("{json}"),
        Err(e) => warn!("Failed to serialize {}: {}", event.kind, e),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Notifications own stdout
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let script = match &cli.script {
        Some(path) => Script::load(path)?,
        None => {
            info!("No script given, running the built-in demo");
            Script::demo()
        }
    };
    let config = match &cli.config {
        Some(path) => SliderConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => script.config.clone().unwrap_or_default(),
    };

    run(config, script).await
}

async fn run(config: SliderConfig, script: Script) -> Result<()> {
    let id = SliderId::new(format!("slide-r__{}", Uuid::new_v4()));
    let items = (1..=script.item_count)
        .map(|i| ItemId::new(format!("slide-{i}")))
        .collect();

    let mut layout = script.layout;
    let measure = SharedMeasure::new(layout.measure().visible_count());

    let (host, handle) = SliderHost::new(id.clone(), items, config, Box::new(measure.clone()))
        .context("Failed to create slider")?;
    host.subscribe(subscriber_from_fn(print_event));

    info!("Starting slider simulation {} with {} items", id, script.item_count);
    let host_task = tokio::spawn(host.run());
    let started = Instant::now();

    for step in &script.steps {
        sleep_until(started + Duration::from_millis(step.at_ms)).await;

        let sent = match &step.action {
            Action::SetViewport { set_viewport } => {
                layout.container_width = set_viewport.container_width;
                measure.set(layout.measure().visible_count());
                handle.resize().await
            }
            Action::Input(input) => handle.send(input.clone()).await,
        };
        if let Err(HostError::Closed) = sent {
            info!("Slider {} shut down at {} ms", id, step.at_ms);
            break;
        }
    }

    sleep_until(started + Duration::from_millis(script.end_ms())).await;
    // The script may have destroyed the slider already
    let _ = handle.destroy().await;

    let state = host_task.await.context("Slider host task failed")?;
    info!(
        "Simulation finished on page {} of {} ({} visible)",
        state.current_page, state.total_page, state.visible_count
    );
    Ok(())
}
