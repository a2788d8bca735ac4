//! Inspect a saved wall: `wallplanner [--watch] [STATE_DIR]`.
//!
//! Opens the file store (default `<data_dir>/wallplanner`), restores the
//! planner from it and prints the wall, its collections, the marquee and
//! the price summary. With `--watch` it stays up and reconciles the state
//! file whenever another process rewrites it.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wallplanner::store::{StoreEvent, StoreWatcher};
use wallplanner::{FileStore, LayoutPlanner, PlannerConfig, PlannerError};

const WATCH_POLL: Duration = Duration::from_secs(1);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wallplanner=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut watch = false;
    let mut dir = None;
    for arg in std::env::args_os().skip(1) {
        if arg == "--watch" {
            watch = true;
        } else {
            dir = Some(PathBuf::from(arg));
        }
    }

    let config = PlannerConfig::default_path()
        .map(|path| PlannerConfig::load_or_default(&path))
        .unwrap_or_default();

    let dir = match dir {
        Some(dir) => dir,
        None => FileStore::default_dir()?,
    };
    let store = FileStore::open(&dir)
        .with_context(|| format!("opening state directory {}", dir.display()))?;
    let watcher = if watch {
        Some(StoreWatcher::new(&store, &config.storage_key).context("watching state file")?)
    } else {
        None
    };

    let mut planner = LayoutPlanner::open(config, store);
    planner.run_deferred();
    print_wall(&planner)?;

    let Some(watcher) = watcher else {
        return Ok(());
    };
    // Our own re-save on open shows up as a change; skip it
    while watcher.poll().is_some() {}

    info!(dir = %dir.display(), "Watching for changes");
    loop {
        match watcher.wait(WATCH_POLL) {
            Some(StoreEvent::Created | StoreEvent::Modified) => {
                if planner.validate_saved_state() {
                    // Our rewrite triggers one more event
                    while watcher.poll().is_some() {}
                }
            }
            Some(StoreEvent::Deleted) => info!("State file removed"),
            Some(StoreEvent::Error(e)) => anyhow::bail!("watcher failed: {e}"),
            None => {}
        }
    }
}

fn print_wall(planner: &LayoutPlanner) -> Result<()> {
    let wall = planner.wall();
    println!("Wall: {:.1}\" × {:.1}\"", wall.width, wall.height);
    if let Some(image) = planner.background_image() {
        println!("Background: {} bytes", image.as_str().len());
    }
    println!(
        "Grid: {}\"  Spacing: {}\"",
        planner.grid_size(),
        planner.frame_spacing()
    );

    for collection in planner.collections() {
        println!(
            "Collection {} [{} {}]: {}",
            collection.id(),
            collection.frame_material().label(),
            collection.color(),
            collection.legend_label()
        );
        for frame in collection.frames() {
            let info = frame.info();
            println!(
                "  Frame {} at ({:.1}, {:.1}): print {}, mat {}, frame {}, total {}",
                frame.id(),
                frame.x(),
                frame.y(),
                info.print_size,
                info.matt_width,
                info.frame_width,
                info.total_size
            );
        }
    }

    match planner.marquee() {
        Some(marquee) => println!("Layout: {}", marquee.label()),
        None => println!("Layout: empty"),
    }

    match planner.quote() {
        Ok(summary) => println!("\n{summary}"),
        Err(PlannerError::NoCollections) => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
