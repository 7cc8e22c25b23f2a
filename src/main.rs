//! `adsb-scope` main driver.
//!
//! Two independent clocks: a poller thread fetches the feed every
//! `fetch_interval` seconds and sends batches over a channel; the render
//! loop ticks at the configured fps, drains the channel without blocking
//! and rebuilds a frame from the current snapshot.  A slow or failing fetch
//! just means the same snapshot is rendered again.
//!

use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use clap::{crate_authors, crate_description, crate_version, Parser};
use eyre::Result;
use tracing::{info, trace};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{filter::EnvFilter, fmt};

use adsb_scope::{
    spawn_poller, Config, ConsoleSink, FeedEvent, FeedStatus, FrameBuilder, Opts, RenderSink,
    Snapshot, Tar1090,
};

/// Binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging.
    //
    let fmt = fmt::layer()
        .with_target(false)
        .with_writer(io::stderr)
        .compact();

    // Load filters from environment
    //
    let filter = EnvFilter::from_default_env();

    // Combine filter & specific format
    //
    tracing_subscriber::registry().with(filter).with(fmt).init();

    let cfg = Config::load(opts.config.clone())?;

    banner();
    info!(
        "scope on {} ({}, {}), {} NM",
        cfg.area_name, cfg.latitude, cfg.longitude, cfg.radius_nm
    );

    let source = Tar1090::new(&cfg.url)?;

    if opts.once {
        return run_once(&cfg, &source);
    }
    run_loop(&cfg, source)
}

/// Single fetch + single frame, for scripting and smoke tests.
///
fn run_once(cfg: &Config, source: &Tar1090) -> Result<()> {
    trace!("once");

    let batch = source.fetch()?;
    let mut frame = FrameBuilder::new(cfg).build(&batch, 0, cfg.fetch_interval);
    frame.status = match frame.contacts {
        0 => FeedStatus::NoContacts,
        _ => FeedStatus::Active,
    };

    let mut sink = ConsoleSink::new(cfg, io::stdout());
    sink.render(&frame)
}

/// The two-clock loop described in the module doc.
///
fn run_loop(cfg: &Config, source: Tar1090) -> Result<()> {
    trace!("loop");

    let (tx, rx) = mpsc::channel();
    let poller = spawn_poller(source, Duration::from_secs(cfg.fetch_interval), tx);

    let builder = FrameBuilder::new(cfg);
    let mut sink = ConsoleSink::new(cfg, io::stdout());
    let mut snapshot = Snapshot::new();

    let start = Instant::now();
    let mut last_fetch = Instant::now();

    loop {
        let tick = Instant::now();

        // Drain the channel, keep only the newest state.  Never blocks.
        //
        while let Ok(event) = rx.try_recv() {
            match event {
                FeedEvent::Scanning => snapshot.begin_scan(),
                FeedEvent::Batch(batch) => {
                    snapshot.replace(batch);
                    last_fetch = Instant::now();
                }
                FeedEvent::Failed => snapshot.settle(),
            }
        }

        let elapsed_ms = start.elapsed().as_millis() as u64;
        let next_update_s = cfg
            .fetch_interval
            .saturating_sub(last_fetch.elapsed().as_secs());

        let mut frame = builder.build(snapshot.batch(), elapsed_ms, next_update_s);
        frame.status = snapshot.status(frame.contacts);
        sink.render(&frame)?;

        // Pace to the configured fps
        //
        let spent = tick.elapsed();
        if let Some(rest) = cfg.frame_interval().checked_sub(spent) {
            std::thread::sleep(rest);
        }

        if poller.is_finished() {
            trace!("poller gone, stopping");
            break;
        }
    }
    Ok(())
}

/// Display banner
///
fn banner() {
    eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    );
}
