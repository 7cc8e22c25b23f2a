//! Render sinks.
//!
//! The core never draws anything itself; a sink consumes the finished frame.
//! `ConsoleSink` is the built-in one, a text rendition of the original CRT
//! layout: header, aircraft table, status block.  A graphical backend would
//! implement the same trait and use `frame.blips` for the scope itself.
//!

use std::io::Write;

use chrono::Local;
use eyre::Result;
use tabled::settings::Style;
use tabled::Table;

use crate::{Config, RadarFrame};

/// Anything able to display one frame per tick.
///
pub trait RenderSink {
    fn render(&mut self, frame: &RadarFrame) -> Result<()>;
}

/// Text sink writing the table and status block to a writer.
///
pub struct ConsoleSink<W: Write> {
    /// Header fields
    area_name: String,
    latitude: f64,
    longitude: f64,
    radius_nm: f64,
    fetch_interval: u64,
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(cfg: &Config, out: W) -> Self {
        ConsoleSink {
            area_name: cfg.area_name.clone(),
            latitude: cfg.latitude,
            longitude: cfg.longitude,
            radius_nm: cfg.radius_nm,
            fetch_interval: cfg.fetch_interval,
            out,
        }
    }
}

impl<W: Write> RenderSink for ConsoleSink<W> {
    fn render(&mut self, frame: &RadarFrame) -> Result<()> {
        let now = Local::now().format("%H:%M:%S");
        writeln!(
            self.out,
            "{} {}°, {}° - {}",
            self.area_name, self.latitude, self.longitude, now
        )?;

        let table = Table::new(&frame.rows).with(Style::modern()).to_string();
        writeln!(self.out, "{}", table)?;

        let countdown = match frame.next_update_s {
            0 => "UPDATING".to_string(),
            s => format!("{:02}S", s),
        };
        writeln!(
            self.out,
            "STATUS: {}  CONTACTS: {} ({} MIL)  RANGE: {}NM  INTERVAL: {}S  NEXT UPDATE: {}",
            frame.status,
            frame.contacts,
            frame.military,
            self.radius_nm,
            self.fetch_interval,
            countdown,
        )?;
        Ok(())
    }
}
