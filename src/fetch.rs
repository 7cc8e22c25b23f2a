//! tar1090 feed access.
//!
//! `Tar1090` wraps a blocking HTTP client around the configured endpoint.
//! `spawn_poller` runs it on its own thread at the fetch interval and sends
//! each good batch over a channel; the render loop drains that channel
//! without ever blocking on a fetch in progress.
//!

use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use eyre::Result;
use reqwest::blocking::Client;
use strum::{Display, EnumString};
use tracing::{debug, trace, warn};

use crate::{parse_payload, RawAircraft, Status};

/// HTTP timeout for one fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Feed state shown in the status block.
///
#[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, PartialEq)]
pub enum FeedStatus {
    #[default]
    #[strum(serialize = "INITIALISING")]
    Initialising,
    #[strum(serialize = "SCANNING")]
    Scanning,
    #[strum(serialize = "ACTIVE")]
    Active,
    #[strum(serialize = "NO CONTACTS")]
    NoContacts,
}

/// The local tar1090 instance we poll.
///
#[derive(Clone, Debug)]
pub struct Tar1090 {
    /// Full `aircraft.json` URL from the config
    pub url: String,
    /// reqwest blocking client
    pub client: Client,
}

impl Tar1090 {
    pub fn new(url: &str) -> Result<Self> {
        trace!("tar1090::new");

        let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Tar1090 {
            url: url.to_owned(),
            client,
        })
    }

    /// One fetch, payload to batch.
    ///
    /// Transport and parse failures come back as errors, the caller decides
    /// what to do with the previous snapshot.
    ///
    #[tracing::instrument(skip(self))]
    pub fn fetch(&self) -> Result<Vec<RawAircraft>> {
        trace!("tar1090::fetch");

        let resp = self
            .client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| Status::SourceUnavailable(e.to_string()))?;
        let payload = resp.text()?;

        debug!("{} bytes read", payload.len());
        Ok(parse_payload(&payload)?)
    }
}

/// What the poller reports to the render loop.
///
#[derive(Debug)]
pub enum FeedEvent {
    /// A fetch is starting
    Scanning,
    /// A completed fetch
    Batch(Vec<RawAircraft>),
    /// A failed fetch; the consumer keeps its snapshot
    Failed,
}

/// Poll the feed forever, one cycle per interval, into `out`.
///
/// Each cycle announces itself with `Scanning`, then delivers either the
/// batch or `Failed`.  The thread ends when the receiving side hangs up.
///
pub fn spawn_poller(source: Tar1090, interval: Duration, out: Sender<FeedEvent>) -> JoinHandle<()> {
    thread::spawn(move || loop {
        if out.send(FeedEvent::Scanning).is_err() {
            break;
        }
        let event = match source.fetch() {
            Ok(batch) => FeedEvent::Batch(batch),
            Err(e) => {
                warn!("fetch failed, keeping last snapshot: {}", e);
                FeedEvent::Failed
            }
        };
        if out.send(event).is_err() {
            trace!("consumer gone, poller stopping");
            break;
        }
        thread::sleep(interval);
    })
}

/// Last good batch, replaced wholesale on every successful fetch.
///
/// Initialized empty at startup and read-only during frame building; a
/// fetch failure leaves it untouched so the display degrades to stale data
/// rather than an empty screen.
///
/// The feed status is not stored: ACTIVE vs NO CONTACTS depends on how many
/// aircraft survive the range filter, so it is derived per frame from the
/// in-range contact count.
///
#[derive(Debug, Default)]
pub struct Snapshot {
    batch: Vec<RawAircraft>,
    fetched: bool,
    scanning: bool,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fetch cycle just started.
    ///
    pub fn begin_scan(&mut self) {
        self.scanning = true;
    }

    /// Swap in a fresh batch.
    ///
    pub fn replace(&mut self, batch: Vec<RawAircraft>) {
        self.batch = batch;
        self.fetched = true;
        self.scanning = false;
    }

    /// A fetch cycle ended without a batch.
    ///
    pub fn settle(&mut self) {
        self.scanning = false;
    }

    pub fn batch(&self) -> &[RawAircraft] {
        &self.batch
    }

    /// Feed status for a frame showing `in_range` contacts.
    ///
    pub fn status(&self, in_range: usize) -> FeedStatus {
        if self.scanning {
            return FeedStatus::Scanning;
        }
        if !self.fetched {
            return FeedStatus::Initialising;
        }
        match in_range {
            0 => FeedStatus::NoContacts,
            _ => FeedStatus::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_fetch_good_payload() {
        let server = MockServer::start();
        let payload = json!({
            "now": 1700000000.0,
            "aircraft": [
                {"hex": "7c1234", "flight": "QFA123", "lat": -31.9, "lon": 115.8},
                {"hex": "7cf001", "lat": -32.0, "lon": 115.9},
            ],
        })
        .to_string();

        let m = server.mock(|when, then| {
            when.method(GET).path("/data/aircraft.json");
            then.status(200).body(&payload);
        });

        let source = Tar1090::new(&server.url("/data/aircraft.json")).unwrap();
        let batch = source.fetch().unwrap();

        m.assert();
        assert_eq!(2, batch.len());
        assert_eq!("7c1234", batch[0].hex);
    }

    #[test]
    fn test_fetch_server_error() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path("/data/aircraft.json");
            then.status(500);
        });

        let source = Tar1090::new(&server.url("/data/aircraft.json")).unwrap();

        assert!(source.fetch().is_err());
        m.assert();
    }

    #[test]
    fn test_fetch_garbage_payload() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/data/aircraft.json");
            then.status(200).body("not json");
        });

        let source = Tar1090::new(&server.url("/data/aircraft.json")).unwrap();

        assert!(source.fetch().is_err());
    }

    #[test]
    fn test_snapshot_lifecycle() {
        let mut snap = Snapshot::new();

        assert!(snap.batch().is_empty());
        assert_eq!(FeedStatus::Initialising, snap.status(0));

        snap.begin_scan();
        assert_eq!(FeedStatus::Scanning, snap.status(0));

        snap.replace(vec![RawAircraft {
            hex: "7c1234".into(),
            ..Default::default()
        }]);
        assert_eq!(1, snap.batch().len());
        assert_eq!(FeedStatus::Active, snap.status(1));

        snap.replace(vec![]);
        assert_eq!(FeedStatus::NoContacts, snap.status(0));
    }

    #[test]
    fn test_failed_fetch_keeps_snapshot() {
        let mut snap = Snapshot::new();
        snap.replace(vec![RawAircraft {
            hex: "7c1234".into(),
            ..Default::default()
        }]);

        snap.begin_scan();
        assert_eq!(FeedStatus::Scanning, snap.status(1));

        // cycle ends without a batch: stale data, not an empty screen
        snap.settle();
        assert_eq!(1, snap.batch().len());
        assert_eq!(FeedStatus::Active, snap.status(1));
    }

    #[test]
    fn test_all_contacts_out_of_range_is_no_contacts() {
        use crate::{Config, FrameBuilder};

        // a non-empty batch entirely beyond the radius
        let batch = vec![RawAircraft {
            hex: "7c9999".into(),
            lat: Some(50.),
            lon: Some(50.),
            ..Default::default()
        }];

        let cfg = Config::default();
        let frame = FrameBuilder::new(&cfg).build(&batch, 0, cfg.fetch_interval);

        let mut snap = Snapshot::new();
        snap.replace(batch);

        assert_eq!(0, frame.contacts);
        assert_eq!(FeedStatus::NoContacts, snap.status(frame.contacts));
    }
}
