//! Location watch source
//!
//! Reads fixes from a line oriented source and delivers them into the
//! tracker channel, the way a platform location watcher would: at most
//! one fix per `time_interval`, and only once the device moved at least
//! `distance_interval_meters` from the last reported fix.
//!
//! Accepted line formats are `lat,lon` and
//! `{"latitude": lat, "longitude": lon}`. Blank lines and lines starting
//! with `#` are skipped.

use crate::sampler::haversine;
use crate::types::PositionFix;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Default delay between two reported fixes, in milliseconds.
pub const DEFAULT_TIME_INTERVAL_MS: u64 = 10_000;

/// Default minimum distance between two reported fixes, in meters.
pub const DEFAULT_DISTANCE_INTERVAL_METERS: f64 = 5.0;

/// Options of a location watch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchOptions {
    /// Minimum delay between two reported fixes. Zero disables pacing.
    pub time_interval: Duration,

    /// Minimum displacement between two reported fixes.
    pub distance_interval_meters: f64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        WatchOptions {
            time_interval: Duration::from_millis(DEFAULT_TIME_INTERVAL_MS),
            distance_interval_meters: DEFAULT_DISTANCE_INTERVAL_METERS,
        }
    }
}

impl From<&crate::config::Config> for WatchOptions {
    fn from(config: &crate::config::Config) -> Self {
        WatchOptions {
            time_interval: Duration::from_millis(config.time_interval_ms),
            distance_interval_meters: config.distance_interval_meters,
        }
    }
}

/// Errors that end a location watch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SourceError {
    /// The source could not be opened.
    Open,

    /// The source could not be read.
    Read,
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            SourceError::Open => write!(f, "Could not open fix source."),
            SourceError::Read => write!(f, "Could not read fix source."),
        }
    }
}

impl std::error::Error for SourceError {}

/// Parses a single line into a fix.
///
/// Returns `None` for blank lines, comments and unparsable input.
/// Non-finite coordinates parse fine, rejecting them is up to the
/// sampler.
pub fn parse_fix(line: &str) -> Option<PositionFix> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    if line.starts_with('{') {
        return serde_json::from_str(line).ok();
    }

    let (latitude, longitude) = line.split_once(',')?;
    let latitude: f64 = latitude.trim().parse().ok()?;
    let longitude: f64 = longitude.trim().parse().ok()?;

    Some(PositionFix::new(latitude, longitude))
}

/// Watches `reader` and sends fixes into `tx` until the reader is
/// exhausted or the receiving side is closed.
///
/// Returns the number of fixes delivered.
pub async fn watch_position<R>(
    mut reader: R,
    options: WatchOptions,
    tx: mpsc::Sender<PositionFix>,
) -> Result<u64, SourceError>
where
    R: AsyncBufRead + Unpin,
{
    let mut ticker = if options.time_interval.is_zero() {
        None
    } else {
        let mut ticker = tokio::time::interval(options.time_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Some(ticker)
    };

    let mut buf: Vec<u8> = vec![];
    let mut last_reported: Option<PositionFix> = None;
    let mut delivered: u64 = 0;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => (),
            Err(e) => {
                tasks_error!("(watch_position) could not read line: {}", e);
                return Err(SourceError::Read);
            }
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim_end_matches(['\n', '\r']),
            Err(e) => {
                tasks_warn!("(watch_position) skipping line that is not UTF-8: {}", e);
                continue;
            }
        };

        let Some(fix) = parse_fix(line) else {
            if !line.trim().is_empty() && !line.trim().starts_with('#') {
                tasks_warn!("(watch_position) skipping unparsable line [{}].", line);
            }
            continue;
        };

        let finite = fix.validate().is_ok();
        if finite {
            if let Some(last) = &last_reported {
                let distance = haversine::distance(last, &fix);
                if distance < options.distance_interval_meters {
                    tasks_debug!(
                        "(watch_position) {} moved {:.3}m only, not reported.",
                        fix,
                        distance
                    );
                    continue;
                }
            }
        }

        if let Some(ticker) = ticker.as_mut() {
            ticker.tick().await;
        }

        if tx.send(fix).await.is_err() {
            tasks_info!("(watch_position) receiver closed, stopping watch.");
            break;
        }

        delivered += 1;
        if finite {
            last_reported = Some(fix);
        }
    }

    tasks_info!("(watch_position) delivered {} fixes.", delivered);
    Ok(delivered)
}

/// Watches the file at `source`, or stdin when `source` is empty.
pub async fn watch_source(
    source: &str,
    options: WatchOptions,
    tx: mpsc::Sender<PositionFix>,
) -> Result<u64, SourceError> {
    if source.is_empty() {
        tasks_info!("(watch_source) watching stdin.");
        return watch_position(BufReader::new(tokio::io::stdin()), options, tx).await;
    }

    let file = tokio::fs::File::open(source).await.map_err(|e| {
        tasks_error!("(watch_source) could not open [{}]: {}", source, e);
        SourceError::Open
    })?;

    tasks_info!("(watch_source) watching [{}].", source);
    watch_position(BufReader::new(file), options, tx).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unpaced(distance_interval_meters: f64) -> WatchOptions {
        WatchOptions {
            time_interval: Duration::ZERO,
            distance_interval_meters,
        }
    }

    async fn collect(input: &str, options: WatchOptions) -> (u64, Vec<PositionFix>) {
        let (tx, mut rx) = mpsc::channel(64);
        let delivered = watch_position(input.as_bytes(), options, tx).await.unwrap();

        let mut fixes = vec![];
        while let Some(fix) = rx.recv().await {
            fixes.push(fix);
        }
        (delivered, fixes)
    }

    #[test]
    fn test_parse_fix() {
        assert_eq!(
            parse_fix("48.8566,2.3522"),
            Some(PositionFix::new(48.8566, 2.3522))
        );
        assert_eq!(
            parse_fix("  -33.8688 , 151.2093 "),
            Some(PositionFix::new(-33.8688, 151.2093))
        );
        assert_eq!(
            parse_fix(r#"{"latitude": 1.5, "longitude": -2.5}"#),
            Some(PositionFix::new(1.5, -2.5))
        );
        assert!(parse_fix("NaN,2.0").unwrap().validate().is_err());

        assert_eq!(parse_fix(""), None);
        assert_eq!(parse_fix("# comment"), None);
        assert_eq!(parse_fix("48.8566"), None);
        assert_eq!(parse_fix("north,east"), None);
        assert_eq!(parse_fix(r#"{"latitude": 1.5}"#), None);
    }

    #[test]
    fn test_watch_options_default() {
        let options = WatchOptions::default();
        assert_eq!(options.time_interval, Duration::from_secs(10));
        assert_eq!(options.distance_interval_meters, 5.0);
    }

    #[tokio::test]
    async fn test_watch_position_delivers_in_order() {
        crate::get_log_handle().await;
        ut_info!("(test_watch_position_delivers_in_order) Start.");

        let input = "# home\n48.8566,2.3522\n\ngarbage\n48.8567,2.3522\n48.8568,2.3522\n";
        let (delivered, fixes) = collect(input, unpaced(0.0)).await;

        assert_eq!(delivered, 3);
        assert_eq!(
            fixes,
            vec![
                PositionFix::new(48.8566, 2.3522),
                PositionFix::new(48.8567, 2.3522),
                PositionFix::new(48.8568, 2.3522),
            ]
        );

        ut_info!("(test_watch_position_delivers_in_order) Success.");
    }

    #[tokio::test]
    async fn test_watch_position_distance_interval() {
        // second fix is ~7.3m away, third ~1.1m from the second
        let input = "48.8566,2.3522\n48.8566,2.3523\n48.85661,2.3523\n48.8567,2.3523\n";
        let (delivered, fixes) = collect(input, unpaced(5.0)).await;

        assert_eq!(delivered, 3);
        assert_eq!(
            fixes,
            vec![
                PositionFix::new(48.8566, 2.3522),
                PositionFix::new(48.8566, 2.3523),
                PositionFix::new(48.8567, 2.3523),
            ]
        );
    }

    #[tokio::test]
    async fn test_watch_position_forwards_non_finite() {
        let input = "1.0,1.0\ninf,1.0\n1.0,1.0\n";
        let (delivered, fixes) = collect(input, unpaced(5.0)).await;

        assert_eq!(delivered, 2);
        assert_eq!(fixes[0], PositionFix::new(1.0, 1.0));
        assert!(fixes[1].validate().is_err());
    }

    #[tokio::test]
    async fn test_watch_position_paced() {
        let options = WatchOptions {
            time_interval: Duration::from_millis(20),
            distance_interval_meters: 0.0,
        };
        let start = tokio::time::Instant::now();
        let (delivered, _) = collect("0.0,0.0\n0.0,0.1\n0.0,0.2\n", options).await;

        assert_eq!(delivered, 3);
        // the first tick completes immediately
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_watch_position_skips_invalid_utf8() {
        crate::get_log_handle().await;
        ut_info!("(test_watch_position_skips_invalid_utf8) Start.");

        let input: &[u8] = b"1.0,1.0\n\xff\xfe\n2.0,2.0\n";
        let (tx, mut rx) = mpsc::channel(64);
        let delivered = watch_position(input, unpaced(0.0), tx).await.unwrap();

        let mut fixes = vec![];
        while let Some(fix) = rx.recv().await {
            fixes.push(fix);
        }
        assert_eq!(delivered, 2);
        assert_eq!(
            fixes,
            vec![PositionFix::new(1.0, 1.0), PositionFix::new(2.0, 2.0)]
        );

        ut_info!("(test_watch_position_skips_invalid_utf8) Success.");
    }

    #[tokio::test]
    async fn test_watch_position_crlf_and_missing_newline() {
        let input = "1.0,1.0\r\n2.0,2.0";
        let (delivered, fixes) = collect(input, unpaced(0.0)).await;

        assert_eq!(delivered, 2);
        assert_eq!(fixes[1], PositionFix::new(2.0, 2.0));
    }

    #[tokio::test]
    async fn test_watch_position_receiver_closed() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let delivered = watch_position("1.0,1.0\n2.0,2.0\n".as_bytes(), unpaced(0.0), tx)
            .await
            .unwrap();
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_watch_source_missing_file() {
        let (tx, _rx) = mpsc::channel(1);
        let result = watch_source("/nonexistent/svc-tracker/fixes.csv", unpaced(0.0), tx).await;
        assert_eq!(result, Err(SourceError::Open));
    }
}
