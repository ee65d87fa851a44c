//! CSV sink - append-only persistence for the three artifacts spec.md §6
//! names: `tob_snapshots.csv`, `opportunities.csv`, `tri_opportunities.csv`.
//!
//! Hand-rolled CSV writing via `std::fs::OpenOptions` + `write!`, matching
//! the manual-write style of the tax CSV logger in
//! `strongca22-cpu-dexarb/.../tax/csv_logger.rs` rather than pulling in a
//! `csv` crate (none of the example repos use one). `ts_iso` formatting
//! follows the same repo's use of `chrono` for calendar-aware timestamps.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tracing::warn;

use super::{Sink, TobSink};
use crate::core::{BestBook, Opportunity, TriOpportunity};

const TOB_HEADER: &str = "ts_iso,ts,exchange,pair,bid,bid_sz,ask,ask_sz";
const DIRECT_HEADER: &str = "ts_iso,ts,kind,pair,buy_ex,sell_ex,buy_price,sell_price,qty,raw_bps,net_bps,profit_aud,confidence,latency_ms";
const TRI_HEADER: &str = "ts_iso,ts,kind,exchange,path,start_aud,end_aud,net_bps,profit_aud,confidence,latency_ms,legs_json";

/// Three append-only CSV files, one per artifact spec.md §6 names.
pub struct CsvSink {
    tob: Mutex<File>,
    direct: Mutex<File>,
    tri: Mutex<File>,
}

impl CsvSink {
    pub fn open(
        tob_path: impl AsRef<Path>,
        direct_path: impl AsRef<Path>,
        tri_path: impl AsRef<Path>,
    ) -> std::io::Result<Self> {
        let tob = open_with_header(tob_path.as_ref(), TOB_HEADER)?;
        let direct = open_with_header(direct_path.as_ref(), DIRECT_HEADER)?;
        let tri = open_with_header(tri_path.as_ref(), TRI_HEADER)?;
        Ok(Self {
            tob: Mutex::new(tob),
            direct: Mutex::new(direct),
            tri: Mutex::new(tri),
        })
    }

    /// Open the three files by their stable spec.md §6 names under `dir`.
    pub fn open_dir(dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        Self::open(
            dir.join("tob_snapshots.csv"),
            dir.join("opportunities.csv"),
            dir.join("tri_opportunities.csv"),
        )
    }
}

fn open_with_header(path: &Path, header: &str) -> std::io::Result<File> {
    let needs_header = !path.exists();
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if needs_header {
        writeln!(file, "{header}")?;
    }
    Ok(file)
}

fn ts_iso(ts: f64) -> String {
    DateTime::<Utc>::from_timestamp(ts.floor() as i64, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_default()
}

fn write_row(file: &Mutex<File>, line: String, what: &str) {
    let mut f = match file.lock() {
        Ok(f) => f,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Err(e) = writeln!(f, "{line}") {
        warn!(error = %e, what, "csv sink: failed to write row");
    }
}

impl TobSink for CsvSink {
    fn record_tob(&self, book: &BestBook) {
        let line = format!(
            "{},{:.6},{},{},{},{},{},{}",
            ts_iso(book.quote.ts),
            book.quote.ts,
            book.exchange_id,
            book.pair,
            book.quote.bid,
            book.quote.bid_size,
            book.quote.ask,
            book.quote.ask_size,
        );
        write_row(&self.tob, line, "tob_snapshot");
    }
}

impl Sink for CsvSink {
    fn publish_direct(&self, opp: &Opportunity) {
        let line = format!(
            "{},{:.6},cex,{},{},{},{},{},{},{},{},{},{:.3},{}",
            ts_iso(opp.ts),
            opp.ts,
            opp.pair,
            opp.buy_ex,
            opp.sell_ex,
            opp.buy_price,
            opp.sell_price,
            opp.qty,
            opp.raw_bps,
            opp.net_bps,
            opp.profit_quote,
            opp.confidence,
            opp.latency_ms,
        );
        write_row(&self.direct, line, "opportunity");
    }

    fn publish_tri(&self, opp: &TriOpportunity) {
        let legs_json = serde_json::to_string(&opp.legs).unwrap_or_else(|_| "[]".to_string());
        let line = format!(
            "{},{:.6},tri,{},{},{},{},{},{},{:.3},{},{}",
            ts_iso(opp.ts),
            opp.ts,
            opp.exchange,
            opp.path.join("->"),
            opp.start_aud,
            opp.end_aud,
            opp.net_bps,
            opp.profit_aud,
            opp.confidence,
            opp.latency_ms,
            legs_json,
        );
        write_row(&self.tri, line, "tri_opportunity");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Quote;
    use rust_decimal::Decimal;
    use std::fs;

    fn dirs() -> std::path::PathBuf {
        let base = std::env::temp_dir().join(format!(
            "aud_arb_csv_sink_test_{}_{}",
            std::process::id(),
            line!()
        ));
        fs::create_dir_all(&base).unwrap();
        base
    }

    #[test]
    fn writes_header_once_and_appends_rows() {
        let dir = dirs();
        let sink = CsvSink::open_dir(&dir).unwrap();

        let opp = Opportunity {
            ts: 1.0,
            pair: "BTC/AUD".into(),
            buy_ex: "A".into(),
            sell_ex: "B".into(),
            buy_price: Decimal::from(100_000),
            sell_price: Decimal::from(100_300),
            qty: Decimal::new(1, 1),
            raw_bps: Decimal::from(30),
            net_bps: Decimal::from(10),
            profit_quote: Decimal::new(3000, 2),
            confidence: 0.9,
            latency_ms: 0,
        };
        sink.publish_direct(&opp);
        sink.publish_direct(&opp);
        drop(sink);

        let path = dir.join("opportunities.csv");
        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], DIRECT_HEADER);

        // Reopening must not duplicate the header.
        let sink2 = CsvSink::open_dir(&dir).unwrap();
        sink2.publish_direct(&opp);
        drop(sink2);
        let contents2 = fs::read_to_string(&path).unwrap();
        assert_eq!(contents2.lines().filter(|l| *l == DIRECT_HEADER).count(), 1);
    }

    #[test]
    fn tob_snapshot_row_matches_header_shape() {
        let dir = dirs();
        let sink = CsvSink::open_dir(&dir).unwrap();
        sink.record_tob(&BestBook {
            exchange_id: "A".into(),
            pair: "BTC/AUD".into(),
            quote: Quote {
                ts: 100.0,
                bid: Decimal::from(100_000),
                bid_size: Decimal::ONE,
                ask: Decimal::from(100_100),
                ask_size: Decimal::ONE,
            },
        });
        drop(sink);

        let contents = fs::read_to_string(dir.join("tob_snapshots.csv")).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], TOB_HEADER);
        assert_eq!(lines[1].split(',').count(), TOB_HEADER.split(',').count());
    }

    #[test]
    fn tri_row_carries_legs_json() {
        let dir = dirs();
        let sink = CsvSink::open_dir(&dir).unwrap();
        let leg = crate::core::Leg {
            pair: "BTC/AUD".into(),
            side: crate::core::Side::Buy,
            price: Decimal::from(100_000),
            max_in: Decimal::from(100_000),
            age_s: 0.001,
        };
        let opp = TriOpportunity {
            ts: 1.0,
            exchange: "E".into(),
            path: ["AUD".into(), "BTC".into(), "USDT".into(), "AUD".into()],
            start_aud: Decimal::from(1_000),
            end_aud: Decimal::from(1_050),
            net_bps: Decimal::from(500),
            profit_aud: Decimal::from(50),
            confidence: 0.9,
            latency_ms: 1,
            legs: [leg.clone(), leg.clone(), leg],
        };
        sink.publish_tri(&opp);
        drop(sink);

        let contents = fs::read_to_string(dir.join("tri_opportunities.csv")).unwrap();
        let row = contents.lines().nth(1).unwrap();
        assert!(row.contains("AUD->BTC->USDT->AUD"));
        assert!(row.contains(r#""pair":"BTC/AUD""#));
    }
}
