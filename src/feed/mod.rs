//! GTFS feed loading.
//!
//! Reads the four delimited-text tables (stops, routes, trips,
//! stop_times) from a directory into plain row records. Parsing is
//! tolerant per row: a row missing a required column or carrying a
//! malformed value is dropped with a warning and counted, and the load
//! as a whole succeeds as long as every mandatory table produced at
//! least one record. The routes table is optional; without it, route
//! names degrade to route ids downstream.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::domain::ServiceTime;

/// Stops table file name.
pub const STOPS_FILE: &str = "stops.csv";
/// Routes table file name (optional).
pub const ROUTES_FILE: &str = "routes.csv";
/// Trips table file name.
pub const TRIPS_FILE: &str = "trips.csv";
/// Stop-times table file name.
pub const STOP_TIMES_FILE: &str = "stop_times.csv";

/// Error that disables the engine: a mandatory table could not be read.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// A mandatory file could not be opened
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A mandatory table parsed to zero usable records
    #[error("{table} contained no usable records")]
    EmptyTable { table: &'static str },
}

/// Kept/dropped row counts for one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableSummary {
    pub kept: usize,
    pub dropped: usize,
}

/// Kept/dropped row counts for the whole load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub stops: TableSummary,
    pub routes: TableSummary,
    pub trips: TableSummary,
    pub stop_times: TableSummary,
}

/// A stop row after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct StopRecord {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// A route row after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub id: String,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub route_type: Option<String>,
}

/// A trip row after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub id: String,
    pub route_id: String,
    pub headsign: Option<String>,
}

/// A stop-time row after validation; times already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct StopTimeRecord {
    pub trip_id: String,
    pub stop_id: String,
    pub sequence: u32,
    pub arrival: ServiceTime,
    pub departure: ServiceTime,
}

/// The parsed feed, ready for index building.
#[derive(Debug, Default)]
pub struct Feed {
    pub stops: Vec<StopRecord>,
    pub routes: Vec<RouteRecord>,
    pub trips: Vec<TripRecord>,
    pub stop_times: Vec<StopTimeRecord>,
    pub summary: LoadSummary,
}

impl Feed {
    /// Load the four tables from `dir`.
    ///
    /// # Errors
    ///
    /// Returns `Err` when a mandatory file (stops, trips, stop_times)
    /// cannot be opened or yields zero usable records. A missing routes
    /// file is only a warning.
    pub fn load(dir: &Path) -> Result<Feed, FeedError> {
        let (stops, stops_summary) = parse_stops(open_required(dir, STOPS_FILE)?);
        let (trips, trips_summary) = parse_trips(open_required(dir, TRIPS_FILE)?);
        let (stop_times, stop_times_summary) =
            parse_stop_times(open_required(dir, STOP_TIMES_FILE)?);

        let (routes, routes_summary) = match File::open(dir.join(ROUTES_FILE)) {
            Ok(file) => parse_routes(file),
            Err(err) => {
                warn!(%err, "no routes table; route names will fall back to route ids");
                (Vec::new(), TableSummary::default())
            }
        };

        for (table, kept) in [
            (STOPS_FILE, stops.len()),
            (TRIPS_FILE, trips.len()),
            (STOP_TIMES_FILE, stop_times.len()),
        ] {
            if kept == 0 {
                return Err(FeedError::EmptyTable { table });
            }
        }

        let summary = LoadSummary {
            stops: stops_summary,
            routes: routes_summary,
            trips: trips_summary,
            stop_times: stop_times_summary,
        };
        info!(
            stops = stops.len(),
            routes = routes.len(),
            trips = trips.len(),
            stop_times = stop_times.len(),
            dropped = summary.total_dropped(),
            "feed loaded"
        );

        Ok(Feed {
            stops,
            routes,
            trips,
            stop_times,
            summary,
        })
    }
}

impl LoadSummary {
    /// Rows dropped across all tables.
    pub fn total_dropped(&self) -> usize {
        self.stops.dropped + self.routes.dropped + self.trips.dropped + self.stop_times.dropped
    }
}

fn open_required(dir: &Path, name: &str) -> Result<File, FeedError> {
    let path = dir.join(name);
    File::open(&path).map_err(|source| FeedError::Open { path, source })
}

// Raw rows as they deserialize straight out of the CSV. Columns are
// addressed by header name; absent optional columns become `None`,
// absent required columns fail the row.

#[derive(Debug, Deserialize)]
struct RawStop {
    stop_id: String,
    stop_name: Option<String>,
    stop_lat: f64,
    stop_lon: f64,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    route_id: String,
    route_short_name: Option<String>,
    route_long_name: Option<String>,
    route_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTrip {
    trip_id: String,
    route_id: String,
    trip_headsign: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawStopTime {
    trip_id: String,
    stop_id: String,
    stop_sequence: u32,
    arrival_time: String,
    departure_time: String,
}

/// Deserialize every row of `rdr`, dropping and counting rows that fail.
fn read_rows<T: DeserializeOwned, R: Read>(table: &'static str, rdr: R) -> (Vec<T>, usize) {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let mut rows = Vec::new();
    let mut dropped = 0;
    for row in reader.deserialize() {
        match row {
            Ok(value) => rows.push(value),
            Err(err) => {
                dropped += 1;
                warn!(table, %err, "dropping unparseable row");
            }
        }
    }
    (rows, dropped)
}

/// Empty cells deserialize as `Some("")`; normalize them away.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn parse_stops<R: Read>(rdr: R) -> (Vec<StopRecord>, TableSummary) {
    let (rows, mut dropped) = read_rows::<RawStop, _>("stops", rdr);
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        if row.stop_id.is_empty() {
            dropped += 1;
            warn!(table = "stops", "dropping row with empty stop_id");
            continue;
        }
        let name = non_empty(row.stop_name).unwrap_or_else(|| row.stop_id.clone());
        records.push(StopRecord {
            id: row.stop_id,
            name,
            lat: row.stop_lat,
            lon: row.stop_lon,
        });
    }
    summarize(records, dropped)
}

fn parse_routes<R: Read>(rdr: R) -> (Vec<RouteRecord>, TableSummary) {
    let (rows, mut dropped) = read_rows::<RawRoute, _>("routes", rdr);
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        if row.route_id.is_empty() {
            dropped += 1;
            warn!(table = "routes", "dropping row with empty route_id");
            continue;
        }
        records.push(RouteRecord {
            id: row.route_id,
            short_name: non_empty(row.route_short_name),
            long_name: non_empty(row.route_long_name),
            route_type: non_empty(row.route_type),
        });
    }
    summarize(records, dropped)
}

fn parse_trips<R: Read>(rdr: R) -> (Vec<TripRecord>, TableSummary) {
    let (rows, mut dropped) = read_rows::<RawTrip, _>("trips", rdr);
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        if row.trip_id.is_empty() || row.route_id.is_empty() {
            dropped += 1;
            warn!(table = "trips", "dropping row with empty trip_id or route_id");
            continue;
        }
        records.push(TripRecord {
            id: row.trip_id,
            route_id: row.route_id,
            headsign: non_empty(row.trip_headsign),
        });
    }
    summarize(records, dropped)
}

fn parse_stop_times<R: Read>(rdr: R) -> (Vec<StopTimeRecord>, TableSummary) {
    let (rows, mut dropped) = read_rows::<RawStopTime, _>("stop_times", rdr);
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        if row.trip_id.is_empty() || row.stop_id.is_empty() {
            dropped += 1;
            warn!(
                table = "stop_times",
                "dropping row with empty trip_id or stop_id"
            );
            continue;
        }
        let times = ServiceTime::parse(&row.arrival_time)
            .and_then(|arr| ServiceTime::parse(&row.departure_time).map(|dep| (arr, dep)));
        let (arrival, departure) = match times {
            Ok(times) => times,
            Err(err) => {
                dropped += 1;
                warn!(table = "stop_times", trip = %row.trip_id, %err, "dropping row with malformed time");
                continue;
            }
        };
        records.push(StopTimeRecord {
            trip_id: row.trip_id,
            stop_id: row.stop_id,
            sequence: row.stop_sequence,
            arrival,
            departure,
        });
    }
    summarize(records, dropped)
}

fn summarize<T>(records: Vec<T>, dropped: usize) -> (Vec<T>, TableSummary) {
    let kept = records.len();
    (records, TableSummary { kept, dropped })
}
