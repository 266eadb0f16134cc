//! Itinerary assembly.
//!
//! Shapes raw search candidates into the public result records: end
//! walks with geodesic distances, bus segments with their served stops
//! projected for the map, the transfer wait, the fare estimate, and the
//! display strings.

use tracing::error;

use crate::domain::{
    DomainError, Itinerary, Leg, PathStop, Point, Segment, SegmentKind,
};
use crate::geo;
use crate::network::Network;

use super::config::PlannerConfig;
use super::direct::DirectCandidate;
use super::transfer::TransferCandidate;

const WALK_COLOR: &str = "#94a3b8";
const FIRST_BUS_COLOR: &str = "#f97316";
const SECOND_BUS_COLOR: &str = "#ea580c";

/// A segment plus the raw numbers the itinerary totals need.
struct BuiltSegment {
    segment: Segment,
    km: f64,
    minutes: u32,
}

/// Assemble a single-bus candidate into an itinerary.
pub(crate) fn assemble_direct(
    network: &Network,
    config: &PlannerConfig,
    pickup_point: Point,
    drop_point: Point,
    candidate: &DirectCandidate,
) -> Itinerary {
    let leg = &candidate.leg;
    let board = network.stop(leg.board_stop());
    let alight = network.stop(leg.alight_stop());

    let walk_in = walk_segment(
        config,
        pickup_point,
        board.position(),
        candidate.pickup.distance_km,
        format!("Walk to {}", board.name),
    );
    let bus = bus_segment(network, config, leg, FIRST_BUS_COLOR);
    let walk_out = walk_segment(
        config,
        alight.position(),
        drop_point,
        candidate.drop.distance_km,
        "Walk to your destination".to_string(),
    );

    let path = bus_path(network, leg);
    let built = vec![walk_in, bus, walk_out];

    Itinerary {
        route_name: network.route(leg.route()).display_name().to_string(),
        start_stop: board.name.clone(),
        end_stop: alight.name.clone(),
        departure_time: leg.departure_time().to_string(),
        arrival_time: leg.arrival_time().to_string(),
        duration: format_minutes(total_minutes(&built)),
        stop_count: leg.stop_count(),
        fare: fare_estimate(config, &[leg]),
        path,
        total_distance: format_km(total_km(&built)),
        segments: built.into_iter().map(|b| b.segment).collect(),
    }
}

/// Assemble a two-bus candidate into an itinerary.
///
/// # Errors
///
/// Returns `Err` when the two legs do not meet at the candidate's
/// transfer stop; the caller logs and skips the candidate.
pub(crate) fn assemble_transfer(
    network: &Network,
    config: &PlannerConfig,
    pickup_point: Point,
    drop_point: Point,
    candidate: &TransferCandidate,
) -> Result<Itinerary, DomainError> {
    let first = &candidate.first;
    let second = &candidate.second;

    if first.alight_stop() != candidate.transfer_stop
        || second.board_stop() != candidate.transfer_stop
    {
        error!(
            transfer = %network.stop(candidate.transfer_stop).id,
            "transfer candidate does not meet at its transfer stop"
        );
        return Err(DomainError::LegsDoNotConnect);
    }

    let board = network.stop(first.board_stop());
    let change = network.stop(candidate.transfer_stop);
    let alight = network.stop(second.alight_stop());

    let walk_in = walk_segment(
        config,
        pickup_point,
        board.position(),
        candidate.pickup.distance_km,
        format!("Walk to {}", board.name),
    );
    let first_bus = bus_segment(network, config, first, FIRST_BUS_COLOR);
    let wait = wait_segment(change.position(), &change.name, candidate.wait_minutes);
    let second_bus = bus_segment(network, config, second, SECOND_BUS_COLOR);
    let walk_out = walk_segment(
        config,
        alight.position(),
        drop_point,
        candidate.drop.distance_km,
        "Walk to your destination".to_string(),
    );

    let mut path = bus_path(network, first);
    path.extend(bus_path(network, second));

    let built = vec![walk_in, first_bus, wait, second_bus, walk_out];

    Ok(Itinerary {
        route_name: format!(
            "{} + {}",
            network.route(first.route()).display_name(),
            network.route(second.route()).display_name()
        ),
        start_stop: board.name.clone(),
        end_stop: alight.name.clone(),
        departure_time: first.departure_time().to_string(),
        arrival_time: second.arrival_time().to_string(),
        duration: format_minutes(total_minutes(&built)),
        stop_count: first.stop_count() + second.stop_count(),
        fare: fare_estimate(config, &[first, second]),
        path,
        total_distance: format_km(total_km(&built)),
        segments: built.into_iter().map(|b| b.segment).collect(),
    })
}

fn walk_segment(
    config: &PlannerConfig,
    from: Point,
    to: Point,
    km: f64,
    instruction: String,
) -> BuiltSegment {
    let minutes = geo::walk_minutes(km, config.walk_speed_m_per_min);
    BuiltSegment {
        segment: Segment {
            start: from,
            end: to,
            distance: format_km(km),
            duration: format_minutes(minutes),
            instruction,
            color: WALK_COLOR.to_string(),
            kind: SegmentKind::Walk,
        },
        km,
        minutes,
    }
}

/// The zero-distance wait at the transfer stop, rendered as a walk.
fn wait_segment(at: Point, stop_name: &str, minutes: u32) -> BuiltSegment {
    BuiltSegment {
        segment: Segment {
            start: at,
            end: at,
            distance: format_km(0.0),
            duration: format_minutes(minutes),
            instruction: format!("Change at {stop_name} for the next bus"),
            color: WALK_COLOR.to_string(),
            kind: SegmentKind::Walk,
        },
        km: 0.0,
        minutes,
    }
}

fn bus_segment(
    network: &Network,
    config: &PlannerConfig,
    leg: &Leg,
    color: &str,
) -> BuiltSegment {
    let calls = network.leg_stop_times(leg);
    let stops: Vec<PathStop> = calls
        .iter()
        .map(|st| {
            let stop = network.stop(st.stop);
            PathStop {
                lat: stop.lat,
                lng: stop.lon,
                name: stop.name.clone(),
                sequence: st.sequence,
                time: st.departure.to_string(),
            }
        })
        .collect();
    let path = bus_path(network, leg);

    let route_name = network.route(leg.route()).display_name().to_string();
    let alight_name = &network.stop(leg.alight_stop()).name;
    let instruction = match &network.trip(leg.trip()).headsign {
        Some(headsign) => {
            format!("Take bus {route_name} towards {headsign} and alight at {alight_name}")
        }
        None => format!(
            "Take bus {route_name} from {} to {alight_name}",
            network.stop(leg.board_stop()).name
        ),
    };

    // No shape data: report distance as a per-stop estimate
    let km = config.km_per_stop_estimate * f64::from(leg.stop_count());
    let minutes = leg.duration_minutes();

    BuiltSegment {
        segment: Segment {
            start: network.stop(leg.board_stop()).position(),
            end: network.stop(leg.alight_stop()).position(),
            distance: format_km(km),
            duration: format_minutes(minutes),
            instruction,
            color: color.to_string(),
            kind: SegmentKind::Bus {
                route_name,
                stops,
                path,
            },
        },
        km,
        minutes,
    }
}

fn bus_path(network: &Network, leg: &Leg) -> Vec<Point> {
    network
        .leg_stop_times(leg)
        .iter()
        .map(|st| network.stop(st.stop).position())
        .collect()
}

/// Flat base per leg plus a per-stop increment, rounded up once over
/// the whole itinerary.
fn fare_estimate(config: &PlannerConfig, legs: &[&Leg]) -> u32 {
    legs.iter()
        .map(|leg| config.fare_base_per_leg + config.fare_per_stop * f64::from(leg.stop_count()))
        .sum::<f64>()
        .ceil() as u32
}

fn total_minutes(built: &[BuiltSegment]) -> u32 {
    built.iter().map(|b| b.minutes).sum()
}

fn total_km(built: &[BuiltSegment]) -> f64 {
    built.iter().map(|b| b.km).sum()
}

fn format_minutes(minutes: u32) -> String {
    format!("{minutes} mins")
}

fn format_km(km: f64) -> String {
    format!("{km:.2} km")
}
