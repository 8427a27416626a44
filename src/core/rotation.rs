//! RotationGuard: no worker repeats the station they occupied last.

use std::collections::HashMap;

/// `false` only when the worker's last station is `candidate`.
///
/// Workers missing from the map, or whose last station is unknown, may go
/// anywhere.
pub fn can_assign(
    worker_id: &str,
    candidate: &str,
    last_station_of: &HashMap<String, Option<String>>,
) -> bool {
    match last_station_of.get(worker_id) {
        Some(Some(last)) => last != candidate,
        _ => true,
    }
}

/// `all_stations` filtered by [`can_assign`], order preserved.
pub fn available_stations(
    worker_id: &str,
    all_stations: &[String],
    last_station_of: &HashMap<String, Option<String>>,
) -> Vec<String> {
    if !last_station_of.contains_key(worker_id) {
        return all_stations.to_vec();
    }

    all_stations
        .iter()
        .filter(|s| can_assign(worker_id, s, last_station_of))
        .cloned()
        .collect()
}
