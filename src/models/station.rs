use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// A physical work station as declared in the configuration file.
///
/// `lanes == 0` means an unordered group; `lanes == N` means the station
/// is split into lanes `1..=N`, each holding any number of workers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    #[serde(default)]
    pub lanes: u32,
}

impl Station {
    pub fn new(name: &str, lanes: u32) -> Self {
        Self {
            name: name.to_string(),
            lanes,
        }
    }

    pub fn has_lanes(&self) -> bool {
        self.lanes > 0
    }

    /// Check that `lane` is addressable on this station.
    pub fn check_lane(&self, lane: Option<u32>) -> AppResult<()> {
        match (self.has_lanes(), lane) {
            (false, None) => Ok(()),
            (false, Some(l)) => Err(AppError::InvalidLane {
                station: self.name.clone(),
                detail: format!("station has no lanes, got lane {}", l),
            }),
            (true, None) => Err(AppError::InvalidLane {
                station: self.name.clone(),
                detail: format!("a lane between 1 and {} is required", self.lanes),
            }),
            (true, Some(l)) if l == 0 || l > self.lanes => Err(AppError::InvalidLane {
                station: self.name.clone(),
                detail: format!("lane {} is outside 1..={}", l, self.lanes),
            }),
            (true, Some(_)) => Ok(()),
        }
    }

    /// Lane for the k-th worker placed here by the planner (0-based).
    pub fn lane_for_index(&self, k: usize) -> Option<u32> {
        if self.has_lanes() {
            Some((k as u32 % self.lanes) + 1)
        } else {
            None
        }
    }
}
