use crate::errors::{AppError, AppResult};
use serde::Serialize;
use std::fmt;

/// Source or destination of a move: a station plus an optional lane.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Slot {
    pub station: String,
    pub lane: Option<u32>,
}

impl Slot {
    pub fn new(station: &str, lane: Option<u32>) -> Self {
        Self {
            station: station.to_string(),
            lane,
        }
    }

    /// Parse `STATION` or `STATION:LANE`.
    pub fn parse(s: &str) -> AppResult<Self> {
        let s = s.trim();
        let (station, lane) = match s.rsplit_once(':') {
            Some((name, lane)) => {
                let l = lane
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| AppError::InvalidSlot(s.to_string()))?;
                (name.trim(), Some(l))
            }
            None => (s, None),
        };

        if station.is_empty() {
            return Err(AppError::InvalidSlot(s.to_string()));
        }

        Ok(Self::new(station, lane))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lane {
            Some(l) => write!(f, "{}:{}", self.station, l),
            None => write!(f, "{}", self.station),
        }
    }
}
