//! NeedsRegistry: required headcount per station for one date.

use crate::config::Config;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::{load_needs, upsert_station_need};
use crate::errors::{AppError, AppResult};
use crate::models::station::Station;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use rusqlite::Connection;

/// Needs of the distributable stations, in configured station order.
#[derive(Debug, Clone, PartialEq)]
pub struct NeedsRegistry {
    pub date: NaiveDate,
    entries: Vec<(Station, u32)>,
}

impl NeedsRegistry {
    /// Build a registry from explicit `(station, needed)` pairs.
    pub fn new(date: NaiveDate, entries: Vec<(Station, u32)>) -> Self {
        Self { date, entries }
    }

    /// Load the date's needs for every configured station (missing = 0).
    pub fn load(conn: &Connection, cfg: &Config, date: &NaiveDate) -> AppResult<Self> {
        let stored = load_needs(conn, date)?;

        for n in &stored {
            if cfg.station(&n.station).is_none() {
                warning(format!(
                    "Ignoring need for unknown station '{}' on {}",
                    n.station, date
                ));
            }
        }

        let entries = cfg
            .stations
            .iter()
            .map(|s| {
                let needed = stored
                    .iter()
                    .find(|n| n.station == s.name)
                    .map(|n| n.needed)
                    .unwrap_or(0);
                (s.clone(), needed)
            })
            .collect();

        Ok(Self::new(*date, entries))
    }

    pub fn needed(&self, station: &str) -> u32 {
        self.entries
            .iter()
            .find(|(s, _)| s.name == station)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn entries(&self) -> &[(Station, u32)] {
        &self.entries
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Stations with a positive need, highest need first.
    ///
    /// The sort is stable: equal needs keep the configured station order.
    pub fn distribution_order(&self) -> Vec<(&Station, u32)> {
        let mut v: Vec<(&Station, u32)> = self
            .entries
            .iter()
            .filter(|(_, n)| *n > 0)
            .map(|(s, n)| (s, *n))
            .collect();
        v.sort_by(|a, b| b.1.cmp(&a.1));
        v
    }
}

pub struct NeedsLogic;

impl NeedsLogic {
    /// Upsert the need of one station for a date.
    pub fn set(
        pool: &mut DbPool,
        cfg: &Config,
        station: &str,
        date: NaiveDate,
        count: u32,
    ) -> AppResult<()> {
        if cfg.is_manual_station(station) {
            return Err(AppError::InvalidMove(format!(
                "'{}' takes free text and has no headcount need",
                station
            )));
        }
        if cfg.station(station).is_none() {
            return Err(AppError::UnknownStation(station.to_string()));
        }

        upsert_station_need(&pool.conn, station, &date, count)?;

        ttlog_soft(
            &pool.conn,
            "need",
            &format!("{}@{}", station, date),
            &format!("Need set to {}", count),
        );
        Ok(())
    }
}
