use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::needs::NeedsRegistry;
use crate::core::store::StoreLogic;
use crate::db::queries::list_active_workers;
use crate::errors::AppResult;
use crate::models::slot::Slot;
use crate::models::snapshot::AssignmentSnapshot;
use crate::ui::messages::header;
use crate::utils::colors::{GREY, RESET, color_for_coverage, colorize_optional};
use crate::utils::date::resolve_date;
use crate::utils::table::{Column, Table};
use rusqlite::Connection;

use super::open_pool;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { date } = cmd {
        let d = resolve_date(date.as_ref())?;
        let pool = open_pool(cfg)?;

        let snapshot = StoreLogic::load(&pool.conn, &d)?;
        print_snapshot(&pool.conn, cfg, &snapshot)?;
    }

    Ok(())
}

/// Render a snapshot station by station, one row per lane.
pub(crate) fn print_snapshot(
    conn: &Connection,
    cfg: &Config,
    snapshot: &AssignmentSnapshot,
) -> AppResult<()> {
    let needs = NeedsRegistry::load(conn, cfg, &snapshot.date)?;

    header(format!("Assignment for {}", snapshot.date));

    let mut table = Table::new(vec![
        Column::new("STATION", 14),
        Column::new("PLACED", 7),
        Column::new("WORKERS", 40),
    ]);

    for station in &cfg.stations {
        let placed = snapshot.workers_at(&station.name).len();
        let needed = needs.needed(&station.name);
        let color = color_for_coverage(placed, needed);
        let coverage = format!("{color}{placed}/{needed}{RESET}");

        if station.has_lanes() {
            table.add_row(vec![station.name.clone(), coverage, String::new()]);
            for lane in 1..=station.lanes {
                let ids = snapshot.workers_in(&Slot::new(&station.name, Some(lane)));
                table.add_row(vec![
                    format!("  {}:{}", station.name, lane),
                    String::new(),
                    colorize_optional(&ids.join(", ")),
                ]);
            }
        } else {
            let ids = snapshot.workers_at(&station.name);
            table.add_row(vec![
                station.name.clone(),
                coverage,
                colorize_optional(&ids.join(", ")),
            ]);
        }
    }

    // Placements on stations no longer configured
    for p in &snapshot.placements {
        if cfg.station(&p.station).is_none() {
            table.add_row(vec![
                format!("{GREY}{}{RESET}", p.slot()),
                String::new(),
                p.worker_id.clone(),
            ]);
        }
    }

    table.add_row(vec![
        cfg.manual_station.clone(),
        String::new(),
        colorize_optional(snapshot.manual_text.as_deref().unwrap_or("")),
    ]);

    table.print();

    let idle: Vec<String> = list_active_workers(conn)?
        .into_iter()
        .filter(|w| !snapshot.is_assigned(&w.id))
        .map(|w| w.id)
        .collect();
    if !idle.is_empty() {
        println!("\nNot assigned: {}", idle.join(", "));
    }

    Ok(())
}
