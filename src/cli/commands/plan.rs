use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::planner::{PlanLogic, unassigned};
use crate::core::roster::RosterLogic;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::date::resolve_date;

use super::open_pool;
use super::show::print_snapshot;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Plan {
        workers,
        all,
        manual,
        date,
    } = cmd
    {
        //
        // 1. Parse date + open DB
        //
        let d = resolve_date(date.as_ref())?;
        let mut pool = open_pool(cfg)?;

        //
        // 2. Resolve the selection
        //
        let selected: Vec<String> = if *all {
            RosterLogic::active(&pool)?.into_iter().map(|w| w.id).collect()
        } else {
            workers
                .iter()
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty())
                .collect()
        };

        //
        // 3. Distribute + commit
        //
        let snapshot = PlanLogic::run(&mut pool, cfg, &selected, manual.as_deref(), d)?;

        success(format!(
            "Planned {}: {} worker(s) placed.",
            d,
            snapshot.placements.len()
        ));

        let left = unassigned(&selected, &snapshot);
        if !left.is_empty() {
            warning(format!("Unassigned today: {}", left.join(", ")));
        }

        print_snapshot(&pool.conn, cfg, &snapshot)?;
    }

    Ok(())
}
