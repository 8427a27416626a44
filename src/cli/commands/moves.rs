use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::moves::{MoveLogic, Proposal};
use crate::errors::AppResult;
use crate::models::slot::Slot;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::{parse_optional_date, resolve_date};
use crate::utils::table::{Column, Table};

use super::open_pool;
use super::show::print_snapshot;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Move {
            worker,
            from,
            to,
            date,
        } => {
            let d = resolve_date(date.as_ref())?;
            let from = Slot::parse(from)?;
            let to = Slot::parse(to)?;

            let mut pool = open_pool(cfg)?;

            match MoveLogic::propose(&mut pool, cfg, d, worker, &from, &to)? {
                Proposal::Applied(snapshot) => {
                    if from == to {
                        info(format!("{} already at {}: nothing to do.", worker, to));
                    } else {
                        success(format!("Moved {} from {} to {} on {}.", worker, from, to, d));
                    }
                    print_snapshot(&pool.conn, cfg, &snapshot)?;
                }
                Proposal::Pending(p) => {
                    warning(format!(
                        "{} has been at {} {} times in the window (threshold {:.2}).",
                        p.worker_id, p.to.station, p.count, p.threshold
                    ));
                    println!(
                        "Move held as pending. Run `rstationrota confirm {}` to apply it or `rstationrota cancel {}` to drop it.",
                        p.token, p.token
                    );
                }
            }
        }

        Commands::Confirm { token } => {
            let mut pool = open_pool(cfg)?;
            let snapshot = MoveLogic::confirm(&mut pool, *token)?;
            success(format!("Pending move {} applied.", token));
            print_snapshot(&pool.conn, cfg, &snapshot)?;
        }

        Commands::Cancel { token } => {
            let mut pool = open_pool(cfg)?;
            let p = MoveLogic::cancel(&mut pool, *token)?;
            success(format!(
                "Pending move {} dropped ({} stays at {}).",
                token, p.worker_id, p.from
            ));
        }

        Commands::Pending { date } => {
            let day = parse_optional_date(date.as_ref())?;
            let pool = open_pool(cfg)?;
            let pending = MoveLogic::pending(&pool.conn, day.as_ref())?;

            if pending.is_empty() {
                info("No pending moves.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("TOKEN", 6),
                Column::new("DATE", 10),
                Column::new("WORKER", 10),
                Column::new("FROM", 10),
                Column::new("TO", 10),
                Column::new("VISITS", 6),
                Column::new("LIMIT", 6),
            ]);
            for p in pending {
                table.add_row(vec![
                    p.token.to_string(),
                    p.date.to_string(),
                    p.worker_id,
                    p.from.to_string(),
                    p.to.to_string(),
                    p.count.to_string(),
                    format!("{:.2}", p.threshold),
                ]);
            }
            table.print();
        }

        _ => {}
    }

    Ok(())
}
