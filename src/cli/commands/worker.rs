use crate::cli::parser::{Commands, WorkerAction};
use crate::config::Config;
use crate::core::roster::RosterLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::table::{Column, Table};

use super::open_pool;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Worker { action } = cmd {
        let mut pool = open_pool(cfg)?;

        match action {
            WorkerAction::Add { id, name, shift } => {
                let w = RosterLogic::add(&mut pool, id, name, shift)?;
                success(format!("Worker {} ({}) added.", w.id, w.name));
            }
            WorkerAction::List { all } => {
                let workers = if *all {
                    RosterLogic::all(&pool)?
                } else {
                    RosterLogic::active(&pool)?
                };

                if workers.is_empty() {
                    info("No workers in the roster.");
                    return Ok(());
                }

                let mut table = Table::new(vec![
                    Column::new("ID", 10),
                    Column::new("NAME", 24),
                    Column::new("SHIFT", 8),
                    Column::new("ACTIVE", 6),
                ]);
                for w in workers {
                    table.add_row(vec![
                        w.id,
                        w.name,
                        colorize_optional(&w.shift),
                        if w.active { "yes" } else { "no" }.to_string(),
                    ]);
                }
                table.print();
            }
        }
    }

    Ok(())
}
