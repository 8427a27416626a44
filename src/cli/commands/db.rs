use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::consistency;
use crate::db::migrate::{applied_versions, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, GREEN, RED, RESET};
use crate::utils::date::parse_date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        date,
        vacuum,
        info,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            run_pending_migrations(&pool.conn)?;
            let versions = applied_versions(&pool.conn)?;
            println!(
                "{}✔ Migration completed ({} applied).{}\n",
                GREEN,
                versions.len(),
                RESET
            );
        }

        //
        // 2) INFO
        //
        if *info {
            stats::print_db_info(&pool, &cfg.database)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}", RED, RESET, integrity);
            }

            println!("{}▶ Checking ledger mirror…{}", CYAN, RESET);

            let divergences: Vec<consistency::Divergence> = match date {
                Some(d) => {
                    let day = parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?;
                    consistency::check_date(&pool.conn, &day)?.into_iter().collect()
                }
                None => consistency::check_all(&pool.conn)?,
            };

            if divergences.is_empty() {
                println!("{}✔ Ledger mirrors assignments.{}\n", GREEN, RESET);
            } else {
                for d in &divergences {
                    println!("{}✘ {}{}", RED, d.describe(), RESET);
                }
                return Err(AppError::InconsistentState(format!(
                    "{} date(s) with ledger/assignment divergence",
                    divergences.len()
                )));
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);

            pool.conn.execute_batch("VACUUM;")?;

            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
