use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::moves::MoveLogic;
use crate::errors::AppResult;
use crate::utils::colors::{GREEN, GREY, RED, RESET};
use crate::utils::date::resolve_date;
use crate::utils::formatting::describe_station;
use crate::utils::table::{Column, Table};

use super::open_pool;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stations { worker, date } = cmd {
        match worker {
            None => {
                let mut table =
                    Table::new(vec![Column::new("STATION", 20), Column::new("KIND", 12)]);
                for s in &cfg.stations {
                    let kind = if s.has_lanes() { "lanes" } else { "unordered" };
                    table.add_row(vec![describe_station(s), kind.to_string()]);
                }
                table.add_row(vec![
                    cfg.manual_station.clone(),
                    format!("{GREY}free text{RESET}"),
                ]);
                table.print();
            }
            Some(w) => {
                let d = resolve_date(date.as_ref())?;
                let pool = open_pool(cfg)?;
                let allowed = MoveLogic::available_stations(&pool.conn, cfg, &d, w)?;

                println!("Stations for {} on {}:", w, d);
                let mut table =
                    Table::new(vec![Column::new("STATION", 20), Column::new("STATUS", 12)]);
                for s in &cfg.stations {
                    let status = if allowed.contains(&s.name) {
                        format!("{GREEN}available{RESET}")
                    } else {
                        format!("{RED}blocked{RESET}")
                    };
                    table.add_row(vec![describe_station(s), status]);
                }
                table.print();
            }
        }
    }

    Ok(())
}
