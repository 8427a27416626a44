use crate::cli::parser::{Commands, NeedAction};
use crate::config::Config;
use crate::core::needs::{NeedsLogic, NeedsRegistry};
use crate::errors::AppResult;
use crate::ui::messages::{header, success};
use crate::utils::colors::{GREY, RESET};
use crate::utils::date::resolve_date;
use crate::utils::formatting::describe_station;
use crate::utils::table::{Column, Table};

use super::open_pool;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Need { action } = cmd {
        let mut pool = open_pool(cfg)?;

        match action {
            NeedAction::Set {
                station,
                count,
                date,
            } => {
                let d = resolve_date(date.as_ref())?;
                NeedsLogic::set(&mut pool, cfg, station, d, *count)?;
                success(format!("Need for {} on {} set to {}.", station, d, count));
            }
            NeedAction::List { date } => {
                let d = resolve_date(date.as_ref())?;
                let needs = NeedsRegistry::load(&pool.conn, cfg, &d)?;

                header(format!("Needs for {}", d));

                let mut table =
                    Table::new(vec![Column::new("STATION", 20), Column::new("NEED", 6)]);
                for (station, needed) in needs.entries() {
                    let n = if *needed == 0 {
                        format!("{GREY}0{RESET}")
                    } else {
                        needed.to_string()
                    };
                    table.add_row(vec![describe_station(station), n]);
                }
                table.print();
                println!("Total: {}", needs.total());
            }
        }
    }

    Ok(())
}
