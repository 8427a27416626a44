use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::history::{HistoryWindow, history_for_window, least_visited};
use crate::core::overuse::{self, OverusePolicy};
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{GREY, RESET, YELLOW};
use crate::utils::date::resolve_date;
use crate::utils::table::{Column, Table};

use super::open_pool;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History { worker, date } = cmd {
        let d = resolve_date(date.as_ref())?;
        let pool = open_pool(cfg)?;

        let window = HistoryWindow::before(d, cfg.history_window_months);
        let counts = history_for_window(&pool.conn, worker, &window)?;
        let policy = OverusePolicy::from(cfg);

        header(format!(
            "History of {} from {} to {} (excluded)",
            worker, window.start, d
        ));

        let mut table = Table::new(vec![
            Column::new("STATION", 14),
            Column::new("VISITS", 6),
            Column::new("", 10),
        ]);

        // configured stations first, then leftovers from old configurations
        let mut names = cfg.station_names();
        let mut extra: Vec<String> = counts
            .keys()
            .filter(|k| !names.contains(k))
            .cloned()
            .collect();
        extra.sort();
        names.extend(extra);

        for name in names {
            let n = counts.get(&name).copied().unwrap_or(0);
            let flag = if overuse::evaluate(&name, &counts, &policy).is_warn() {
                format!("{YELLOW}overused{RESET}")
            } else {
                String::new()
            };
            let visits = if n == 0 {
                format!("{GREY}0{RESET}")
            } else {
                n.to_string()
            };
            table.add_row(vec![name, visits, flag]);
        }
        table.print();

        println!(
            "Mean of visited stations: {:.2} (warn above {:.2} and {} visits)",
            overuse::mean_visits(&counts),
            policy.ratio * overuse::mean_visits(&counts),
            policy.min_count
        );
        println!(
            "Least visited: {}",
            least_visited(&cfg.station_names(), &counts).join(", ")
        );
    }

    Ok(())
}
