use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::errors::AppResult;
use crate::utils::date::parse_optional_date;

use super::open_pool;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        since,
        until,
        force,
    } = cmd
    {
        let since = parse_optional_date(since.as_ref())?;
        let until = parse_optional_date(until.as_ref())?;

        let mut pool = open_pool(cfg)?;
        ExportLogic::export(&mut pool, format, file, since, until, *force)?;
    }
    Ok(())
}
