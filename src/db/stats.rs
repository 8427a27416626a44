use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::NaiveDate;
use std::fs;

fn count(pool: &DbPool, sql: &str) -> rusqlite::Result<i64> {
    pool.conn.query_row(sql, [], |row| row.get(0))
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let history = count(pool, "SELECT COUNT(*) FROM history")?;
    let counters = [
        ("Active workers", "SELECT COUNT(*) FROM workers WHERE active = 1"),
        ("Assignments", "SELECT COUNT(*) FROM assignments WHERE manual = 0"),
        ("Planned days", "SELECT COUNT(DISTINCT date) FROM assignments"),
        ("Pending moves", "SELECT COUNT(*) FROM pending_moves"),
    ];
    for (label, sql) in counters {
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, count(pool, sql)?, RESET);
    }
    println!("{}• Ledger rows:{} {}{}{}", CYAN, RESET, GREEN, history, RESET);

    //
    // 3) LEDGER DATE RANGE
    //
    let (first_date, last_date): (Option<String>, Option<String>) = pool
        .conn
        .query_row("SELECT MIN(date), MAX(date) FROM history", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?;

    let dash = || format!("{GREY}--{RESET}");
    let fmt_first = first_date.clone().unwrap_or_else(dash);
    let fmt_last = last_date.clone().unwrap_or_else(dash);

    println!("{}• Ledger range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE PLACEMENTS/DAY
    //
    if let (Some(f), Some(l)) = (first_date, last_date) {
        let d1 = parse_date(&f)?;
        let d2 = parse_date(&l)?;
        let days = (d2 - d1).num_days() + 1;

        let avg = history as f64 / days as f64;
        println!("{}• Average placements/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}

fn parse_date(date_str: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}
