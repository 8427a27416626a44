//! rStationRota main entrypoint.

use rstationrota::run;
use rstationrota::ui::messages::error;

fn main() {
    println!();
    if let Err(e) = run() {
        error(&e);
        // 2 = bad input the operator can fix, 1 = everything else
        std::process::exit(if e.is_validation() { 2 } else { 1 });
    }
}
