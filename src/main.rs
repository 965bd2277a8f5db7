//! skedule main entrypoint.

use skedule::run;
use skedule::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
