//! vesseltreat main entrypoint.

use vesseltreat::run;

fn main() {
    println!();
    if let Err(e) = run() {
        vesseltreat::ui::messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
