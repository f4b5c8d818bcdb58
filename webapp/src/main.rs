use tracing::{Level, error};

use webapp::events;

fn main() {
    dioxus_logger::init(Level::DEBUG).expect("failed to init logger");

    if let Err(err) = events::boot() {
        error!("failed to attach page behavior: {err}");
    }
}
