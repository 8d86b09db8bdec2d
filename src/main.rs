//! skedjit main entrypoint.

use skedjit::run;
use skedjit::ui::messages::error;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        if e.status().is_server_error() {
            log::error!("{}", e);
        }
        error(e.public_message());
        std::process::exit(1);
    }
}
