//! sloany - query the SDSS database and retrieve spectra files.

use tracing::error;

use sloany::app;
use sloany::cli::Cli;
use sloany::logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse_args();
    if let Err(e) = app::run(cli).await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}
