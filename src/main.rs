mod config;
mod console;
mod devices;
mod error;
mod lang;
mod menu;
mod setup;
mod switcher;

use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::ConfigStore;
use console::Console;
use devices::PowerShellDevices;
use menu::App;
use switcher::Nircmd;

fn main() -> ExitCode {
    // Quiet by default so log lines don't land in the middle of the menu. Override with RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    info!("Audio switcher starting");

    let mut app = App::new(
        ConfigStore::default(),
        PowerShellDevices::default(),
        Nircmd,
        Console::stdio(),
    );

    match app.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
