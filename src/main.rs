use std::process::ExitCode;

use cors_test_server::config::Config;
use cors_test_server::error::StartupError;
use cors_test_server::logger;
use cors_test_server::server::{self, SystemBrowser};

fn main() -> ExitCode {
    match start() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logger::log_startup_failure(&err);
            ExitCode::FAILURE
        }
    }
}

fn start() -> Result<(), StartupError> {
    let cfg = Config::load()?;

    // Build the Tokio runtime, sized by the workers setting when present
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers.filter(|&w| w > 0) {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build().map_err(StartupError::Runtime)?;

    runtime.block_on(server::run(cfg, &SystemBrowser, server::shutdown_signal()))
}
