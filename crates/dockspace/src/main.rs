use std::process::ExitCode;

use dockspace::{exit_code, run, Options};

fn main() -> ExitCode {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let result = Options::load().and_then(|options| run(&options));
    match &result {
        Ok(outcome) => log::info!("exiting: {:?} after {} frames", outcome.reason, outcome.frames),
        Err(err) => log::error!("{err}"),
    }
    ExitCode::from(exit_code(&result))
}
