mod app;
#[cfg(test)]
mod test_utils;

use app::error::ReclinkError;
use std::io::Write;
use std::process::ExitCode;

fn init_logging() {
    // `LEVEL message`, one line per event; RUST_LOG overrides the default level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{} {}", record.level(), record.args()))
        .init();
}

fn main() -> ExitCode {
    init_logging();

    match app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:#}", err);
            let code = err
                .downcast_ref::<ReclinkError>()
                .map_or(1, ReclinkError::exit_code);
            ExitCode::from(code)
        }
    }
}
