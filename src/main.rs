use std::io;
use std::process::ExitCode;

use draughts_engine::protocol::Session;

fn main() -> ExitCode {
    env_logger::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::default();
    match session.run(stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("protocol loop stopped: {err}");
            ExitCode::FAILURE
        }
    }
}
