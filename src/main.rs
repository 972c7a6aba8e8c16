use std::process::ExitCode;

use reflens::cli::{self, Cli};
use reflens::ui::output;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    cli::init_tracing(cli.debug);

    match cli::run(cli) {
        Ok(code) => code,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
