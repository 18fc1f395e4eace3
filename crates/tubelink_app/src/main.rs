mod platform;

use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    platform::run()
}
