use anyhow::Result;
use std::env;
use std::io;

use tallybook::accounting::storage::StorageConfig;
use tallybook::cli::{Command, ExecutableCommand};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        },
    };

    let config = StorageConfig::from_env();
    command.execute(&config, &mut io::stdout().lock())?;

    Ok(())
}
