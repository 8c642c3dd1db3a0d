use std::{env, process};

use estate_core::{
    cli::{self, Clock, Command, SystemClock},
    config::ConfigManager,
    init,
};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let command = cli::parse_args(env::args().skip(1))?;
    if command == Command::Help {
        eprintln!("{}", cli::usage());
        process::exit(1);
    }

    let config = ConfigManager::new()?.load()?;
    let clock: &dyn Clock = &SystemClock;
    println!("{}", cli::execute(&command, &config, clock)?);
    Ok(())
}
