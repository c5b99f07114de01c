mod cli;
mod commands;
mod observability;

use clap::Parser;
use cli::{Cli, Commands};

use carver_skill_core::outcome::EXIT_FATAL;

fn main() {
    observability::init_tracing();
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Init { cwd, skill_home } => {
            commands::init::cmd_init(cwd.as_deref(), skill_home.as_deref())
        }
        Commands::Doctor {
            cwd,
            skill_home,
            json,
        } => match commands::doctor::cmd_doctor(cwd.as_deref(), skill_home.as_deref(), json) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("ERROR: {:#}", e);
                EXIT_FATAL
            }
        },
        Commands::Clean {
            skill_home,
            dry_run,
            force,
        } => match commands::env::cmd_clean(skill_home.as_deref(), dry_run, force) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("ERROR: {:#}", e);
                EXIT_FATAL
            }
        },
    };

    std::process::exit(code);
}
