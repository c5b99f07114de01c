use clap::{Parser, Subcommand};

/// carver-skill: environment bootstrapper for the Carver feeds skill
#[derive(Parser, Debug)]
#[command(name = "carver-skill")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision the shared Python environment and validate credentials.
    ///
    /// Exit codes: 0 = ready, 1 = fatal error, 2 = API key required in CWD.
    Init {
        /// Working directory whose .env holds CARVER_API_KEY
        /// (default: current directory)
        #[arg(value_name = "CWD")]
        cwd: Option<String>,

        /// Skill home directory holding the shared venv
        #[arg(long, value_name = "DIR", env = "CARVER_SKILL_HOME")]
        skill_home: Option<String>,
    },

    /// Report environment and credential status without changing anything
    Doctor {
        /// Working directory to check credentials in (default: current directory)
        #[arg(value_name = "CWD")]
        cwd: Option<String>,

        /// Skill home directory holding the shared venv
        #[arg(long, value_name = "DIR", env = "CARVER_SKILL_HOME")]
        skill_home: Option<String>,

        /// Emit the report as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Remove the provisioned environment
    Clean {
        /// Skill home directory holding the shared venv
        #[arg(long, value_name = "DIR", env = "CARVER_SKILL_HOME")]
        skill_home: Option<String>,

        /// Show what would be removed without deleting anything
        #[arg(long, default_value = "false")]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(long, default_value = "false")]
        force: bool,
    },
}
