//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod auth;
pub mod catalog;
pub mod completions;
pub mod context;
pub mod doctor;
pub mod handlers;
pub mod init;
pub mod records;
pub mod status;

pub use args::{FormArgs, GlobalOptions, ListArgs, OutputFormat};
pub use context::CommandContext;

/// VitaCare CLI - administration client for the VitaCare clinic API
#[derive(Parser, Debug)]
#[command(name = "vitacare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "VITACARE_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "VITACARE_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the API base URL
    #[arg(long, global = true, env = "VITACARE_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "VITACARE_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or update the configuration file
    Init,

    /// Show configuration and session status
    Status,

    /// Sign in
    Login(CredentialArgs),

    /// Create an account and sign in with it
    Register(CredentialArgs),

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Browse the public medication catalogue (no sign-in needed)
    #[command(subcommand)]
    Catalog(CatalogCommands),

    /// Manage patients
    #[command(subcommand)]
    Patient(ResourceCommands),

    /// Manage doctors
    #[command(subcommand)]
    Doctor(ResourceCommands),

    /// Manage medical specialties
    #[command(subcommand)]
    Specialty(ResourceCommands),

    /// Manage consulting offices
    #[command(subcommand)]
    Office(ResourceCommands),

    /// Manage doctor/office assignments
    #[command(subcommand, name = "doctor-office")]
    DoctorOffice(ResourceCommands),

    /// Manage appointments
    #[command(subcommand)]
    Appointment(ResourceCommands),

    /// Manage clinical history entries
    #[command(subcommand, name = "medical-record", visible_alias = "history")]
    MedicalRecord(ResourceCommands),

    /// Manage prescriptions
    #[command(subcommand)]
    Prescription(ResourceCommands),

    /// Manage medications
    #[command(subcommand)]
    Medication(ResourceCommands),

    /// Manage user accounts (admin only)
    #[command(subcommand)]
    User(ResourceCommands),

    /// Generate shell completions
    #[command(after_help = "\
Static completions (subcommands/flags only):
  bash:   vitacare completion bash > /etc/bash_completion.d/vitacare
  zsh:    vitacare completion zsh > \"${fpath[1]}/_vitacare\"
  fish:   vitacare completion fish > ~/.config/fish/completions/vitacare.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Username and password, prompted for when omitted
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CredentialArgs {
    /// Username
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Password
    #[arg(long, env = "VITACARE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Operations shared by every collection
#[derive(Subcommand, Debug, Clone)]
pub enum ResourceCommands {
    /// List one page
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Page through the collection interactively
    Browse {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one entry
    Get {
        /// Identifier
        id: String,
    },

    /// Create an entry
    Create {
        #[command(flatten)]
        form: FormArgs,
    },

    /// Update an entry; unspecified fields keep their current values
    Update {
        /// Identifier
        id: String,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Delete an entry
    #[command(visible_alias = "rm")]
    Delete {
        /// Identifier
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Public catalogue subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum CatalogCommands {
    /// List medications
    List {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one medication
    Get {
        /// Medication identifier
        id: String,
    },
}
