//! VitaCare CLI - administration client for the VitaCare clinic API

use clap::Parser;
use log::LevelFilter;

mod auth;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod view;

use cli::handlers::resource;
use cli::{Cli, Commands, GlobalOptions};
use client::models::{
    Appointment, DoctorOffice, Medication, Office, Patient, Prescription, Specialty, User,
};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::new();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    } else {
        builder.filter_level(LevelFilter::Warn).parse_default_env();
    }
    builder.format_timestamp(None).init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli, cli::args::command_line_from_args(std::env::args()));

    match cli.command {
        Commands::Init => cli::init::run(&opts),
        Commands::Status => cli::status::run(&opts).await,
        Commands::Login(args) => cli::auth::login(&opts, args).await,
        Commands::Register(args) => cli::auth::register(&opts, args).await,
        Commands::Logout => cli::auth::logout(&opts).await,
        Commands::Whoami => cli::auth::whoami(&opts).await,
        Commands::Catalog(cmd) => cli::catalog::run(&opts, cmd).await,
        Commands::Patient(cmd) => resource::run::<Patient>(&opts, cmd).await,
        Commands::Doctor(cmd) => cli::doctor::run(&opts, cmd).await,
        Commands::Specialty(cmd) => resource::run::<Specialty>(&opts, cmd).await,
        Commands::Office(cmd) => resource::run::<Office>(&opts, cmd).await,
        Commands::DoctorOffice(cmd) => resource::run::<DoctorOffice>(&opts, cmd).await,
        Commands::Appointment(cmd) => resource::run::<Appointment>(&opts, cmd).await,
        Commands::MedicalRecord(cmd) => cli::records::run(&opts, cmd).await,
        Commands::Prescription(cmd) => resource::run::<Prescription>(&opts, cmd).await,
        Commands::Medication(cmd) => resource::run::<Medication>(&opts, cmd).await,
        Commands::User(cmd) => resource::run_admin::<User>(&opts, cmd).await,
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
    }
}
