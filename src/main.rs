mod categorizer;
mod cli;
mod db;
mod error;
mod fingerprint;
mod importer;
mod models;
mod normalizer;
mod reports;
mod settings;
mod store;

use clap::Parser;

use cli::{Cli, Commands, ReportCommands, UsersCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Users { command } => match command {
            UsersCommands::Add { name, email } => cli::users::add(&name, email.as_deref()),
            UsersCommands::List => cli::users::list(),
        },
        Commands::Import { file, user } => cli::import::run(file.as_deref(), user),
        Commands::Report { command } => match command {
            ReportCommands::Summary { from, to, user } => cli::report::summary(from, to, user),
            ReportCommands::Cashflow { year, user } => cli::report::cashflow(year, user),
        },
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
