// CLI module for administrative operations requiring server access

use clap::{Parser, Subcommand};

use crate::app_data::AppData;
use crate::config::migrate_database;
use crate::types::internal::complaint::Role;

/// Complaint backend CLI for administrative operations
#[derive(Parser)]
#[command(name = "reclamo")]
#[command(about = "Municipal complaint backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run database migrations and exit
    Migrate,

    /// Create a user account with the given role
    ///
    /// Citizens self-register through the API; this is how authority and
    /// admin accounts are provisioned.
    CreateUser {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,

        #[arg(long, value_parser = parse_role, default_value = "citizen")]
        role: Role,
    },
}

fn parse_role(s: &str) -> Result<Role, String> {
    Role::parse(s).map_err(|e| e.to_string())
}

/// Execute a parsed CLI command
pub async fn execute_command(
    command: Commands,
    app_data: &AppData,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Migrate => {
            migrate_database(&app_data.db).await?;
            tracing::info!("migrations completed");
        }
        Commands::CreateUser {
            username,
            password,
            role,
        } => {
            let user_id = app_data
                .credential_store
                .add_user(username.clone(), password, role)
                .await?;
            tracing::info!("created {} account '{}' ({})", role, username, user_id);
        }
    }
    Ok(())
}
