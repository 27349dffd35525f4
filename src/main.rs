//! CLI for the inventory API client.
//!
//! View glue only: translate arguments into library calls and print the
//! results. Set `INVENTARIO_MOCK_FALLBACK=1` to work against the in-memory
//! backend when the server is down.

use anyhow::Result;
use clap::{Parser, Subcommand};

use inventario::models::LoginCredentials;
use inventario::{ApiClient, ClientConfig, SessionController, SessionState, TokenStore};

#[derive(Parser)]
#[command(name = "inventario", version, about = "Gestor de Inventário API client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the bearer token
    Login {
        email: String,
        /// Read from a prompt when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Drop the stored session
    Logout,
    /// Show the current session state
    Status,
    /// Product records
    Produtos {
        #[command(subcommand)]
        action: CrudAction,
    },
    /// Batch records
    Lotes {
        #[command(subcommand)]
        action: CrudAction,
    },
    /// Category records
    Generos {
        #[command(subcommand)]
        action: CrudAction,
    },
}

#[derive(Subcommand)]
enum CrudAction {
    /// List all records
    List,
    /// Show one record as JSON
    Show { id: i64 },
    /// Delete a record
    Remove { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();
    let tokens = TokenStore::new(&config.token_path);
    let api = ApiClient::new(config, tokens.clone())?;

    let mut session = SessionController::new(tokens);
    session.restore();

    match cli.command {
        Command::Login { email, password } => {
            let password = match password {
                Some(password) => password,
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .interact()?,
            };
            let auth = api.login(&LoginCredentials { email, password }).await?;
            session.login(&auth.access_token)?;
            println!("Logged in; token stored.");
        }
        Command::Logout => {
            session.logout();
            println!("Logged out.");
        }
        Command::Status => match session.state() {
            SessionState::Authenticated => println!("authenticated (token stored)"),
            _ => println!("anonymous"),
        },
        Command::Produtos { action } => match action {
            CrudAction::List => {
                for product in api.get_products().await? {
                    println!(
                        "{:>4}  {:<32} R$ {:>9.2}  x{}",
                        product.id, product.name, product.price, product.quantity
                    );
                }
            }
            CrudAction::Show { id } => {
                let product = api.get_product(id).await?;
                println!("{}", serde_json::to_string_pretty(&product)?);
            }
            CrudAction::Remove { id } => {
                api.delete_product(id).await?;
                println!("Removed produto {id}.");
            }
        },
        Command::Lotes { action } => match action {
            CrudAction::List => {
                for batch in api.get_batches().await? {
                    println!(
                        "{:>4}  {:<16} produto {:>4}  x{:<6} {}",
                        batch.id, batch.code, batch.product_id, batch.quantity, batch.entry_date
                    );
                }
            }
            CrudAction::Show { id } => {
                let batch = api.get_batch(id).await?;
                println!("{}", serde_json::to_string_pretty(&batch)?);
            }
            CrudAction::Remove { id } => {
                api.delete_batch(id).await?;
                println!("Removed lote {id}.");
            }
        },
        Command::Generos { action } => match action {
            CrudAction::List => {
                for category in api.get_categories().await? {
                    println!(
                        "{:>4}  {:<20} {}",
                        category.id,
                        category.name,
                        category.description.as_deref().unwrap_or("-")
                    );
                }
            }
            CrudAction::Show { id } => {
                let category = api.get_category(id).await?;
                println!("{}", serde_json::to_string_pretty(&category)?);
            }
            CrudAction::Remove { id } => {
                api.delete_category(id).await?;
                println!("Removed genero {id}.");
            }
        },
    }

    Ok(())
}
