//! `campmarket` command line client.
//!
//! Settings are read from `CAMPMARKET_*` environment variables. A `.env` file
//! in the current working directory (or the nearest parent holding one) is
//! loaded first; variables already set in the environment win.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use campmarket::api::types::ProductQuery;
use campmarket::api::{auth, categories, members, products};
use campmarket::{ApiClient, ApiResult, ClientConfig, KeychainStore, SessionStore, TokenManager};

#[derive(Parser, Debug)]
#[command(
    name = "campmarket",
    about = "Command line client for the campmarket API",
    after_help = "Reads CAMPMARKET_* settings from the environment, after loading a .env file \
                  from the current directory or its nearest parent that has one."
)]
struct Args {
    /// API base URL (overrides CAMPMARKET_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session in the system keychain
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log out and forget the stored session
    Logout,
    /// Show the logged-in member
    Whoami,
    /// Browse listings
    Products {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        category: Option<u64>,
        #[arg(long)]
        keyword: Option<String>,
    },
    /// Show one listing
    Product { id: u64 },
    /// Like a listing
    Like { id: u64 },
    /// List categories
    Categories,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    env_logger::init();

    let args = Args::parse();

    let mut config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(ref url) = args.api_url {
        config = config.with_base_url(url);
    }
    log::debug!("Using API at {}", config.base_url);

    let session = Arc::new(SessionStore::default());
    let tokens = Arc::new(TokenManager::new(
        Box::new(KeychainStore::new(&config.keychain_service)),
        session,
    ));
    let client = ApiClient::new(&config, tokens);

    match run(&client, args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            if e.is_auth_error() {
                eprintln!("Run `campmarket login` to sign in again.");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &ApiClient, command: Command) -> ApiResult<()> {
    match command {
        Command::Login { email, password } => {
            auth::login(client, &email, &password).await?;
            let profile = members::fetch_profile(client).await?;
            println!("Logged in as {} <{}>", profile.nickname, profile.email);
        }
        Command::Logout => {
            auth::logout(client).await?;
            println!("Logged out");
        }
        Command::Whoami => {
            let profile = members::fetch_profile(client).await?;
            println!("{} <{}> (member #{})", profile.nickname, profile.email, profile.id);
        }
        Command::Products {
            page,
            size,
            category,
            keyword,
        } => {
            let query = ProductQuery {
                page,
                size,
                category_id: category,
                keyword,
            };
            let page = products::list_products(client, &query).await?;
            for product in &page.content {
                println!(
                    "#{:<6} {:>10}  {}{}",
                    product.id,
                    product.price,
                    product.title,
                    if product.liked { "  ♥" } else { "" }
                );
            }
            println!(
                "page {} ({} of {} listings)",
                page.page,
                page.content.len(),
                page.total_elements
            );
        }
        Command::Product { id } => {
            let product = products::get_product(client, id).await?;
            println!("{} - {}", product.title, product.price);
            if let Some(ref category) = product.category {
                println!("Category: {}", category.name);
            }
            println!("Seller: {}", product.seller.nickname);
            println!("Likes: {}", product.like_count);
            println!();
            println!("{}", product.description);
        }
        Command::Like { id } => {
            let status = products::like_product(client, id).await?;
            println!("Liked ({} likes)", status.like_count);
        }
        Command::Categories => {
            for category in categories::list_categories(client).await? {
                println!("{:>4}  {}", category.id, category.name);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_help_mentions_env_file() {
        let help = Args::command().render_long_help().to_string();
        assert!(help.contains(".env"));
        assert!(help.contains("CAMPMARKET_"));
    }
}
