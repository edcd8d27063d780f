//! # Command-Line Definitions
//!
//! ```text
//! despensa [--config <path>] [--ephemeral] [--json] <command>
//!
//!   catalog [<product-id>] [--category <tag>] [--search <text>]
//!           [--featured] [--in-stock] [--categories]
//!   cart [show | add <id> [qty] | remove <id> | set <id> <qty> | clear | toggle]
//!   favorites [list | toggle <id> | add <id> | remove <id>]
//!   login <email> --password <password>
//!   logout
//!   profile [show | update [--name ..] [--email ..] [--company ..] [--phone ..]]
//!   reset
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "despensa", version)]
#[command(about = "Despensa storefront: catalog, cart, favorites and account")]
#[command(
    after_help = "Environment:\n  DESPENSA_DATA_DIR         Directory for despensa.db\n  DESPENSA_DB_PATH          SQLite file for saved state\n  DESPENSA_STORAGE          sqlite | memory\n  DESPENSA_LOGIN_DELAY_MS   Simulated login round-trip\n  DESPENSA_CURRENCY_SYMBOL  Symbol printed after prices\n  DESPENSA_LOG              Log filter (RUST_LOG wins)"
)]
pub struct Cli {
    /// Config file (default: despensa.toml in the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep state in memory for this run only
    #[arg(long, global = true, default_value_t = false)]
    pub ephemeral: bool,

    /// Print JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the product catalog
    Catalog(CatalogArgs),

    /// Show or change the cart (default: show)
    Cart {
        #[command(subcommand)]
        command: Option<CartCommand>,
    },

    /// Show or change favorites (default: list)
    Favorites {
        #[command(subcommand)]
        command: Option<FavoritesCommand>,
    },

    /// Log in
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Log out
    Logout,

    /// Show or edit the customer profile (default: show)
    Profile {
        #[command(subcommand)]
        command: Option<ProfileCommand>,
    },

    /// Forget the cart, favorites and session
    Reset,
}

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Show a single product
    pub product_id: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, default_value_t = false)]
    pub featured: bool,

    #[arg(long, default_value_t = false)]
    pub in_stock: bool,

    /// List category tags instead of products
    #[arg(long, default_value_t = false, conflicts_with = "product_id")]
    pub categories: bool,
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    Show,
    Add {
        product_id: String,
        #[arg(default_value = "1", allow_hyphen_values = true)]
        quantity: String,
    },
    Remove {
        product_id: String,
    },
    /// Set a line's quantity (0 removes it)
    Set {
        product_id: String,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    Clear,
    /// Open or close the cart panel
    Toggle,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    List,
    Toggle { product_id: String },
    Add { product_id: String },
    Remove { product_id: String },
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    Show,
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}
