//! # Despensa CLI Library
//!
//! Store containers and the command-line front end for the Despensa
//! storefront.
//!
//! ## Module Organization
//! ```text
//! despensa_cli/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap definitions
//! ├── config.rs       ◄─── AppConfig: TOML file + DESPENSA_* env
//! ├── auth.rs         ◄─── Authenticator trait, stub login
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState (catalog + stores)
//! │   ├── cart.rs     ◄─── CartStore
//! │   ├── favorites.rs◄─── FavoritesStore
//! │   ├── auth.rs     ◄─── AuthStore
//! │   └── persisted.rs◄─── lock, mutate, persist
//! ├── commands/       ◄─── One function per front-end action
//! ├── output.rs       ◄─── Text / JSON rendering
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod state;

use std::sync::Arc;

use despensa_core::validation::parse_quantity;
use despensa_core::ProfileUpdate;
use despensa_storage::{MemoryStore, SnapshotStore, SqliteStore, StorageConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use auth::StubAuthenticator;
use cli::{CartCommand, CatalogArgs, Cli, Command, FavoritesCommand, ProfileCommand};
use commands::catalog::CatalogQuery;
use config::{AppConfig, StorageBackend};
use error::{ApiError, ErrorCode};
use output::{emit, Message};
use state::AppState;

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Invocation                                        │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → despensa.toml → DESPENSA_* env → validate              │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber to stderr, RUST_LOG overrides the config       │
/// │                                                                         │
/// │  3. Open Storage ─────────────────────────────────────────────────────► │
/// │     • --ephemeral or backend = "memory": MemoryStore                    │
/// │     • otherwise SQLite in the data dir, migrations applied              │
/// │                                                                         │
/// │  4. Restore Stores ───────────────────────────────────────────────────► │
/// │     • Cart, Favorites, Auth from their snapshot slots                   │
/// │                                                                         │
/// │  5. Dispatch Command ─────────────────────────────────────────────────► │
/// │     • stores persist after every mutation                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    let config = AppConfig::load(cli.config.clone())?;
    init_tracing(&config.logging.filter);
    debug!(?config, "Configuration loaded");

    let state = open_state(&config, cli.ephemeral).await?;
    dispatch(&state, &config, cli.command, cli.json).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=despensa=trace` - Show trace for despensa crates only
/// - Default: the configured filter (`warn`)
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Opens the configured storage and restores every store.
pub async fn open_state(config: &AppConfig, ephemeral: bool) -> Result<AppState, ApiError> {
    let in_memory = ephemeral || config.storage.backend == StorageBackend::Memory;

    let storage: Arc<dyn SnapshotStore> = if in_memory {
        info!("Using in-memory storage, nothing will be saved");
        Arc::new(MemoryStore::new())
    } else {
        let path = config.database_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::new(
                    ErrorCode::StorageError,
                    format!("Could not create {}: {}", parent.display(), e),
                )
            })?;
        }
        info!(?path, "Using SQLite storage");
        Arc::new(SqliteStore::new(StorageConfig::new(path)).await?)
    };

    let authenticator = Arc::new(StubAuthenticator::new(config.login_delay()));
    Ok(AppState::init(storage, authenticator).await?)
}

/// Runs one parsed command against `state` and prints the response.
pub async fn dispatch(
    state: &AppState,
    config: &AppConfig,
    command: Command,
    json: bool,
) -> Result<(), ApiError> {
    match command {
        Command::Catalog(args) => run_catalog(state, config, args, json).await,

        Command::Cart { command } => {
            let cart = match command.unwrap_or(CartCommand::Show) {
                CartCommand::Show => commands::cart::get_cart(state).await,
                CartCommand::Add {
                    product_id,
                    quantity,
                } => {
                    let quantity = parse_quantity(&quantity)?;
                    commands::cart::add_to_cart(state, &product_id, quantity).await?
                }
                CartCommand::Remove { product_id } => {
                    commands::cart::remove_from_cart(state, &product_id).await
                }
                CartCommand::Set {
                    product_id,
                    quantity,
                } => {
                    let quantity = parse_quantity(&quantity)?;
                    commands::cart::update_cart_item(state, &product_id, quantity).await?
                }
                CartCommand::Clear => commands::cart::clear_cart(state).await,
                CartCommand::Toggle => commands::cart::toggle_cart(state).await,
            };
            emit(&cart, config, json)
        }

        Command::Favorites { command } => match command.unwrap_or(FavoritesCommand::List) {
            FavoritesCommand::List => {
                emit(&commands::favorites::list_favorites(state).await, config, json)
            }
            FavoritesCommand::Toggle { product_id } => {
                let change = commands::favorites::toggle_favorite(state, &product_id).await?;
                emit(&change, config, json)
            }
            FavoritesCommand::Add { product_id } => {
                let change = commands::favorites::add_favorite(state, &product_id).await?;
                emit(&change, config, json)
            }
            FavoritesCommand::Remove { product_id } => {
                let change = commands::favorites::remove_favorite(state, &product_id).await;
                emit(&change, config, json)
            }
        },

        Command::Login { email, password } => {
            let session = commands::auth::login(state, &email, &password).await?;
            emit(&session, config, json)
        }

        Command::Logout => emit(&commands::auth::logout(state).await, config, json),

        Command::Profile { command } => match command.unwrap_or(ProfileCommand::Show) {
            ProfileCommand::Show => emit(&commands::auth::get_session(state).await, config, json),
            ProfileCommand::Update {
                name,
                email,
                company,
                phone,
            } => {
                let update = ProfileUpdate {
                    name,
                    email,
                    company,
                    phone,
                };
                let session = commands::auth::update_profile(state, update).await?;
                emit(&session, config, json)
            }
        },

        Command::Reset => {
            state.reset().await;
            emit(
                &Message::new(format!(
                    "Cart, favorites and session cleared ({} storage)",
                    state.storage_backend()
                )),
                config,
                json,
            )
        }
    }
}

async fn run_catalog(
    state: &AppState,
    config: &AppConfig,
    args: CatalogArgs,
    json: bool,
) -> Result<(), ApiError> {
    if args.categories {
        let categories = commands::catalog::list_categories(state);
        return emit(categories.as_slice(), config, json);
    }

    if let Some(ref product_id) = args.product_id {
        let view = commands::catalog::get_product(state, product_id).await?;
        return emit(&view, config, json);
    }

    let query = CatalogQuery {
        category: args.category,
        search: args.search,
        featured_only: args.featured,
        in_stock_only: args.in_stock,
    };
    let views = commands::catalog::list_products(state, &query).await;
    emit(views.as_slice(), config, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.auth.login_delay_ms = 0;
        config
    }

    async fn exec(state: &AppState, args: &[&str]) -> Result<(), ApiError> {
        let mut argv = vec!["despensa", "--json"];
        argv.extend_from_slice(args);
        let cli = Cli::parse_from(argv);
        dispatch(state, &memory_config(), cli.command, cli.json).await
    }

    #[tokio::test]
    async fn test_dispatch_cart_flow() {
        let state = open_state(&memory_config(), false).await.unwrap();

        exec(&state, &["cart", "add", "aceite-oliva-virgen-5l", "2"]).await.unwrap();
        exec(&state, &["cart", "add", "jamon-serrano-loncheado"]).await.unwrap();
        assert_eq!(state.cart().total_price().await.to_string(), "82.48");

        exec(&state, &["cart", "set", "jamon-serrano-loncheado", "0"]).await.unwrap();
        assert_eq!(state.cart().total_items().await, 2);

        let err = exec(&state, &["cart", "add", "arroz-bomba", "dos"]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_dispatch_rejects_oversized_quantities() {
        let state = open_state(&memory_config(), true).await.unwrap();

        let err = exec(&state, &["cart", "add", "arroz-bomba", "9000000000000000000"])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        exec(&state, &["cart", "add", "arroz-bomba", "2"]).await.unwrap();
        let err = exec(&state, &["cart", "set", "arroz-bomba", "9000000000000000000"])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(state.cart().total_items().await, 2);
    }

    #[tokio::test]
    async fn test_dispatch_account_flow() {
        let state = open_state(&memory_config(), true).await.unwrap();

        let err = exec(&state, &["login", "cliente@example.com", "--password", "x"])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthenticated);

        exec(&state, &["login", "cliente@example.com", "--password", "password123"])
            .await
            .unwrap();
        exec(&state, &["profile", "update", "--phone", "+34 699 999 999"])
            .await
            .unwrap();
        let user = state.auth().current_user().await.unwrap();
        assert_eq!(user.phone, "+34 699 999 999");

        exec(&state, &["reset"]).await.unwrap();
        assert!(!state.auth().is_authenticated().await);
    }

    #[tokio::test]
    async fn test_sqlite_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = memory_config();
        config.storage.backend = StorageBackend::Sqlite;
        config.storage.data_dir = Some(dir.path().join("nested"));

        {
            let state = open_state(&config, false).await.unwrap();
            assert_eq!(state.storage_backend(), "sqlite");
            exec(&state, &["favorites", "toggle", "vinagre-jerez"]).await.unwrap();
            exec(&state, &["cart", "add", "arroz-bomba", "3"]).await.unwrap();
        }

        let state = open_state(&config, false).await.unwrap();
        assert!(state.favorites().is_favorite("vinagre-jerez").await);
        assert_eq!(state.cart().total_items().await, 3);
    }

    #[tokio::test]
    async fn test_catalog_commands() {
        let state = open_state(&memory_config(), true).await.unwrap();

        exec(&state, &["catalog"]).await.unwrap();
        exec(&state, &["catalog", "--categories"]).await.unwrap();
        exec(&state, &["catalog", "--search", "queso"]).await.unwrap();

        let err = exec(&state, &["catalog", "caviar"]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
