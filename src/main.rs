mod cli;
mod handlers;
mod http;
mod importer;
mod init;
mod manager;
mod models;
mod search;

use std::sync::Arc;

use clap::Parser;

use cli::Commands;
use handlers::{Consts, Ctx};
use manager::Manager;

#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() {
    init::init_logger();

    let cli = cli::Cli::parse();

    // Generate a new config file.
    if let Some(Commands::NewConfig { path }) = &cli.command {
        match init::generate_config(path) {
            Ok(_) => {
                log::info!("config file generated: {}", path.display());
            }
            Err(e) => {
                log::error!("error generating config: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // Load config and the dataset. Everything below needs both.
    let config = init::init_config(&cli.config, cli.data.as_deref());
    let mgr = match init::init_data(&config) {
        Ok(m) => m,
        Err(e) => {
            log::error!("error loading dataset '{}': {}", config.data.path, e);
            std::process::exit(1);
        }
    };

    match cli.command {
        // Search and print results.
        Some(Commands::Search { query }) => {
            print_search(&mgr, &query);
            return;
        }

        // Print autocomplete suggestions.
        Some(Commands::Suggest { query, max }) => {
            print_suggest(&mgr, &query, max);
            return;
        }

        Some(Commands::NewConfig { .. }) | None => {}
    }

    // Initialize site templates (embedded).
    let tpl = match init::init_templates() {
        Ok(t) => Arc::new(t),
        Err(e) => {
            log::error!("error loading templates: {}", e);
            std::process::exit(1);
        }
    };

    // Setup the global app context used in HTTP handlers.
    let ctx = Arc::new(Ctx {
        mgr: Arc::new(mgr),
        tpl,

        // Global constants.
        consts: Consts {
            root_url: config.app.root_url,
            num_suggestions: config.search.num_suggestions,
            max_suggestions: config.search.max_suggestions,
        },

        version: env!("VERSION").to_string(),
    });

    // Start the HTTP server.
    let routes = http::init_handlers(ctx);
    let addr = config.app.address;

    log::info!("starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("error listening on {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, routes).await {
        log::error!("server error: {}", e);
        std::process::exit(1);
    }
}

/// Print ranked search results, one JSON object per line.
fn print_search(mgr: &Manager, query: &str) {
    let res = mgr.search(query);
    for h in &res.results {
        let line = serde_json::json!({
            "tier": h.tier,
            "id": h.record.id,
            "name": h.record.name,
        });
        println!("{}", line);
    }
    log::info!("{} result(s) for '{}'", res.total, query);
}

/// Print suggestions, one JSON object per line.
fn print_suggest(mgr: &Manager, query: &str, max: usize) {
    for s in mgr.suggest(query, max) {
        let line = serde_json::json!({
            "reason": s.reason,
            "id": s.record.id,
            "name": s.record.name,
        });
        println!("{}", line);
    }
}
