use clap::Parser;

pub mod cli;
pub mod commands;
pub mod domain;
pub mod market;
pub mod services;

pub use cli::*;
pub use domain::models::*;
pub use market::*;
pub use services::auth::*;
pub use services::catalog::*;
pub use services::favorites::*;
pub use services::output::*;
pub use services::search::*;
pub use services::storage::*;

use commands::{handle_account_commands, handle_catalog_commands};

fn main() {
    let cli = Cli::parse();
    let json = cli.json;
    if let Err(e) = run(&cli) {
        print_err(json, error_code(&e), &format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let base = resolve_api_base(cli.api.as_deref());
    let api = Api::new(&base);

    // Account commands never need the catalog or local state.
    if handle_account_commands(cli, &api)? {
        return Ok(());
    }

    let mut state = load_state()?;
    handle_catalog_commands(cli, &mut state, &api)
}
