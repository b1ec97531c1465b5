//! Command dispatch: bridges CLI args -> API services -> output formatting.

pub mod auth;
pub mod catalog;
pub mod config_cmd;
pub mod customers;
pub mod employees;
pub mod products;
pub mod settings;
pub mod shops;
pub mod util;

use shopdesk_api::CoreApi;

use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    api: &CoreApi,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(api, args, cfg, global).await,
        Command::Logout => auth::logout(api, global).await,
        Command::Whoami => auth::whoami(api, global),
        Command::Profile(args) => auth::profile(api, args, global).await,
        Command::Shops(args) => shops::handle(api, args, global).await,
        Command::Employees(args) => employees::handle(api, args, global).await,
        Command::Products(args) => products::handle(api, args, global).await,
        Command::ProductMasters(args) => catalog::handle(api.product_masters(), args, global).await,
        Command::Customers(args) => customers::handle(api, args, global).await,
        Command::Categories(args) => catalog::handle(api.categories(), args, global).await,
        Command::Suppliers(args) => catalog::handle(api.suppliers(), args, global).await,
        Command::Warehouses(args) => catalog::handle(api.warehouses(), args, global).await,
        Command::Settings(args) => settings::handle(api, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
