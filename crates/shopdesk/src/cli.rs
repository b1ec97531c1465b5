//! Clap derive structures for the `shopdesk` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Only clap types appear here so `build.rs` can include this file.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// shopdesk -- admin CLI for the shopdesk point-of-sale backend
#[derive(Debug, Parser)]
#[command(
    name = "shopdesk",
    version,
    about = "Manage shopdesk shops, staff, products, and customers from the command line",
    long_about = "Administer a shopdesk point-of-sale backend.\n\n\
        Log in once with `shopdesk login`; the session is kept per profile\n\
        and reused until the backend rejects it.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "SHOPDESK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, env = "SHOPDESK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Customer-facing site URL used for join links (overrides profile)
    #[arg(long, env = "SHOPDESK_DOMAIN_URL", global = true)]
    pub domain_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SHOPDESK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "SHOPDESK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "SHOPDESK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session for this profile
    Login(LoginArgs),

    /// End the session for this profile
    Logout,

    /// Show who the stored session belongs to
    Whoami,

    /// View or edit your own account
    Profile(ProfileArgs),

    /// Manage shops
    #[command(alias = "shop")]
    Shops(ShopsArgs),

    /// Manage shop employees
    #[command(alias = "emp")]
    Employees(EmployeesArgs),

    /// Manage shop products
    #[command(alias = "prod")]
    Products(ProductsArgs),

    /// Manage the platform product catalog
    ProductMasters(CatalogArgs),

    /// Manage customers and registrations
    #[command(alias = "cust")]
    Customers(CustomersArgs),

    /// Manage product categories
    Categories(CatalogArgs),

    /// Manage suppliers
    Suppliers(CatalogArgs),

    /// Manage warehouses
    Warehouses(CatalogArgs),

    /// View and change platform settings
    Settings(SettingsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Shared pagination and filtering arguments for all list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page number, starting at 1
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Max results per page
    #[arg(long, short = 'l', default_value = "25")]
    pub size: u32,

    /// Fetch all pages automatically
    #[arg(long, short = 'a')]
    pub all: bool,

    /// Free-text search term
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Status filter (e.g. ACTIVE, PENDING)
    #[arg(long)]
    pub status: Option<String>,
}

/// JSON payload file shared by create/update commands.
#[derive(Debug, Args)]
pub struct PayloadArgs {
    /// Read the request body from a JSON file; flags override its fields
    #[arg(long, short = 'F', value_name = "FILE")]
    pub from_file: Option<PathBuf>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH / PROFILE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (defaults to the profile's username, then a prompt)
    #[arg(long, short = 'u')]
    pub username: Option<String>,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show your account details
    Show,

    /// Update your contact details
    Update {
        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        full_name: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Change your password (prompts for current and new)
    Password,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SHOPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ShopsArgs {
    #[command(subcommand)]
    pub command: ShopsCommand,
}

/// Fields shared by shop create and update.
#[derive(Debug, Args)]
pub struct ShopFields {
    #[arg(long)]
    pub name: Option<String>,

    /// URL handle used in join links
    #[arg(long)]
    pub slug: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[command(flatten)]
    pub payload: PayloadArgs,
}

/// Shop config fields; anything not given is sent back unchanged.
#[derive(Debug, Args)]
pub struct ShopConfigFields {
    #[arg(long)]
    pub address: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    /// Opening time (HH:MM)
    #[arg(long)]
    pub open: Option<String>,

    /// Closing time (HH:MM)
    #[arg(long)]
    pub close: Option<String>,

    /// Whether the shop accepts orders
    #[arg(long, action = clap::ArgAction::Set)]
    pub active: Option<bool>,

    #[arg(long, action = clap::ArgAction::Set)]
    pub notify_email: Option<bool>,

    #[arg(long, action = clap::ArgAction::Set)]
    pub notify_sms: Option<bool>,

    #[arg(long)]
    pub locale: Option<String>,

    #[arg(long)]
    pub currency: Option<String>,

    #[arg(long)]
    pub theme: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ShopsCommand {
    /// List all shops
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get shop details
    Get {
        /// Shop ID
        id: String,
    },

    /// List shops owned by the logged-in user (or --owner)
    Mine {
        /// Owner user ID (defaults to the session's user)
        #[arg(long)]
        owner: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Create a shop
    Create(ShopFields),

    /// Update a shop
    Update {
        /// Shop ID
        id: String,

        #[command(flatten)]
        fields: ShopFields,
    },

    /// Delete a shop
    #[command(alias = "rm")]
    Delete {
        /// Shop ID
        id: String,
    },

    /// Show a shop's configuration
    Config {
        /// Shop ID
        id: String,
    },

    /// Change selected configuration fields
    SetConfig {
        /// Shop ID
        id: String,

        #[command(flatten)]
        fields: ShopConfigFields,
    },

    /// Upload the shop avatar image (max 5 MiB)
    UploadAvatar {
        /// Shop ID
        id: String,

        /// Image file
        file: PathBuf,
    },

    /// Upload the shop cover image (max 5 MiB)
    UploadCover {
        /// Shop ID
        id: String,

        /// Image file
        file: PathBuf,
    },

    /// Print the customer self-registration link
    JoinLink {
        /// Shop ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EMPLOYEES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EmployeesArgs {
    #[command(subcommand)]
    pub command: EmployeesCommand,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EmployeeRoleArg {
    Manager,
    Cashier,
    StockKeeper,
    Staff,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EmployeeStatusArg {
    Active,
    Inactive,
    Suspended,
}

#[derive(Debug, Args)]
pub struct EmployeeFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Role (repeatable)
    #[arg(long = "role", value_enum)]
    pub roles: Vec<EmployeeRoleArg>,

    /// Prompt for an initial password
    #[arg(long)]
    pub set_password: bool,

    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Debug, Subcommand)]
pub enum EmployeesCommand {
    /// List a shop's employees
    #[command(alias = "ls")]
    List {
        /// Shop ID
        #[arg(long, required = true)]
        shop: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Get employee details
    Get {
        /// Employee ID
        id: String,
    },

    /// Add an employee to a shop
    Add {
        /// Shop ID
        #[arg(long, required = true)]
        shop: String,

        #[command(flatten)]
        fields: EmployeeFields,
    },

    /// Update an employee
    Update {
        /// Employee ID
        id: String,

        #[command(flatten)]
        fields: EmployeeFields,
    },

    /// Change an employee's status
    Status {
        /// Employee ID
        id: String,

        #[arg(value_enum)]
        status: EmployeeStatusArg,
    },

    /// Remove an employee
    #[command(alias = "rm")]
    Remove {
        /// Employee ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PRODUCTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products
    #[command(alias = "ls")]
    List {
        /// Only products of this shop
        #[arg(long)]
        shop: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Get product details
    Get {
        /// Product ID
        id: String,
    },

    /// Create a product
    Create(NamedFields),

    /// Update a product
    Update {
        /// Product ID
        id: String,

        #[command(flatten)]
        fields: NamedFields,
    },

    /// Delete a product
    #[command(alias = "rm")]
    Delete {
        /// Product ID
        id: String,
    },

    /// Upload the product image (max 5 MiB)
    UploadImage {
        /// Product ID
        id: String,

        /// Image file
        file: PathBuf,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CATALOG (product masters, categories, suppliers, warehouses)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

/// Common fields; anything else goes through `--from-file` or `--set`.
#[derive(Debug, Args)]
pub struct NamedFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Extra field as key=value (repeatable, value parsed as JSON if possible)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// List entries
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get one entry
    Get {
        /// Entry ID
        id: String,
    },

    /// Create an entry
    Create(NamedFields),

    /// Update an entry
    Update {
        /// Entry ID
        id: String,

        #[command(flatten)]
        fields: NamedFields,
    },

    /// Delete an entry
    #[command(alias = "rm")]
    Delete {
        /// Entry ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CUSTOMERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CustomersArgs {
    #[command(subcommand)]
    pub command: CustomersCommand,
}

#[derive(Debug, Subcommand)]
pub enum CustomersCommand {
    /// List customers
    #[command(alias = "ls")]
    List {
        /// Only customers of this shop
        #[arg(long)]
        shop: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Get customer details
    Get {
        /// Customer ID
        id: String,
    },

    /// Register a customer against a shop's join link
    Register {
        /// Shop slug from the join link
        #[arg(long, required = true)]
        shop_slug: String,

        #[arg(long, required = true)]
        name: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },

    /// Approve a pending customer
    Approve {
        /// Customer ID
        id: String,
    },

    /// Reject a pending customer
    Reject {
        /// Customer ID
        id: String,

        /// Reason shown to the customer
        #[arg(long)]
        reason: Option<String>,
    },

    /// Delete a customer
    #[command(alias = "rm")]
    Delete {
        /// Customer ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SETTINGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// List all settings
    #[command(alias = "ls")]
    List,

    /// Get one setting
    Get {
        /// Setting key
        key: String,
    },

    /// Change a setting
    Set {
        /// Setting key
        key: String,

        /// New value (parsed as JSON if possible, otherwise a string)
        value: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key (api_url, domain_url, username, insecure, timeout, ca_cert)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store the active profile's password in the system keyring
    SetPassword,

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
