//! Invoicer CLI

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    process,
    sync::Arc,
};

use clap::{Args, Parser, Subcommand};
use invoicer::{
    invoices::InvoiceId,
    products::{Product, ProductId},
};
use invoicer_app::{
    config::{BackendConfig, LoggingConfig},
    context::{AppContext, AppInitError},
    domain::{invoices::InvoicesServiceError, products::ProductsServiceError},
    notify::TracingNotifier,
    observability,
    readiness::{Readiness, ReadinessProbe, WAKING_NOTICE},
    render::{self, RenderError},
    views::{
        ComposeView, DashboardView, InvoicesView, ProductsView,
        compose::{AddItemError, SubmitError},
        products::ProductActionError,
    },
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "invoicer", about = "Invoicer CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    backend: BackendConfig,

    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Ping the backend until it is awake
    Wake,

    /// Show revenue, invoice, product and customer counts
    Dashboard,

    /// Manage the product catalog
    Products(ProductsCommand),

    /// List, show and create invoices
    Invoices(InvoicesCommand),
}

#[derive(Debug, Args)]
struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List every product
    List,

    /// Add a product
    Add(ProductArgs),

    /// Change a product's name and price
    Edit {
        /// Product identifier
        id: i64,

        #[command(flatten)]
        product: ProductArgs,
    },

    /// Delete a product
    Delete {
        /// Product identifier
        id: i64,
    },
}

#[derive(Debug, Args)]
struct ProductArgs {
    /// Product name
    #[arg(long)]
    name: String,

    /// Unit price
    #[arg(long)]
    price: Decimal,
}

#[derive(Debug, Args)]
struct InvoicesCommand {
    #[command(subcommand)]
    command: InvoicesSubcommand,
}

#[derive(Debug, Subcommand)]
enum InvoicesSubcommand {
    /// List every invoice
    List,

    /// Show one invoice with its lines
    Show {
        /// Invoice identifier
        id: i64,
    },

    /// Compose and submit an invoice
    Create(CreateInvoiceArgs),

    /// Email an invoice again
    #[command(hide = true)]
    Resend {
        /// Invoice identifier
        id: i64,
    },
}

#[derive(Debug, Args)]
struct CreateInvoiceArgs {
    /// Customer name
    #[arg(long)]
    name: Option<String>,

    /// Customer email
    #[arg(long)]
    email: Option<String>,

    /// Line as `<product-id>:<quantity>`; repeated lines for a product are merged
    #[arg(long = "item", value_parser = parse_item)]
    items: Vec<(i64, i64)>,

    /// YAML draft file with `customer_name`, `customer_email` and `items`
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct DraftFile {
    #[serde(default)]
    customer_name: String,

    #[serde(default)]
    customer_email: String,

    #[serde(default)]
    items: Vec<DraftFileItem>,
}

#[derive(Debug, Deserialize)]
struct DraftFileItem {
    product: i64,
    quantity: i64,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Init(#[from] AppInitError),

    #[error(transparent)]
    Products(#[from] ProductsServiceError),

    #[error(transparent)]
    ProductAction(#[from] ProductActionError),

    #[error(transparent)]
    Invoices(#[from] InvoicesServiceError),

    #[error(transparent)]
    AddItem(#[from] AddItemError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("invoice {0} not found")]
    InvoiceNotFound(InvoiceId),

    #[error("failed to read draft file {}", .path.display())]
    DraftFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse draft file {}", .path.display())]
    DraftFormat {
        path: PathBuf,
        #[source]
        source: serde_norway::Error,
    },
}

fn parse_item(value: &str) -> Result<(i64, i64), String> {
    let (product, quantity) = value
        .split_once(':')
        .ok_or_else(|| format!("expected <product-id>:<quantity>, got `{value}`"))?;

    let product = product
        .trim()
        .parse()
        .map_err(|error| format!("invalid product id `{product}`: {error}"))?;

    let quantity = quantity
        .trim()
        .parse()
        .map_err(|error| format!("invalid quantity `{quantity}`: {error}"))?;

    Ok((product, quantity))
}

fn read_draft_file(path: PathBuf) -> Result<DraftFile, CliError> {
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(source) => return Err(CliError::DraftFile { path, source }),
    };

    serde_norway::from_str(&contents).map_err(|source| CliError::DraftFormat { path, source })
}

#[tokio::main]
pub async fn main() {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    if let Err(init_error) = observability::init(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for init errors"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    if let Err(run_error) = run(cli).await {
        error!("{run_error}");

        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = AppContext::from_api_url(&cli.backend.api_url, Arc::new(TracingNotifier))?;

    let mut out = io::stdout().lock();

    if matches!(cli.command, Commands::Wake) {
        let readiness = wake(cli.backend.probe()).await;

        writeln!(out, "{}", describe(readiness)).map_err(RenderError::from)?;

        return Ok(());
    }

    if let Some(probe) = cli.backend.readiness_probe() {
        wake(probe).await;
    }

    match cli.command {
        Commands::Wake => Ok(()),
        Commands::Dashboard => {
            let stats = DashboardView::new(ctx).load().await;

            Ok(render::write_dashboard(&mut out, &stats)?)
        }
        Commands::Products(ProductsCommand { command }) => {
            run_products(ProductsView::new(ctx), command, &mut out).await
        }
        Commands::Invoices(InvoicesCommand { command }) => run_invoices(ctx, command, &mut out).await,
    }
}

async fn wake(probe: ReadinessProbe) -> Readiness {
    info!("{WAKING_NOTICE}");

    probe.wait().await
}

fn describe(readiness: Readiness) -> String {
    match readiness {
        Readiness::Awake(status) => format!("backend is awake ({status})"),
        Readiness::FellBack => "backend did not answer; continuing anyway".to_string(),
        Readiness::TimedOut => "backend did not answer in time; continuing anyway".to_string(),
    }
}

async fn run_products(
    mut view: ProductsView,
    command: ProductsSubcommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        ProductsSubcommand::List => {
            let products = view.load().await?;

            render::write_products(out, products)?;
        }
        ProductsSubcommand::Add(ProductArgs { name, price }) => {
            let created = view.add(&name, price).await?;

            render::write_products(out, &[created])?;
        }
        ProductsSubcommand::Edit { id, product } => {
            view.edit(Product::new(id, product.name, product.price))
                .await?;

            render::write_products(out, view.products())?;
        }
        ProductsSubcommand::Delete { id } => view.delete(ProductId::new(id)).await?,
    }

    Ok(())
}

async fn run_invoices(
    ctx: AppContext,
    command: InvoicesSubcommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        InvoicesSubcommand::List => {
            let mut view = InvoicesView::new(ctx);

            render::write_invoices(out, view.load().await?)?;
        }
        InvoicesSubcommand::Show { id } => {
            let id = InvoiceId::new(id);
            let mut view = InvoicesView::new(ctx);

            view.load().await?;

            let invoice = view.select(id).ok_or(CliError::InvoiceNotFound(id))?;

            render::write_invoice(out, invoice)?;
        }
        InvoicesSubcommand::Create(args) => create_invoice(ComposeView::new(ctx), args, out).await?,
        InvoicesSubcommand::Resend { id } => {
            InvoicesView::new(ctx).resend(InvoiceId::new(id)).await?;
        }
    }

    Ok(())
}

async fn create_invoice(
    mut view: ComposeView,
    args: CreateInvoiceArgs,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let file = args.file.map(read_draft_file).transpose()?;

    let mut lines: Vec<(i64, i64)> = Vec::new();
    let mut name = String::new();
    let mut email = String::new();

    if let Some(file) = file {
        name = file.customer_name;
        email = file.customer_email;
        lines.extend(file.items.iter().map(|item| (item.product, item.quantity)));
    }

    lines.extend(args.items);

    view.load_catalog().await?;

    for (product, quantity) in lines {
        view.select_product(Some(ProductId::new(product)));
        view.set_quantity(quantity);
        view.add_selected()?;
    }

    view.set_customer_name(args.name.unwrap_or(name));
    view.set_customer_email(args.email.unwrap_or(email));

    render::write_cart(&mut *out, view.cart())?;

    view.submit().await?;

    Ok(())
}
