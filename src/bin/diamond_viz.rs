//! diamond-viz: diamond price predictor client
//!
//! - `ui` (default): interactive terminal page
//! - `predict`: one prediction printed to stdout
//! - `export`: standalone HTML page with the insight charts
//! - `status`: the prediction service banner
//!
//! Run: `diamond-viz --api-url http://localhost:5000`

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use diamond_viz::api::{HttpClient, PriceApi};
use diamond_viz::config::{Config, ENV_API_URI};
use diamond_viz::form::{FormEvent, ResultView, RESULT_CAPTION};
use diamond_viz::insights::PanelView;
use diamond_viz::output::HtmlExporter;
use diamond_viz::page::{execute, Page, PageEvent};
use diamond_viz::validation::FormFields;

/// Diamond price predictor client
#[derive(Parser, Debug)]
#[command(name = "diamond-viz")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Predict diamond prices and chart market insights", long_about = None)]
struct Cli {
    /// Config file path (default: <config_dir>/diamond-viz/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Prediction API base URL
    #[arg(long, global = true, env = ENV_API_URI)]
    api_url: Option<String>,

    /// Seed for offline insight data
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal UI logs nowhere otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Interactive terminal page (default)
    Ui,
    /// Predict the price of one diamond
    Predict(DiamondArgs),
    /// Write the page as standalone HTML
    Export {
        /// Output file
        #[arg(short, long)]
        out: PathBuf,

        /// Include a prediction for these attributes
        #[command(flatten)]
        diamond: DiamondArgs,
    },
    /// Show the prediction service banner
    Status,
}

#[derive(Args, Debug, Clone, Default)]
struct DiamondArgs {
    /// Weight in carats, e.g. 1.5
    #[arg(long)]
    carat: Option<String>,

    /// Cut grade (Fair, Good, Very Good, Premium, Ideal)
    #[arg(long)]
    cut: Option<String>,

    /// Color grade (D..J)
    #[arg(long)]
    color: Option<String>,

    /// Clarity grade (IF, VVS1, VVS2, VS1, VS2, SI1, SI2, I1)
    #[arg(long)]
    clarity: Option<String>,
}

impl DiamondArgs {
    fn is_empty(&self) -> bool {
        self.carat.is_none() && self.cut.is_none() && self.color.is_none() && self.clarity.is_none()
    }

    fn fields(&self) -> FormFields {
        FormFields::new(
            self.carat.as_deref().unwrap_or_default(),
            self.cut.as_deref().unwrap_or_default(),
            self.color.as_deref().unwrap_or_default(),
            self.clarity.as_deref().unwrap_or_default(),
        )
    }
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or(Cmd::Ui);

    init_logging(cli.log_file.as_deref(), matches!(command, Cmd::Ui))?;

    let config = load_config(&cli)?;
    let api = HttpClient::new(&config.api.base_url, config.timeout())
        .context("failed to create API client")?;
    info!(base_url = %api.base_url(), "using prediction service");

    match &command {
        Cmd::Ui => run_ui(&config, api),
        Cmd::Predict(diamond) => predict(&api, &config, diamond),
        Cmd::Export { out, diamond } => export(&api, &config, diamond, out),
        Cmd::Status => status(&api),
    }
}

/// `RUST_LOG` filter, default `warn`. The terminal UI only logs to a file.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if interactive => {}
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

/// File and environment, then command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::resolve(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(url) = &cli.api_url {
        config.api.base_url.clone_from(url);
    }
    if let Some(seed) = cli.seed {
        config.insights.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(feature = "tui")]
fn run_ui(config: &Config, api: HttpClient) -> Result<()> {
    use std::sync::Arc;

    let mut app = diamond_viz::tui::App::new(config, Arc::new(api));
    app.run()?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui(_config: &Config, _api: HttpClient) -> Result<()> {
    bail!("built without the `tui` feature; use `predict`, `export` or `status`")
}

/// Submit the page's form and apply the response.
fn submit(api: &dyn PriceApi, page: &mut Page) -> Result<()> {
    let validation = page.form().validation();
    if !validation.is_submittable() {
        let messages: Vec<String> = validation.errors().iter().map(ToString::to_string).collect();
        bail!("invalid input: {}", messages.join("; "));
    }
    if let Some(command) = page.apply(PageEvent::Form(FormEvent::Submit)) {
        let outcome = execute(api, &command);
        page.apply(outcome);
    }
    Ok(())
}

fn predict(api: &dyn PriceApi, config: &Config, diamond: &DiamondArgs) -> Result<()> {
    let mut page = Page::with_fields(config.insights.seed, diamond.fields());
    submit(api, &mut page)?;

    match page.form().display() {
        ResultView::Price { text, .. } => {
            println!("{RESULT_CAPTION}: {text}");
            Ok(())
        }
        _ => bail!(page.form().error().unwrap_or("no price returned").to_string()),
    }
}

fn export(api: &dyn PriceApi, config: &Config, diamond: &DiamondArgs, out: &Path) -> Result<()> {
    let mut page = Page::with_fields(config.insights.seed, diamond.fields());
    let mut exporter = HtmlExporter::new();

    if !diamond.is_empty() {
        submit(api, &mut page)?;
        if let Some(message) = page.form().error() {
            warn!(error = message, "exporting without a price");
            exporter = exporter.error(message);
        }
        if let (Some(attributes), Some(result)) =
            (page.form().validation().attributes(), page.form().price())
        {
            exporter = exporter.prediction(attributes, result);
        }
    }

    if let Some(command) = page.apply(PageEvent::ToggleInsights) {
        let outcome = execute(api, &command);
        page.apply(outcome);
    }
    if let PanelView::Ready { data, source } = page.insights().view() {
        exporter = exporter.insights(data.clone(), source);
    }

    exporter
        .write_to_file(out)
        .with_context(|| format!("cannot write {}", out.display()))?;
    println!("wrote {}", out.display());
    Ok(())
}

fn status(api: &HttpClient) -> Result<()> {
    let info = api
        .service_info()
        .with_context(|| format!("prediction service unreachable at {}", api.base_url()))?;
    println!("{} ({})", info.message, api.base_url());
    println!("model:   {}", info.model);
    println!("version: {}", info.version);
    Ok(())
}
