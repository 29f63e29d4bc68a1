//! JobSpy MCP Server — entry point.

use std::sync::Arc;

use anyhow::Context;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use url::Url;

use jobspy_client::{scrape_jobs, HttpScrapeEngine, ScrapeEngine, SearchParams, Site};
use jobspy_mcp::config::resolve_endpoint;
use jobspy_mcp::protocol::ProtocolHandler;
use jobspy_mcp::tools::ToolRegistry;
use jobspy_mcp::transport::StdioTransport;

#[derive(Parser)]
#[command(
    name = "jobspy-mcp",
    about = "MCP server exposing the JobSpy job-board scraper as an agent tool",
    version
)]
struct Cli {
    /// JobSpy-compatible scrape endpoint URL.
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve {
        /// JobSpy-compatible scrape endpoint URL.
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Log level (trace, debug, info, warn, error).
        #[arg(long)]
        log_level: Option<String>,
    },

    /// Run a one-shot job search and print the JSON report.
    Search {
        #[command(flatten)]
        query: SearchArgs,

        /// JobSpy-compatible scrape endpoint URL.
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// Print server capabilities as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   jobspy-mcp completions bash > ~/.local/share/bash-completion/completions/jobspy-mcp
    ///   jobspy-mcp completions zsh > ~/.zfunc/_jobspy-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Main keyword for the job search.
    #[arg(short, long)]
    search_term: Option<String>,

    /// Location for the search (e.g. "New York, NY").
    #[arg(short, long)]
    location: Option<String>,

    /// Job site to scrape; repeat for several (indeed, linkedin,
    /// zip_recruiter, glassdoor, google, bayt, naukri).
    #[arg(long = "site")]
    site: Vec<String>,

    /// Country for Indeed/Glassdoor searches.
    #[arg(long)]
    country_indeed: Option<String>,

    /// Number of job results desired.
    #[arg(long)]
    results_wanted: Option<u32>,

    /// Only postings newer than this many hours.
    #[arg(long)]
    hours_old: Option<u32>,

    /// Search radius in miles.
    #[arg(long)]
    distance: Option<u32>,

    /// Skip the first N results.
    #[arg(long)]
    offset: Option<u32>,

    /// Job type filter (e.g. "fulltime", "internship").
    #[arg(long)]
    job_type: Option<String>,

    /// Only include remote jobs (true/false; unset means no filter).
    #[arg(long)]
    is_remote: Option<bool>,

    /// Filter for easy-apply jobs (true/false; unset means no filter).
    #[arg(long)]
    easy_apply: Option<bool>,

    /// Special query for Google Jobs.
    #[arg(long)]
    google_search_term: Option<String>,

    /// Fetch full LinkedIn job descriptions (slower).
    #[arg(long)]
    linkedin_fetch_description: bool,

    /// Convert pay to annual salary.
    #[arg(long)]
    enforce_annual_salary: bool,

    /// Engine verbosity level (0, 1, 2).
    #[arg(long)]
    verbose_level: Option<u8>,
}

impl SearchArgs {
    fn into_params(self) -> anyhow::Result<SearchParams> {
        let mut params = SearchParams::default();

        if let Some(term) = self.search_term {
            params.search_term = term;
        }
        if let Some(location) = self.location {
            params.location = location;
        }
        if !self.site.is_empty() {
            let sites = self
                .site
                .iter()
                .map(|s| s.parse::<Site>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| anyhow::anyhow!(e))?;
            params.site_name = Some(sites);
        }
        if let Some(country) = self.country_indeed {
            params.country_indeed = country;
        }
        if let Some(wanted) = self.results_wanted {
            params.results_wanted = wanted;
        }
        if let Some(hours) = self.hours_old {
            params.hours_old = hours;
        }
        if let Some(distance) = self.distance {
            params.distance = distance;
        }
        if let Some(offset) = self.offset {
            params.offset = offset;
        }
        if let Some(verbose) = self.verbose_level {
            params.verbose = verbose;
        }
        params.job_type = self.job_type;
        params.is_remote = self.is_remote;
        params.easy_apply = self.easy_apply;
        params.google_search_term = self.google_search_term;
        params.linkedin_fetch_description = self.linkedin_fetch_description;
        params.enforce_annual_salary = self.enforce_annual_salary;

        Ok(params)
    }
}

fn engine_for(endpoint: &str) -> anyhow::Result<HttpScrapeEngine> {
    let url = Url::parse(endpoint).with_context(|| format!("invalid endpoint URL: {endpoint}"))?;
    Ok(HttpScrapeEngine::new(url))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve {
        endpoint: None,
        log_level: None,
    }) {
        Commands::Serve {
            endpoint,
            log_level: _,
        } => {
            let endpoint = resolve_endpoint(endpoint.or(cli.endpoint).as_deref());
            tracing::info!("JobSpy MCP server");
            tracing::info!("Scrape endpoint: {endpoint}");
            let engine: Arc<dyn ScrapeEngine> = Arc::new(engine_for(&endpoint)?);
            let handler = ProtocolHandler::new(engine);
            let transport = StdioTransport::new(handler);
            transport.run().await?;
        }

        Commands::Search { query, endpoint } => {
            let endpoint = resolve_endpoint(endpoint.or(cli.endpoint).as_deref());
            let engine = engine_for(&endpoint)?;
            let params = query.into_params()?;
            let report = scrape_jobs(&engine, &params).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.success {
                std::process::exit(1);
            }
        }

        Commands::Info => {
            let capabilities = jobspy_mcp::types::InitializeResult::default_result();
            let tools = ToolRegistry::list_tools();
            let info = serde_json::json!({
                "server": capabilities.server_info,
                "protocol_version": capabilities.protocol_version,
                "capabilities": capabilities.capabilities,
                "tools": tools.iter().map(|t| &t.name).collect::<Vec<_>>(),
                "tool_count": tools.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "jobspy-mcp", &mut std::io::stdout());
        }
    }

    Ok(())
}
