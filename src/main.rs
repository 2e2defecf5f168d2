use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{ArgAction, Parser};
use gav_checker::check::Processor;
use gav_checker::config::{Config, DEFAULT_REPOSITORY_URL};
use gav_checker::output::{OutputFormat, Reporter};
use gav_checker::process::SystemCommandRunner;
use gav_checker::source::SourceRegistry;
use gav_checker::version::registries::MavenRegistry;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "gav-checker")]
#[command(
    version,
    about = "Check Maven dependencies' availability in a particular Maven repository"
)]
struct Cli {
    /// Dependencies as GroupId:ArtifactId[:Version], ex. org.slf4j:slf4j-api:2.0.12 or
    /// info.picocli:picocli. Without a version every published version is listed.
    /// URLs to pom.xml files, GitHub repositories or GitHub pull requests are expanded
    /// into the dependencies they name.
    gavs: Vec<String>,

    /// Maven repository root URL to search. A configured repository URL takes precedence.
    #[arg(short = 'r', long, default_value = DEFAULT_REPOSITORY_URL)]
    repository: String,

    /// Number of versions to list; negative lists all
    #[arg(short = 'n', long, default_value_t = -1, allow_negative_numbers = true)]
    limit: i32,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Human)]
    output_format: OutputFormat,

    /// Disable TLS validation on the remote Maven repository
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Read dependencies from stdin and check them one at a time
    #[arg(short = 'i', long)]
    interactive: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Path to a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Everything needed to check one batch of inputs
struct Session {
    sources: SourceRegistry,
    processor: Processor,
    reporter: Box<dyn Reporter>,
}

impl Session {
    fn new(cli: &Cli, config: Config) -> Self {
        let root = config.repository_root(&cli.repository);
        let insecure = cli.insecure || config.skip_tls_validation;
        debug!("Using repository {} (insecure: {})", root, insecure);

        let registry = Arc::new(MavenRegistry::with_options(
            &root,
            config.fetch.timeout_ms,
            insecure,
        ));
        Self {
            sources: SourceRegistry::with_defaults(Arc::new(SystemCommandRunner), config.manifest),
            processor: Processor::new(registry).with_max_concurrent(config.fetch.max_concurrent),
            reporter: cli.output_format.reporter(),
        }
    }

    /// Resolve, check and report `inputs`; returns the number of unavailable dependencies
    async fn check<S: AsRef<str>>(&self, inputs: &[S], count: i32) -> anyhow::Result<i32> {
        let resolved = self.sources.resolve_all(inputs).await;
        if resolved.gavs.is_empty() {
            bail!("No dependencies to check");
        }

        let report = self.processor.execute(&resolved.gavs).await;
        self.reporter
            .write_report(&report, count, &mut std::io::stdout().lock())
            .context("Failed to write report")?;
        Ok(report.exit_code())
    }

    async fn interactive(&self, count: i32) -> anyhow::Result<()> {
        let count = if count == -1 { 1 } else { count };
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        prompt()?;
        while let Some(line) = lines.next_line().await? {
            for token in line.split_whitespace() {
                println!("...");
                if let Err(e) = self.check(&[token], count).await {
                    error!("{:#}", e);
                }
            }
            prompt()?;
        }
        Ok(())
    }
}

fn prompt() -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "? ")?;
    stdout.flush()
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    if !cli.interactive && cli.gavs.is_empty() {
        bail!("No GAV arguments");
    }

    let config = Config::load(cli.config.as_deref())?;
    let session = Session::new(&cli, config);

    if cli.interactive {
        session.interactive(cli.limit).await?;
        return Ok(0);
    }
    session.check(&cli.gavs, cli.limit).await
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = gav_checker::logging::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let code = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))?;

    std::process::exit(code)
}
