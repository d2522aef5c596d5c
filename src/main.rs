use cert_audit::cli::{Cli, OutputFormat};
use cert_audit::config::Settings;
use cert_audit::error::Result;
use cert_audit::runner;
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Install the ring crypto provider for rustls
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from_file(path)?,
        None => Settings::default(),
    };
    if let Some(host) = cli.host {
        settings.host = host;
    }
    if let Some(secs) = cli.timeout {
        settings.probe.connect_timeout_secs = secs;
        settings.probe.handshake_timeout_secs = secs;
    }

    // Fatal precondition: nothing runs without the asset root
    if !cli.dir.try_exists().unwrap_or(false) {
        println!(
            "{}",
            style(format!(
                "Certificate directory '{}' not found.",
                cli.dir.display()
            ))
            .red()
        );
        println!(
            "{}",
            style("Run the certificate generation script first to create certificates.").yellow()
        );
        return Ok(false);
    }

    let report = runner::run_audit(&settings, &cli.dir).await?;
    let passed = report.passed();

    match cli.format {
        OutputFormat::Json => report.print_json()?,
        OutputFormat::Table => {
            report.print();
            println!();
            if passed {
                println!("{}", style("All certificates are valid!").green());
            } else {
                println!(
                    "{}",
                    style("Some issues found - check the report above.").yellow()
                );
            }
        }
    }

    Ok(passed)
}
