//! fitclub-report - runs the fitness-club query catalog and saves the results as JSON.

mod cli;

use cli::Cli;
use fitclub_report::config::Config;
use fitclub_report::{export, logging, QueryRunner, ReportError, Result};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init_stderr_logging();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;
    let settings = cli.report_settings(&config.report);

    let connection = cli.resolve_connection(&config)?.ok_or_else(|| {
        ReportError::config(
            "No database connection configured. Pass a connection string, use -c NAME, or set DATABASE_URL",
        )
    })?;

    let runner = QueryRunner::connect(&connection).await?;

    let outcome = match runner.run_all(settings.section_id).await {
        Ok(report) => export::save_to_json(&report, &settings.output),
        Err(e) => Err(e),
    };

    let closed = runner.close().await;
    outcome.and(closed)
}
