use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use dealwatch::config::AppConfig;
use dealwatch::fetcher::PageFetcher;
use dealwatch::notifier::EmailNotifier;
use dealwatch::runner::CycleRunner;
use dealwatch::scheduler;

#[derive(Parser)]
#[command(name = "dealwatch", version, about = "Price-drop polling agent with email alerts")]
struct Cli {
    /// Run a single check cycle and exit instead of looping
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dealwatch=info".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!(error = %e, "dealwatch crashed");
        return Err(e);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::from_env()?;
    let items = config.tracked_items()?;

    info!("dealwatch started, tracking {} item(s)", items.len());

    let fetcher = PageFetcher::new(&config.fetcher)?;
    let notifier = EmailNotifier::new(config.smtp.clone());
    let runner = CycleRunner::new(items, fetcher, notifier, config.scheduler.item_delay())?;

    if cli.once {
        runner.run_cycle().await;
        return Ok(());
    }

    scheduler::run(&runner, config.scheduler.check_interval()).await?;
    Ok(())
}
