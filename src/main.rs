use anyhow::{Context, Result};
use stagen::{Config, SystemRunner};

fn main() -> Result<()> {
    let config = Config::parse();
    stagen::logging::init(config.log_level)?;
    config.validate().context("Invalid configuration")?;

    let report = stagen::run(&config, &SystemRunner)?;

    tracing::info!(
        files = report.stats.file_pages,
        commits = report.stats.commit_pages,
        repositories = report.index.len(),
        "generation finished"
    );
    println!("Generated static git viewer in {}", config.out.display());

    if config.open {
        let page = config.index_root().join(stagen::index::INDEX_PAGE);
        if let Err(e) = open::that(&page) {
            tracing::warn!(path = %page.display(), error = %e, "failed to open browser");
        }
    }

    Ok(())
}
