use anyhow::{Context, Result};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::Path;

/// Send log output to `path`; the terminal itself belongs to the TUI.
///
/// Level defaults to `warn` and can be overridden through `RUST_LOG`.
pub fn init(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let mut builder = pretty_env_logger::formatted_builder();
    builder
        .filter_level(LevelFilter::Warn)
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Pipe(Box::new(file)));
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.try_init().context("Failed to initialise logger")?;
    Ok(())
}
