//! # Slide CLI
//!
//! Replays an editor script and exports the resulting page.

use anyhow::Context;
use clap::Parser;
use slide_cli::{CliArgs, Script, ScriptRunner};
use slide_renderer::{ExportFormat, SlideExporter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,slide_core=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    // Use JSON format for machine consumption (RUST_LOG_FORMAT=json)
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = args
        .editor_config()
        .context("failed to load editor config")?;
    let script = Script::load(&args.script)
        .with_context(|| format!("failed to load script {}", args.script.display()))?;

    tracing::info!(steps = script.steps.len(), "replaying script");
    let mut runner = ScriptRunner::new(config);
    let summary = runner.run(&script)?;
    tracing::debug!(?summary, "replay complete");

    let state = runner.store().state();
    if args.print_state {
        println!("{}", state.to_pretty_json()?);
    }

    let exporter = SlideExporter::new(args.export_config(runner.config()));
    if let Some(path) = &args.png {
        exporter
            .write_png(state, path)
            .with_context(|| format!("failed to export {}", path.display()))?;
    }
    if let Some(path) = &args.svg {
        let svg = exporter.export(state, ExportFormat::Svg)?;
        std::fs::write(path, svg).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote svg export");
    }

    Ok(())
}
