use crate::cli::RenderArgs;
use crate::config::ProjectConfig;
use crate::input;
use n1qlgen::{HistoryStore, InMemoryHistory, QueryModel};

pub fn run(args: RenderArgs, config: &ProjectConfig) -> anyhow::Result<()> {
    let raw = input::read_to_string(&args.input)?;
    let model = QueryModel::from_json(&raw)
        .map_err(|e| anyhow::anyhow!("invalid query model: {e}"))?;

    let formatted = args.formatted.unwrap_or(config.file.render.formatted);
    let query = n1qlgen::build(Some(&model), formatted);
    println!("{query}");

    if args.no_history || !config.file.history.record {
        return Ok(());
    }

    let path = config.history_path();
    let mut history = InMemoryHistory::with_capacity(config.file.history.max_entries);
    history
        .load_file(&path)
        .map_err(|e| anyhow::anyhow!("failed to load history {}: {e}", path.display()))?;
    history.record(&query, model.operation, model.bucket());
    history
        .save_file(&path)
        .map_err(|e| anyhow::anyhow!("failed to save history {}: {e}", path.display()))?;

    tracing::debug!(
        target: "n1qlgen.cli",
        path = %path.display(),
        entries = history.len(),
        "recorded query in history"
    );
    Ok(())
}
