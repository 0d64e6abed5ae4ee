use crate::cli::{HistoryAction, HistoryArgs};
use crate::config::ProjectConfig;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use n1qlgen::{HistoryEntry, HistoryStore, InMemoryHistory};
use uuid::Uuid;

/// Length of the id prefix shown in listings.
const SHORT_ID: usize = 8;

pub fn run(args: HistoryArgs, config: &ProjectConfig) -> anyhow::Result<()> {
    let path = config.history_path();
    let mut history = InMemoryHistory::with_capacity(config.file.history.max_entries);
    history
        .load_file(&path)
        .map_err(|e| anyhow::anyhow!("failed to load history {}: {e}", path.display()))?;

    match args.action {
        HistoryAction::List => {
            print_entries(history.entries().iter());
            return Ok(());
        }
        HistoryAction::Search(term) => {
            print_entries(history.search(&term).into_iter());
            return Ok(());
        }
        HistoryAction::Favorite(raw) => {
            let id = resolve_id(&history, &raw)?;
            let favorite = history.toggle_favorite(id)?;
            let state = if favorite { "marked" } else { "unmarked" };
            println!("{state} {id} as favorite");
        }
        HistoryAction::Remove(raw) => {
            let id = resolve_id(&history, &raw)?;
            let entry = history.remove(id)?;
            println!("removed {}: {}", entry.id, entry.preview());
        }
        HistoryAction::Clear => {
            let before = history.len();
            history.clear();
            println!(
                "removed {} entries ({} favorites kept)",
                before - history.len(),
                history.len()
            );
        }
    }

    history
        .save_file(&path)
        .map_err(|e| anyhow::anyhow!("failed to save history {}: {e}", path.display()))?;
    tracing::debug!(target: "n1qlgen.cli", path = %path.display(), "history saved");
    Ok(())
}

/// Accept a full UUID or a unique prefix of one.
fn resolve_id(history: &InMemoryHistory, raw: &str) -> anyhow::Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(raw) {
        return Ok(id);
    }
    let prefix = raw.trim().to_ascii_lowercase();
    if prefix.is_empty() {
        anyhow::bail!("history id must not be empty");
    }

    let matches: Vec<Uuid> = history
        .entries()
        .iter()
        .map(|e| e.id)
        .filter(|id| id.to_string().starts_with(&prefix))
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => anyhow::bail!("no history entry matches {raw}"),
        _ => anyhow::bail!("history id prefix {raw} is ambiguous ({} matches)", matches.len()),
    }
}

fn print_entries<'a>(entries: impl Iterator<Item = &'a HistoryEntry>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Time", "Op", "Bucket", "Fav", "Query"]);

    let mut count = 0;
    for entry in entries {
        count += 1;
        let short: String = entry.id.to_string().chars().take(SHORT_ID).collect();
        let fav = if entry.favorite {
            Cell::new("*").fg(Color::Yellow)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            Cell::new(short).fg(Color::DarkGrey),
            Cell::new(entry.formatted_timestamp()),
            Cell::new(entry.operation.keyword()),
            Cell::new(&entry.bucket),
            fav,
            Cell::new(entry.preview()),
        ]);
    }

    if count == 0 {
        println!("(no history)");
    } else {
        println!("{table}");
    }
}
