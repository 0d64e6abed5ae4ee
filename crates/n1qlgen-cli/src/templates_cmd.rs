use crate::cli::{TemplatesAction, TemplatesArgs};
use crate::config::ProjectConfig;
use crate::input;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use n1qlgen::{InMemoryTemplates, QueryTemplate, TemplateDraft, TemplateStore};

pub fn run(args: TemplatesArgs, config: &ProjectConfig) -> anyhow::Result<()> {
    let path = config.templates_path();
    let mut store = InMemoryTemplates::new();
    store
        .load_file(&path)
        .map_err(|e| anyhow::anyhow!("failed to load templates {}: {e}", path.display()))?;

    match args.action {
        TemplatesAction::List { category } => {
            let templates: Vec<&QueryTemplate> = match category.as_deref() {
                Some(category) => {
                    let found = store.by_category(category);
                    if found.is_empty() {
                        anyhow::bail!(
                            "no templates in category {category} (known: {})",
                            store.categories().join(", ")
                        );
                    }
                    found
                }
                None => store.all().iter().collect(),
            };
            print_templates(&templates);
            return Ok(());
        }
        TemplatesAction::Show(id) => {
            store.mark_used(&id)?;
            let Some(template) = store.get(&id) else {
                anyhow::bail!("template {id} not found");
            };
            println!("-- {} [{}]", template.name, template.category);
            if !template.description.is_empty() {
                println!("-- {}", template.description);
            }
            println!("{}", template.query);
        }
        TemplatesAction::Add {
            name,
            category,
            description,
            file,
        } => {
            let query = input::read_to_string(&file)?;
            let id = store.add(TemplateDraft {
                name,
                query: query.trim_end().to_string(),
                description,
                category,
            })?;
            println!("added template {id}");
        }
        TemplatesAction::Remove(id) => {
            let removed = store.remove(&id)?;
            println!("removed template {} ({})", removed.id, removed.name);
        }
    }

    store
        .save_file(&path)
        .map_err(|e| anyhow::anyhow!("failed to save templates {}: {e}", path.display()))?;
    tracing::debug!(target: "n1qlgen.cli", path = %path.display(), "templates saved");
    Ok(())
}

fn print_templates(templates: &[&QueryTemplate]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Name", "Category", "Uses", "Description"]);

    for t in templates {
        let id = if t.built_in {
            Cell::new(&t.id).fg(Color::Cyan)
        } else {
            Cell::new(&t.id).fg(Color::Green)
        };
        table.add_row(vec![
            id,
            Cell::new(&t.name),
            Cell::new(&t.category),
            Cell::new(t.use_count),
            Cell::new(&t.description).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
}
