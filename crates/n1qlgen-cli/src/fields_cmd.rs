use crate::cli::{FieldsArgs, FieldsMode};
use crate::input;
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};
use n1qlgen::fields;

pub fn run(args: FieldsArgs) -> anyhow::Result<()> {
    let raw = input::read_to_string(&args.input)?;
    if !fields::is_valid_json(&raw) {
        anyhow::bail!("sample document is not valid JSON");
    }

    match args.mode {
        FieldsMode::Paths => {
            for path in fields::extract_field_paths(&raw) {
                println!("{path}");
            }
        }
        FieldsMode::Names => {
            for name in fields::extract_field_names(&raw) {
                println!("{name}");
            }
        }
        FieldsMode::Types => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["Field", "Type"]);
            for (path, kind) in fields::extract_fields_with_types(&raw) {
                table.add_row(vec![Cell::new(path), Cell::new(kind.as_str())]);
            }
            println!("{table}");
        }
    }
    Ok(())
}
