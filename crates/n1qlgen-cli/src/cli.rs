use std::path::PathBuf;

pub const DEFAULT_CONFIG: &str = "n1qlgen.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Render,
    Fields,
    History,
    Templates,
    Init,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Render(RenderArgs),
    Fields(FieldsArgs),
    History(HistoryArgs),
    Templates(TemplatesArgs),
    Init(InitArgs),
}

/// Where to read a document from: a file path or `-` for stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn parse(v: &str) -> Self {
        if v == "-" {
            Input::Stdin
        } else {
            Input::File(PathBuf::from(v))
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderArgs {
    pub config: PathBuf,
    pub input: Input,
    /// `None` means use the configured layout.
    pub formatted: Option<bool>,
    pub no_history: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldsMode {
    Paths,
    Names,
    Types,
}

#[derive(Debug, Clone)]
pub struct FieldsArgs {
    pub input: Input,
    pub mode: FieldsMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryAction {
    List,
    Search(String),
    Favorite(String),
    Remove(String),
    Clear,
}

#[derive(Debug, Clone)]
pub struct HistoryArgs {
    pub config: PathBuf,
    pub action: HistoryAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatesAction {
    List {
        category: Option<String>,
    },
    Show(String),
    Add {
        name: String,
        category: String,
        description: String,
        file: Input,
    },
    Remove(String),
}

#[derive(Debug, Clone)]
pub struct TemplatesArgs {
    pub config: PathBuf,
    pub action: TemplatesAction,
}

#[derive(Debug, Clone)]
pub struct InitArgs {
    pub config: PathBuf,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" => Ok(Command::Help(HelpTopic::Root)),
        "render" => parse_render(it.map(|s| s.as_str())),
        "fields" => parse_fields(it.map(|s| s.as_str())),
        "history" => parse_history(it.map(|s| s.as_str())),
        "templates" => parse_templates(it.map(|s| s.as_str())),
        "init" => parse_init(it.map(|s| s.as_str())),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

/// Handle `--config <FILE>` / `--config=<FILE>`. Returns `false` if `token`
/// is not a config flag.
fn take_config<'a>(
    token: &str,
    it: &mut impl Iterator<Item = &'a str>,
    config: &mut PathBuf,
) -> anyhow::Result<bool> {
    if token == "--config" {
        let Some(v) = it.next() else {
            anyhow::bail!("--config requires a value");
        };
        *config = PathBuf::from(v);
        return Ok(true);
    }
    if let Some(v) = token.strip_prefix("--config=") {
        *config = PathBuf::from(v);
        return Ok(true);
    }
    Ok(false)
}

fn take_value<'a>(flag: &str, it: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<String> {
    let Some(v) = it.next() else {
        anyhow::bail!("{flag} requires a value");
    };
    Ok(v.to_string())
}

fn is_flag(token: &str) -> bool {
    token.starts_with("--") || (token.starts_with('-') && token != "-")
}

fn parse_render<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config = PathBuf::from(DEFAULT_CONFIG);
    let mut input: Option<Input> = None;
    let mut formatted: Option<bool> = None;
    let mut no_history = false;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Render)),
            "--compact" => formatted = Some(false),
            "--formatted" => formatted = Some(true),
            "--no-history" => no_history = true,
            _ if take_config(token, &mut it, &mut config)? => {}
            other if is_flag(other) => anyhow::bail!("unknown argument: {other}"),
            other => {
                if input.is_some() {
                    anyhow::bail!("render takes a single model file");
                }
                input = Some(Input::parse(other));
            }
        }
    }

    let Some(input) = input else {
        anyhow::bail!("render requires a model file (use `-` for stdin)");
    };

    Ok(Command::Render(RenderArgs {
        config,
        input,
        formatted,
        no_history,
    }))
}

fn parse_fields<'a>(it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut input: Option<Input> = None;
    let mut mode = FieldsMode::Paths;

    for token in it {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Fields)),
            "--names" => mode = FieldsMode::Names,
            "--types" => mode = FieldsMode::Types,
            "--paths" => mode = FieldsMode::Paths,
            other if is_flag(other) => anyhow::bail!("unknown argument: {other}"),
            other => {
                if input.is_some() {
                    anyhow::bail!("fields takes a single sample file");
                }
                input = Some(Input::parse(other));
            }
        }
    }

    let Some(input) = input else {
        anyhow::bail!("fields requires a sample document (use `-` for stdin)");
    };

    Ok(Command::Fields(FieldsArgs { input, mode }))
}

fn parse_history<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config = PathBuf::from(DEFAULT_CONFIG);
    let mut subcmd: Option<&str> = None;
    let mut operand: Option<String> = None;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::History)),
            "list" | "search" | "favorite" | "remove" | "clear" if subcmd.is_none() => {
                subcmd = Some(token);
            }
            _ if take_config(token, &mut it, &mut config)? => {}
            other if is_flag(other) => anyhow::bail!("unknown argument: {other}"),
            other => {
                if subcmd.is_none() {
                    anyhow::bail!("unknown subcommand: {other}");
                }
                if operand.is_some() {
                    anyhow::bail!("unexpected argument: {other}");
                }
                operand = Some(other.to_string());
            }
        }
    }

    let action = match subcmd.unwrap_or("list") {
        "list" | "clear" if operand.is_some() => {
            anyhow::bail!("history {} takes no arguments", subcmd.unwrap_or("list"))
        }
        "list" => HistoryAction::List,
        "clear" => HistoryAction::Clear,
        "search" => HistoryAction::Search(required(operand, "history search requires <TERM>")?),
        "favorite" => HistoryAction::Favorite(required(operand, "history favorite requires <ID>")?),
        "remove" => HistoryAction::Remove(required(operand, "history remove requires <ID>")?),
        other => anyhow::bail!("unknown subcommand: {other}"),
    };

    Ok(Command::History(HistoryArgs { config, action }))
}

fn parse_templates<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config = PathBuf::from(DEFAULT_CONFIG);
    let mut subcmd: Option<&str> = None;
    let mut operand: Option<String> = None;

    let mut category: Option<String> = None;
    let mut name: Option<String> = None;
    let mut description = String::new();

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Templates)),
            "list" | "show" | "add" | "remove" if subcmd.is_none() => {
                subcmd = Some(token);
            }
            "--category" => category = Some(take_value(token, &mut it)?),
            _ if token.starts_with("--category=") => {
                category = Some(token.trim_start_matches("--category=").to_string());
            }
            "--name" => name = Some(take_value(token, &mut it)?),
            _ if token.starts_with("--name=") => {
                name = Some(token.trim_start_matches("--name=").to_string());
            }
            "--description" => description = take_value(token, &mut it)?,
            _ if token.starts_with("--description=") => {
                description = token.trim_start_matches("--description=").to_string();
            }
            _ if take_config(token, &mut it, &mut config)? => {}
            other if is_flag(other) => anyhow::bail!("unknown argument: {other}"),
            other => {
                if subcmd.is_none() {
                    anyhow::bail!("unknown subcommand: {other}");
                }
                if operand.is_some() {
                    anyhow::bail!("unexpected argument: {other}");
                }
                operand = Some(other.to_string());
            }
        }
    }

    let action = match subcmd.unwrap_or("list") {
        "list" => {
            if let Some(other) = operand {
                anyhow::bail!("unexpected argument: {other}");
            }
            TemplatesAction::List { category }
        }
        "show" => TemplatesAction::Show(required(operand, "templates show requires <ID>")?),
        "remove" => TemplatesAction::Remove(required(operand, "templates remove requires <ID>")?),
        "add" => {
            let Some(name) = name else {
                anyhow::bail!("templates add requires --name");
            };
            let Some(category) = category else {
                anyhow::bail!("templates add requires --category");
            };
            let file = required(operand, "templates add requires a query file")?;
            TemplatesAction::Add {
                name,
                category,
                description,
                file: Input::parse(&file),
            }
        }
        other => anyhow::bail!("unknown subcommand: {other}"),
    };

    Ok(Command::Templates(TemplatesArgs { config, action }))
}

fn parse_init<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config = PathBuf::from(DEFAULT_CONFIG);

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Init)),
            _ if take_config(token, &mut it, &mut config)? => {}
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    Ok(Command::Init(InitArgs { config }))
}

fn required(v: Option<String>, msg: &str) -> anyhow::Result<String> {
    match v {
        Some(v) => Ok(v),
        None => anyhow::bail!("{msg}"),
    }
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
n1qlgen - render N1QL queries from structured query models

USAGE:
  n1qlgen <COMMAND> [OPTIONS]

COMMANDS:
  render        Render a JSON query model as N1QL
  fields        List field paths found in a sample document
  history       Browse and manage rendered query history
  templates     Browse and manage query templates
  init          Write a default n1qlgen.toml

Run `n1qlgen <command> --help` for more."
            );
        }
        HelpTopic::Render => {
            println!(
                "\
USAGE:
  n1qlgen render <MODEL.json|-> [OPTIONS]

OPTIONS:
  --config <FILE>       Config file path (default: n1qlgen.toml)
  --formatted           One clause per line
  --compact             Single line
  --no-history          Do not record the query in history
  -h, --help            Print help

Without --formatted/--compact the layout comes from [render] formatted."
            );
        }
        HelpTopic::Fields => {
            println!(
                "\
USAGE:
  n1qlgen fields <SAMPLE.json|-> [OPTIONS]

OPTIONS:
  --paths               Dotted field paths (default)
  --names               Key names at any depth
  --types               Field paths with their JSON type
  -h, --help            Print help"
            );
        }
        HelpTopic::History => {
            println!(
                "\
USAGE:
  n1qlgen history [list] [OPTIONS]
  n1qlgen history search <TERM> [OPTIONS]
  n1qlgen history favorite <ID> [OPTIONS]
  n1qlgen history remove <ID> [OPTIONS]
  n1qlgen history clear [OPTIONS]

<ID> may be a unique prefix of the entry id.

OPTIONS:
  --config <FILE>       Config file path (default: n1qlgen.toml)
  -h, --help            Print help"
            );
        }
        HelpTopic::Templates => {
            println!(
                "\
USAGE:
  n1qlgen templates [list] [--category <NAME>] [OPTIONS]
  n1qlgen templates show <ID> [OPTIONS]
  n1qlgen templates add --name <NAME> --category <NAME> [--description <TEXT>] <QUERY_FILE|-> [OPTIONS]
  n1qlgen templates remove <ID> [OPTIONS]

OPTIONS:
  --config <FILE>       Config file path (default: n1qlgen.toml)
  -h, --help            Print help"
            );
        }
        HelpTopic::Init => {
            println!(
                "\
USAGE:
  n1qlgen init [OPTIONS]

OPTIONS:
  --config <FILE>       Output path (default: n1qlgen.toml)
  -h, --help            Print help"
            );
        }
    }
}
