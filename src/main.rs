//! # blocktree
//!
//! Command-line editor for block outline documents.
//!
//! ## Usage
//!
//! Print the outline:
//! ```sh
//! blocktree show
//! ```
//!
//! Add a collapsible section, then a child inside it:
//! ```sh
//! blocktree insert collapsible --text "Notes"
//! blocktree insert text --parent <ID> --text "First point"
//! ```
//!
//! Drag the first top-level block below the second:
//! ```sh
//! blocktree move-root 0 2
//! ```

mod cli;

use std::str::FromStr;

use clap::Parser as ClapParser;
use cli::{Cli, Command, OutputFormat, TabCommand, Target};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, bail, eyre};
use serde::Serialize;
use strum::IntoEnumIterator;

use blocktree::block::ListItem;
use blocktree::render::{render_box_tree, render_forest};
use blocktree::{
    Applied, Block, BlockId, BlockType, Config, Content, Forest, ForestError, JsonDirStore, Parent,
    Patch, RichText, SaveFailurePolicy, Session, Store, TabId, TabPatch,
};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    // reported once logging is up
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let level = match args.verbose {
        0 => config.log_level(),
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "ignoring config, using defaults");
    }

    let root = args.store.clone().unwrap_or_else(|| config.store_root());
    let store = JsonDirStore::new(root);

    // needs no document
    match &args.command {
        Command::Types => {
            print_types(args.output)?;
            return Ok(());
        }
        Command::Documents => {
            let documents = store.documents()?;
            match args.output {
                OutputFormat::Plain => documents.iter().for_each(|doc| println!("{}", doc)),
                OutputFormat::Json => print_json(&documents)?,
            }
            return Ok(());
        }
        _ => {}
    }

    let document = args
        .document
        .clone()
        .unwrap_or_else(|| config.session.document.clone());
    let policy = if args.rollback {
        SaveFailurePolicy::Rollback
    } else {
        config.session.on_save_failure
    };
    let mut session = Session::open(store, &document, policy)
        .wrap_err_with(|| format!("Failed to open document `{}`", document))?;

    run(&mut session, args.command, args.output)
}

fn run<S: Store>(session: &mut Session<S>, command: Command, output: OutputFormat) -> Result<()> {
    let applied = match command {
        Command::Show { id } => return show(session.forest(), id, output),
        Command::Types | Command::Documents => return Ok(()),
        Command::Insert {
            block_type,
            target,
            at,
            text,
        } => {
            let block_type = parse_block_type(&block_type)?;
            let mut block = Block::new(block_type);
            if let Some(text) = text {
                set_text(&mut block.content, &text)?;
            }
            let parent = resolve_target(session.forest(), &target)?;
            session.apply(|forest| forest.insert_block(&parent, block, at))?
        }
        Command::Update {
            id,
            text,
            json,
            color,
            status,
            note,
            flipped,
        } => {
            let id = BlockId::from(id);
            let current = session
                .forest()
                .get(&id)
                .cloned()
                .ok_or_else(|| ForestError::NotFound(id.clone()))?;

            let mut patch = Patch::default();
            if let Some(text) = text {
                let mut content = current.content.clone();
                set_text(&mut content, &text)?;
                patch.content = Some(content);
            }
            if let Some(json) = json {
                let content: Content =
                    serde_json::from_str(&json).wrap_err("Invalid content JSON")?;
                patch.content = Some(content);
            }
            if color.is_some() || status.is_some() || note.is_some() || flipped.is_some() {
                let mut decorations = current.decorations.clone();
                if let Some(color) = color {
                    decorations.color = non_empty(color);
                }
                if let Some(status) = status {
                    decorations.status = non_empty(status);
                }
                if let Some(note) = note {
                    decorations.note = non_empty(note);
                }
                if let Some(flipped) = flipped {
                    decorations.flipped = flipped;
                }
                patch.decorations = Some(decorations);
            }
            session.apply(|forest| forest.update(&id, patch))?
        }
        Command::Delete { id } => {
            let id = BlockId::from(id);
            session.apply(|forest| forest.delete(&id))?
        }
        Command::Reorder { target, ids } => {
            let parent = resolve_target(session.forest(), &target)?;
            let order: Vec<BlockId> = ids.into_iter().map(BlockId::from).collect();
            session.apply(|forest| forest.reorder(&parent, &order))?
        }
        Command::MoveRoot { from, drop } => session.apply(|forest| forest.move_root(from, drop))?,
        Command::Move { id, target, at } => {
            let id = BlockId::from(id);
            let parent = resolve_target(session.forest(), &target)?;
            session.apply(|forest| forest.move_block(&id, &parent, at))?
        }
        Command::Tab(command) => run_tab(session, command)?,
    };

    print_applied(&applied, output)
}

fn run_tab<S: Store>(session: &mut Session<S>, command: TabCommand) -> Result<Applied> {
    let applied = match command {
        TabCommand::Add { container, title } => {
            let container = BlockId::from(container);
            session.apply(|forest| forest.add_tab(&container, &title))?
        }
        TabCommand::Activate { container, tab } => {
            let (container, tab) = (BlockId::from(container), TabId::from(tab));
            session.apply(|forest| forest.activate_tab(&container, &tab))?
        }
        TabCommand::Rename {
            container,
            tab,
            title,
            color,
            clear_color,
        } => {
            let (container, tab) = (BlockId::from(container), TabId::from(tab));
            let patch = TabPatch {
                title,
                color: if clear_color { Some(None) } else { color.map(Some) },
            };
            if patch == TabPatch::default() {
                bail!("Nothing to change: give a title, --color or --clear-color");
            }
            session.apply(|forest| forest.update_tab(&container, &tab, patch))?
        }
        TabCommand::Remove { container, tab } => {
            let (container, tab) = (BlockId::from(container), TabId::from(tab));
            session.apply(|forest| forest.remove_tab(&container, &tab))?
        }
        TabCommand::Reorder { container, tabs } => {
            let container = BlockId::from(container);
            let order: Vec<TabId> = tabs.into_iter().map(TabId::from).collect();
            session.apply(|forest| forest.reorder_tabs(&container, &order))?
        }
    };
    Ok(applied)
}

/// Collection named by `--parent`/`--tab`; a bare container resolves to its default slot.
fn resolve_target(forest: &Forest, target: &Target) -> Result<Parent, ForestError> {
    match (&target.parent, &target.tab) {
        (None, _) => Ok(Parent::Root),
        (Some(parent), Some(tab)) => Ok(Parent::Tab(
            BlockId::from(parent.as_str()),
            TabId::from(tab.as_str()),
        )),
        (Some(parent), None) => forest.container_slot(&BlockId::from(parent.as_str())),
    }
}

fn parse_block_type(name: &str) -> Result<BlockType> {
    BlockType::from_str(name).map_err(|_| {
        let known: Vec<&'static str> = BlockType::iter().map(Into::into).collect();
        eyre!("Unknown block type `{}` (expected one of: {})", name, known.join(", "))
    })
}

/// Replace the main text field of `content`.
fn set_text(content: &mut Content, value: &str) -> Result<()> {
    let block_type = content.block_type();
    match content {
        Content::Header { text, .. } | Content::Text { text } | Content::LongText { text } => {
            *text = RichText::plain(value);
        }
        Content::Collapsible { title, .. } => *title = RichText::plain(value),
        Content::Card { front, .. } => *front = RichText::plain(value),
        Content::Markdown { source } | Content::Code { source, .. } => *source = value.to_string(),
        Content::List { items, .. } => {
            *items = value
                .lines()
                .map(|line| ListItem {
                    text: RichText::plain(line),
                    checked: false,
                })
                .collect();
        }
        Content::Divider | Content::Tabs { .. } => bail!("{} blocks have no text", block_type),
    }
    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

fn show(forest: &Forest, id: Option<String>, output: OutputFormat) -> Result<()> {
    let Some(id) = id else {
        match output {
            OutputFormat::Plain => print!("{}", render_forest(forest)),
            OutputFormat::Json => print_json(&forest.records())?,
        }
        return Ok(());
    };

    let id = BlockId::from(id);
    let path = forest.locate(&id)?;
    let block = forest
        .subtree(&id)
        .ok_or_else(|| ForestError::NotFound(id.clone()))?;

    match output {
        OutputFormat::Plain => {
            let trail: Vec<String> = path
                .steps()
                .iter()
                .map(|step| match step.slot() {
                    Some(blocktree::block::Slot::Tab(tab)) => format!("{}[{}]", step.id, tab),
                    _ => step.id.to_string(),
                })
                .collect();
            println!("path: {}", trail.join(" > "));
            print!("{}", render_box_tree(&block, "", true));
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Shown<'a> {
                path: &'a blocktree::Path,
                block: &'a Block,
            }
            print_json(&Shown {
                path: &path,
                block: &block,
            })?;
        }
    }
    Ok(())
}

fn print_types(output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Plain => {
            for block_type in BlockType::iter() {
                let marker = if block_type.is_container() { "+" } else { " " };
                println!("{} {:<12} {}", marker, block_type, block_type.description());
            }
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct TypeInfo {
                r#type: BlockType,
                container: bool,
                description: &'static str,
            }
            let types: Vec<TypeInfo> = BlockType::iter()
                .map(|block_type| TypeInfo {
                    r#type: block_type,
                    container: block_type.is_container(),
                    description: block_type.description(),
                })
                .collect();
            print_json(&types)?;
        }
    }
    Ok(())
}

fn print_applied(applied: &Applied, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Plain => {
            if let Some(id) = &applied.created {
                println!("created {}", id);
            }
            if let Some(tab) = &applied.created_tab {
                println!("created tab {}", tab);
            }
            println!(
                "saved {} record(s), deleted {}",
                applied.saved.len(),
                applied.deleted.len()
            );
        }
        OutputFormat::Json => print_json(applied)?,
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
