//! # CLI Layer
//!
//! This module is **one possible UI client** for cardz, not the application itself.
//! It is the only place that reads stdin, prints, and decides exit codes.
//!
//! ## Structure
//!
//! - `run()`: Parses arguments, sets up logging and the context, dispatches
//! - `handle_*()`: Per-command handlers that call the API and render the result
//! - Interactive gates (import mode, folder deletion, study loop) live here, never
//!   below the API
//!
//! Running `cardz` with no subcommand lists the current folder.

use super::render::{
    print_breadcrumb, print_card, print_cards, print_check_report, print_config, print_entries,
    print_messages, print_outline, print_study_card,
};
use super::setup::{Cli, Commands, SortArg};
use cardz::api::{ConfigAction, ImportPlan};
use cardz::error::{CardzError, Result};
use cardz::init::{initialize, CardzContext};
use cardz::merge::ImportMode;
use cardz::model::CardOrder;
use cardz::study::StudySession;
use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

type AppContext = CardzContext;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = initialize(cli.data)?;

    match cli.command {
        Some(Commands::Ls { folder, sort }) => handle_ls(&ctx, folder.as_deref(), sort),
        Some(Commands::Tree) => handle_tree(&ctx),
        Some(Commands::Mkdir { name, parent }) => handle_mkdir(&ctx, &name, parent.as_deref()),
        Some(Commands::Rename { folder, name }) => handle_rename(&ctx, &folder, &name),
        Some(Commands::Rmdir { folder, yes }) => handle_rmdir(&ctx, &folder, yes),
        Some(Commands::MvFolder {
            folder,
            destination,
        }) => handle_mv_folder(&ctx, &folder, &destination),
        Some(Commands::Add { front, back, folder }) => {
            handle_add(&ctx, &front, &back, folder.as_deref())
        }
        Some(Commands::Edit { card, front, back }) => handle_edit(&ctx, &card, &front, &back),
        Some(Commands::Mv { card, folder }) => handle_mv(&ctx, &card, &folder),
        Some(Commands::Rm { target }) => handle_rm(&ctx, &target),
        Some(Commands::Show { card }) => handle_show(&ctx, &card),
        Some(Commands::Search { term }) => handle_search(&ctx, &term),
        Some(Commands::Cd { folder }) => handle_cd(&ctx, &folder),
        Some(Commands::Up) => handle_up(&ctx),
        Some(Commands::Pwd) => handle_pwd(&ctx),
        Some(Commands::Study { folder, shuffle }) => {
            handle_study(&ctx, folder.as_deref(), shuffle)
        }
        Some(Commands::Export { path }) => handle_export(&ctx, path.as_deref()),
        Some(Commands::Import {
            path,
            merge,
            replace,
            yes,
        }) => handle_import(&ctx, path, merge, replace, yes),
        Some(Commands::Check) => handle_check(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_ls(&ctx, None, SortArg::Config),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}

fn card_order(ctx: &AppContext, sort: SortArg) -> CardOrder {
    match sort {
        SortArg::Config => ctx.config.card_order,
        SortArg::Position => CardOrder::Position,
        SortArg::Newest => CardOrder::Newest,
        SortArg::Alphabetical => CardOrder::Alphabetical,
    }
}

fn handle_ls(ctx: &AppContext, folder: Option<&str>, sort: SortArg) -> Result<()> {
    let result = ctx.api.list(folder, card_order(ctx, sort))?;
    print_entries(&result.path, &result.listed_entries);
    print_messages(&result.messages);
    Ok(())
}

fn handle_tree(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.outline()?;
    print_outline(&result.outline);
    Ok(())
}

fn handle_mkdir(ctx: &AppContext, name: &str, parent: Option<&str>) -> Result<()> {
    let result = ctx.api.create_folder(name, parent)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_rename(ctx: &AppContext, folder: &str, name: &str) -> Result<()> {
    let result = ctx.api.rename_folder(folder, name)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_rmdir(ctx: &AppContext, folder: &str, yes: bool) -> Result<()> {
    if !yes {
        let preview = ctx.api.preview_delete_folder(folder)?;
        let name = preview
            .affected_folders
            .last()
            .map(|f| f.name.clone())
            .unwrap_or_default();
        println!(
            "This will delete {} with {} subfolders and {} cards.",
            name.bold(),
            preview.affected_folders.len().saturating_sub(1),
            preview.affected_cards.len()
        );
        if !confirm("Delete? [y/N]: ")? {
            println!("{}", "Operation cancelled.".dimmed());
            return Ok(());
        }
    }
    let result = ctx.api.delete_folder(folder)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_mv_folder(ctx: &AppContext, folder: &str, destination: &str) -> Result<()> {
    let result = ctx.api.move_folder(folder, destination)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &AppContext, front: &str, back: &str, folder: Option<&str>) -> Result<()> {
    let result = ctx.api.add_card(front, back, folder)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &AppContext, card: &str, front: &str, back: &str) -> Result<()> {
    let result = ctx.api.edit_card(card, front, back, ctx.config.card_order)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_mv(ctx: &AppContext, card: &str, folder: &str) -> Result<()> {
    let result = ctx.api.move_card(card, folder, ctx.config.card_order)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_rm(ctx: &AppContext, target: &str) -> Result<()> {
    let result = ctx.api.remove_entry(target, ctx.config.card_order)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, card: &str) -> Result<()> {
    let result = ctx.api.show_card(card, ctx.config.card_order)?;
    for card in &result.affected_cards {
        print_card(card, &result.path);
    }
    Ok(())
}

fn handle_search(ctx: &AppContext, term: &str) -> Result<()> {
    let result = ctx.api.search(term, ctx.config.card_order)?;
    print_cards(&result.listed_cards);
    Ok(())
}

fn handle_cd(ctx: &AppContext, folder: &str) -> Result<()> {
    let result = ctx.api.change_folder(folder)?;
    print_breadcrumb(&result.path);
    Ok(())
}

fn handle_up(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.up()?;
    print_breadcrumb(&result.path);
    print_messages(&result.messages);
    Ok(())
}

fn handle_pwd(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.current_folder()?;
    print_breadcrumb(&result.path);
    Ok(())
}

fn handle_study(ctx: &AppContext, folder: Option<&str>, shuffle: bool) -> Result<()> {
    let result = ctx.api.study(
        folder,
        ctx.config.card_order,
        shuffle || ctx.config.shuffle_study,
    )?;
    let Some(mut study) = result.study else {
        return Ok(());
    };
    print_breadcrumb(&result.path);
    println!(
        "{}",
        "f: flip  n: next  p: previous  r: restart  q: quit".dimmed()
    );
    study_loop(&mut study, io::stdin().lock())
}

fn study_loop<R: BufRead>(study: &mut StudySession, input: R) -> Result<()> {
    print_study_card(study);
    for line in input.lines() {
        let line = line.map_err(CardzError::Io)?;
        match line.trim() {
            "f" | "" => {
                study.flip();
            }
            "n" => {
                if study.next().is_none() {
                    println!("{}", "End of deck.".dimmed());
                    continue;
                }
            }
            "p" => {
                if study.prev().is_none() {
                    println!("{}", "Already at the first card.".dimmed());
                    continue;
                }
            }
            "r" => study.reset(),
            "q" => break,
            other => {
                println!("{}", format!("Unknown key: {}", other).yellow());
                continue;
            }
        }
        print_study_card(study);
    }
    Ok(())
}

fn handle_export(ctx: &AppContext, path: Option<&Path>) -> Result<()> {
    let result = ctx.api.export(path)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(
    ctx: &AppContext,
    path: PathBuf,
    merge: bool,
    replace: bool,
    yes: bool,
) -> Result<()> {
    let plan = ctx.api.plan_import(&path)?;
    let requested = if merge {
        Some(ImportMode::Merge)
    } else if replace {
        Some(ImportMode::Replace)
    } else {
        ctx.config.import_mode.fixed_mode()
    };

    let Some(mode) = choose_import_mode(&plan, requested, yes)? else {
        println!("{}", "Import cancelled.".dimmed());
        return Ok(());
    };
    let result = ctx.api.import(plan, mode)?;
    print_messages(&result.messages);
    Ok(())
}

/// The import decision gate. `None` means the user backed out.
fn choose_import_mode(
    plan: &ImportPlan,
    requested: Option<ImportMode>,
    yes: bool,
) -> Result<Option<ImportMode>> {
    if !plan.has_existing_data() {
        return Ok(Some(requested.unwrap_or(ImportMode::Replace)));
    }
    println!(
        "Importing {} folders and {} cards. You already have {} folders and {} cards.",
        plan.imported_folders, plan.imported_cards, plan.existing_folders, plan.existing_cards
    );
    match requested {
        Some(ImportMode::Merge) => Ok(Some(ImportMode::Merge)),
        Some(ImportMode::Replace) => {
            if yes || confirm("Replace all existing data? [y/N]: ")? {
                Ok(Some(ImportMode::Replace))
            } else {
                Ok(None)
            }
        }
        None if yes => Err(CardzError::Api(
            "Existing data found: choose --merge or --replace".to_string(),
        )),
        None => {
            let answer = prompt("[m]erge, [r]eplace, anything else cancels: ")?;
            Ok(match answer.as_str() {
                "m" | "merge" => Some(ImportMode::Merge),
                "r" | "replace" => Some(ImportMode::Replace),
                _ => None,
            })
        }
    }
}

fn handle_check(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.check()?;
    if let Some(report) = &result.report {
        print_check_report(report);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let result = ctx.api.config(action.clone())?;
    if let (ConfigAction::ShowAll, Some(config)) = (&action, &result.config) {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(())
}

fn prompt(question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout().flush().map_err(CardzError::Io)?;
    let mut input = String::new();
    io::stdin().read_line(&mut input).map_err(CardzError::Io)?;
    Ok(input.trim().to_lowercase())
}

fn confirm(question: &str) -> Result<bool> {
    Ok(matches!(prompt(question)?.as_str(), "y" | "yes"))
}
