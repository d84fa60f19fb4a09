//! `compare`: the compare page from the terminal.

use anyhow::Result;
use colored::Colorize;

use super::{Console, Session, cell};
use tuxdex::{
    compare::IDS_PARAM,
    config::SiteConfig,
    controller::{CompareController, Presenter},
    log,
    storage::FileStorage,
};

/// Width of the label column and of each distribution column.
const LABEL_WIDTH: usize = 18;
const VALUE_WIDTH: usize = 22;

pub fn compare_command(
    config: &SiteConfig,
    ids: Option<&str>,
    add: &[String],
    remove: &[String],
    clear: bool,
) -> Result<()> {
    let session = Session::open(config)?;
    let mut page = CompareController::new(session.cache(), Console);

    let query = ids.map(|ids| format!("{IDS_PARAM}={}", urlencoding::encode(ids)));
    page.load(&session.loader(), query.as_deref().unwrap_or_default())?;

    if clear {
        page.clear();
    }
    for id in remove {
        if !page.remove(id.trim()) {
            log!("compare"; "`{}` is not selected", id.trim());
        }
    }
    for id in add {
        if !page.add(id.trim()) {
            log!("compare"; "cannot add `{}` (unknown, already selected, or full)", id.trim());
        }
    }

    let compared = page.compared();
    if compared.is_empty() {
        println!("{}", "Nothing to compare yet. Add distributions with --add <id>.".dimmed());
        print_candidates(&page);
        return Ok(());
    }

    let header: String = compared
        .iter()
        .map(|record| cell(&record.name, VALUE_WIDTH))
        .collect::<Vec<_>>()
        .join(" ");
    println!("{} {}", cell("", LABEL_WIDTH), header.bold());

    for row in page.rows() {
        let values: Vec<String> = row
            .values
            .iter()
            .map(|value| cell(value, VALUE_WIDTH))
            .collect();
        println!("{} {}", cell(row.label, LABEL_WIDTH).dimmed(), values.join(" "));
    }

    if !page.selection().is_full() {
        print_candidates(&page);
    }
    Ok(())
}

fn print_candidates<P: Presenter>(page: &CompareController<'_, FileStorage, P>) {
    let names: Vec<String> = page
        .candidates()
        .iter()
        .map(|record| record.id.to_string())
        .collect();
    if !names.is_empty() {
        println!("{} {}", "available:".dimmed(), names.join(" "));
    }
}
