//! `list`, `toggle` and `badges`: the catalog page from the terminal.

use std::time::Instant;

use anyhow::{Result, bail};
use colored::Colorize;

use super::{Console, Session, cell, join_ids};
use tuxdex::{
    config::SiteConfig,
    controller::CatalogController,
    data::DistroRecord,
    log,
    logo::{LogoSource, logo_sources},
    query::{Category, SortKey, build_badges},
};

pub fn list_command(config: &SiteConfig, query: &str, category: &str, sort: Option<&str>) -> Result<()> {
    let session = Session::open(config)?;
    let mut catalog = CatalogController::new(session.cache(), Console, config.catalog.sort, config.debounce());
    let provenance = catalog.load(&session.loader())?;

    let now = Instant::now();
    catalog.set_query(query, now);
    catalog.set_category(Category::parse(category), now);
    if let Some(sort) = sort {
        catalog.set_sort(SortKey::parse(sort), now);
    }
    // All controls arrive at once, so they settle into a single render.
    if !catalog.tick(now + config.debounce()) {
        catalog.refresh();
    }

    let view = catalog.view();
    let filters = catalog.filters();
    log!(
        "load";
        "{} of {} distributions ({}, sorted by {})",
        view.len(),
        catalog.dataset().len(),
        provenance.name(),
        filters.sort
    );

    if view.is_empty() {
        println!("{}", "No distributions match your search.".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "  {} {} {} {} {}",
            cell("#", 4),
            cell("id", 14),
            cell("name", 22),
            cell("release", 9),
            "badges"
        )
        .bold()
    );
    for record in view {
        let marker = if catalog.selection().contains(&record.id) {
            "+".bright_magenta().bold()
        } else {
            " ".normal()
        };
        let rank = record
            .popularity_rank
            .map_or_else(|| "-".to_owned(), |rank| rank.to_string());
        println!(
            "{marker} {} {} {} {} {}",
            cell(&rank, 4).dimmed(),
            cell(&record.id, 14).bright_cyan(),
            cell(&record.name, 22),
            cell(record.release_model().unwrap_or("-"), 9),
            build_badges(record).join(" ").bright_green()
        );
    }

    Ok(())
}

pub fn toggle_command(config: &SiteConfig, id: &str) -> Result<()> {
    let session = Session::open(config)?;
    let mut catalog = CatalogController::new(session.cache(), Console, config.catalog.sort, config.debounce());
    catalog.load(&session.loader())?;

    let id = id.trim();
    let was_selected = catalog.selection().contains(id);
    if catalog.toggle_compare(id) {
        let action = if was_selected { "removed" } else { "added" };
        log!("compare"; "{action} `{id}`");
    } else if !catalog.dataset().iter().any(|record| record.id == id) {
        log!("compare"; "unknown distribution `{id}`");
    } else {
        log!("compare"; "tray is full, remove one first");
    }

    log!("compare"; "tray: {}", join_ids(catalog.selection().ids()));
    Ok(())
}

pub fn badges_command(config: &SiteConfig, id: &str) -> Result<()> {
    let session = Session::open(config)?;
    let mut catalog = CatalogController::new(session.cache(), Console, config.catalog.sort, config.debounce());
    catalog.load(&session.loader())?;

    let Some(record) = catalog.dataset().iter().find(|record| record.id == id.trim()) else {
        bail!("Unknown distribution `{id}`");
    };
    print_profile(record);
    Ok(())
}

fn print_profile(record: &DistroRecord) {
    println!("{} {}", record.name.bold(), format!("({})", record.id).dimmed());

    let badges = build_badges(record);
    if badges.is_empty() {
        println!("  badges: {}", "none".dimmed());
    } else {
        println!("  badges: {}", badges.join(" ").bright_green());
    }

    for (i, source) in logo_sources(record).iter().enumerate() {
        let (kind, value) = match source {
            LogoSource::Record(url) => ("logo", url.as_str()),
            LogoSource::Domain(url) => ("domain", url.as_str()),
            LogoSource::Initials(text) => ("initials", text.as_str()),
        };
        println!("  logo {}: {} {}", i + 1, cell(kind, 8).dimmed(), value);
    }
}
