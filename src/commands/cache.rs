//! `cache status|clear`.

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;

use super::{Session, join_ids};
use tuxdex::{cli::CacheAction, config::SiteConfig, log};

pub fn cache_command(config: &SiteConfig, action: CacheAction) -> Result<()> {
    let session = Session::open(config)?;
    let cache = session.cache();

    match action {
        CacheAction::Status => {
            log!("cache"; "storage: {}", config.storage.dir.display());
            match cache.dataset_saved_at() {
                Some(saved_at) => {
                    let age = Utc::now().signed_duration_since(saved_at);
                    let state = if age > cache.ttl() {
                        "expired".yellow()
                    } else {
                        "fresh".green()
                    };
                    log!(
                        "cache";
                        "dataset saved {} ({}h{:02}m ago, {state})",
                        saved_at.format("%Y-%m-%d %H:%M UTC"),
                        age.num_hours(),
                        age.num_minutes() % 60
                    );
                }
                None => log!("cache"; "no cached dataset"),
            }
            let bundled = session.bundled();
            match bundled.last_updated_display.as_deref().or(bundled.generated_at.as_deref()) {
                Some(updated) => log!("load"; "bundled snapshot: {} records, updated {updated}", bundled.len()),
                None => log!("load"; "bundled snapshot: {} records", bundled.len()),
            }
            log!("compare"; "selection: {}", join_ids(&cache.read_compare_selection()));
        }
        CacheAction::Clear => {
            cache.clear_dataset_cache();
            log!("cache"; "cached dataset removed");
        }
    }

    Ok(())
}
