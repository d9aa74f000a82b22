use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use barback_catalog::{Cocktail, load_catalog};

use crate::CliError;

use super::rank;

pub(crate) fn run_stats(path: &Path, top: usize) -> Result<(), CliError> {
    let catalog = load_catalog(path)?;
    let cocktails = &catalog.cocktails;

    let unquantified = cocktails
        .iter()
        .flat_map(|c| &c.ingredients)
        .filter(|i| i.qty.is_none())
        .count();
    let tags: BTreeSet<&str> = cocktails
        .iter()
        .flat_map(|c| &c.tags)
        .map(String::as_str)
        .collect();

    log::info!(
        "{}",
        "Catalog Statistics".if_supports_color(Stderr, |t| t.bold()),
    );
    log::info!("  Catalog:    {}", path.display());
    log::info!("  Generated:  {}", catalog.generated_at);
    crate::log_blank();
    log::info!("  Cocktails:          {:>6}", cocktails.len());
    log::info!("  Ingredients:        {:>6}", catalog.ingredient_count());
    log::info!("    without amount:   {:>6}", unquantified);
    log::info!("  With creator:       {:>6}", count_where(cocktails, |c| c.creator_name.is_some()));
    log::info!("  With glass:         {:>6}", count_where(cocktails, |c| c.glass.is_some()));
    log::info!("  With garnish:       {:>6}", count_where(cocktails, |c| c.garnish.is_some()));
    log::info!("  With instructions:  {:>6}", count_where(cocktails, |c| c.instructions.is_some()));
    log::info!("  With story:         {:>6}", count_where(cocktails, |c| c.story.is_some()));
    log::info!("  Distinct tags:      {:>6}", tags.len());

    let mut glasses: HashMap<&str, usize> = HashMap::new();
    for glass in cocktails.iter().filter_map(|c| c.glass.as_deref()) {
        *glasses.entry(glass).or_default() += 1;
    }
    if !glasses.is_empty() && top > 0 {
        crate::log_blank();
        log::info!("{}", "Top glasses".if_supports_color(Stderr, |t| t.bold()));
        for (glass, count) in rank(glasses).into_iter().take(top) {
            log::info!("  {:<20} {:>6}", glass, count);
        }
    }

    let mut units: HashMap<&str, usize> = HashMap::new();
    for unit in cocktails
        .iter()
        .flat_map(|c| &c.ingredients)
        .filter_map(|i| i.unit.as_deref())
    {
        *units.entry(unit).or_default() += 1;
    }
    if !units.is_empty() {
        crate::log_blank();
        log::info!("{}", "Units".if_supports_color(Stderr, |t| t.bold()));
        for (unit, count) in rank(units) {
            log::info!("  {:<20} {:>6}", unit, count);
        }
    }

    Ok(())
}

fn count_where(cocktails: &[Cocktail], pred: impl Fn(&Cocktail) -> bool) -> usize {
    cocktails.iter().filter(|c| pred(c)).count()
}
