//! View command - render one page of a dataset

use super::load_items;
use crate::{
    SievrError,
    cli::ViewArgs,
    config::ListingConfig,
    listing::Item,
    memory::{FileQueryStore, MemoryQueryStore, QueryStore},
    output,
    session::{ListingSession, ListingView, Navigation},
};
use colored::Colorize;
use serde::Serialize;

type Result<T> = std::result::Result<T, SievrError>;

#[derive(Serialize)]
struct ViewReport<'a> {
    route: &'a str,
    navigation: Navigation,
    view: ListingView<'a, Item>,
}

/// Execute the view command
///
/// Requested changes are applied in a fixed order: clear tags, toggle tags,
/// sort, search, page. Each one commits like a user event would, so a page
/// request survives while the others return to page 1.
///
/// # Errors
/// Returns an error if the dataset cannot be read or the session cannot be opened
pub fn execute(args: &ViewArgs, config: &ListingConfig, json: bool, quiet: bool) -> Result<()> {
    let items = load_items(&args.data)?;

    let store: Box<dyn QueryStore> = if args.no_memory {
        Box::new(MemoryQueryStore::new())
    } else {
        Box::new(FileQueryStore::open_default()?)
    };

    let mut session = ListingSession::builder()
        .route(args.route.as_str())
        .items(&items)
        .store(&*store)
        .config(config.clone())
        .address_query(args.query.as_str())
        .build()?;

    let navigation = apply_changes(&mut session, args);
    let view = session.view();

    if json {
        output::print_json(&ViewReport {
            route: session.route(),
            navigation,
            view,
        })?;
        return Ok(());
    }

    print_view(&view, config, quiet);
    if !quiet {
        println!("\n{} {}", "location:".dimmed(), navigation.location);
    }
    Ok(())
}

fn apply_changes<S: QueryStore>(session: &mut ListingSession<'_, Item, S>, args: &ViewArgs) -> Navigation {
    if !args.has_changes() {
        return session.commit();
    }

    let mut navigation = None;
    if args.clear_tags {
        navigation = Some(session.clear_tags());
    }
    for tag in &args.toggle {
        navigation = Some(session.toggle_tag(tag));
    }
    if let Some(sort) = &args.sort {
        navigation = Some(session.set_sort(sort.clone()));
    }
    if let Some(search) = &args.search {
        navigation = Some(session.set_search(search.as_str()));
    }
    if let Some(page) = args.page {
        navigation = Some(session.set_page(page));
    }
    navigation.unwrap_or_else(|| session.commit())
}

fn print_view(view: &ListingView<'_, Item>, config: &ListingConfig, quiet: bool) {
    if quiet {
        for item in &view.items {
            println!("{}", output::item_line(item, &config.base_path, true));
        }
        return;
    }

    if !view.sort_options.is_empty() {
        println!("{}", output::sort_selector(&view.sort_options));
        println!();
    }

    if !view.tags.is_empty() {
        println!("{} {}", "tags:".dimmed(), output::tag_cloud(&view.tags));
    }

    if config.search.show && !view.search.is_empty() {
        println!("{} {}", "search:".dimmed(), view.search);
    }

    if view.show_results {
        println!("{}", output::results_banner(view.total_filtered));
    }

    if view.is_empty() {
        println!("{}", "No items match the current filters.".yellow());
        return;
    }

    if view.items.is_empty() {
        println!("{}", format!("Page {} is past the end.", view.page).yellow());
    }
    for item in &view.items {
        println!("{}", output::item_line(item, &config.base_path, false));
    }

    if let Some(controls) = &view.controls {
        println!("\n{}", output::pagination_bar(controls));
    }
}
