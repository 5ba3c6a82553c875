use ainav_core::search::search as search_catalog;
use ainav_core::views::selected_items;
use ainav_core::{
    Catalog, CatalogItem, CatalogProvider, ComparisonTable, Config, Error, Exporter, Session,
    ViewOrder, MAX_COMPARE_ITEMS,
};
use std::io::Write;
use std::path::Path;

fn write_item_line<W: Write>(out: &mut W, item: &CatalogItem, bookmarked: bool) -> anyhow::Result<()> {
    let marker = if bookmarked { "*" } else { " " };
    let pricing = item.pricing.map(|p| p.label()).unwrap_or("-");
    writeln!(
        out,
        "{} {:<18} {:<24} {:<12} {}",
        marker, item.id, item.name, item.category, pricing
    )?;
    Ok(())
}

pub fn list<W: Write>(
    catalog: &Catalog,
    session: &Session,
    category: Option<&str>,
    featured_only: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let bookmarks = session.bookmarks();

    let items = catalog
        .items()
        .iter()
        .filter(|item| category.map_or(true, |c| item.in_category(c)))
        .filter(|item| !featured_only || item.is_featured());

    let mut shown = 0;
    for item in items {
        write_item_line(out, item, bookmarks.is_bookmarked(&item.id)?)?;
        shown += 1;
    }

    if shown == 0 {
        writeln!(out, "No tools match.")?;
    }
    Ok(())
}

pub fn search<W: Write>(
    catalog: &Catalog,
    session: &Session,
    query: &str,
    limit: usize,
    out: &mut W,
) -> anyhow::Result<()> {
    tracing::info!("Searching for: {}", query);
    let bookmarks = session.bookmarks();
    let hits = search_catalog(catalog, query, limit);

    if hits.is_empty() {
        writeln!(out, "No tools match {:?}.", query)?;
        return Ok(());
    }

    for hit in hits {
        write_item_line(out, hit.item, bookmarks.is_bookmarked(&hit.item.id)?)?;
    }
    Ok(())
}

pub fn show<W: Write>(catalog: &Catalog, session: &Session, id: &str, out: &mut W) -> anyhow::Result<()> {
    let item = catalog
        .get(id)
        .ok_or_else(|| Error::NotFound(id.to_string()))?;

    writeln!(out, "{} ({})", item.name, item.id)?;
    writeln!(out, "{}", item.description)?;
    writeln!(out)?;
    writeln!(out, "Category:   {}", item.category)?;
    if let Some(pricing) = item.pricing {
        writeln!(out, "Pricing:    {}", pricing)?;
    }
    if let Some(language) = &item.language {
        writeln!(out, "Language:   {}", language)?;
    }
    if !item.tags.is_empty() {
        writeln!(out, "Tags:       {}", item.tags.join(", "))?;
    }
    writeln!(out, "URL:        {}", item.url)?;
    if item.is_featured() {
        writeln!(out, "Featured")?;
    }
    if session.bookmarks().is_bookmarked(&item.id)? {
        writeln!(out, "Bookmarked")?;
    }
    Ok(())
}

pub fn categories<W: Write>(catalog: &Catalog, out: &mut W) -> anyhow::Result<()> {
    for category in catalog.categories() {
        writeln!(out, "{:<14} {}", category, catalog.by_category(category).len())?;
    }
    Ok(())
}

pub fn bookmark_add<W: Write>(
    catalog: &Catalog,
    session: &Session,
    id: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    let item = catalog
        .get(id)
        .ok_or_else(|| Error::NotFound(id.to_string()))?;

    let bookmarks = session.bookmarks();
    if bookmarks.is_bookmarked(id)? {
        writeln!(out, "{} is already bookmarked", item.name)?;
    } else {
        bookmarks.add_bookmark(id)?;
        writeln!(out, "Bookmarked {}", item.name)?;
    }
    Ok(())
}

/// Removing doesn't consult the catalog so stale IDs can still be cleaned up
pub fn bookmark_remove<W: Write>(session: &Session, id: &str, out: &mut W) -> anyhow::Result<()> {
    let bookmarks = session.bookmarks();
    if bookmarks.is_bookmarked(id)? {
        bookmarks.remove_bookmark(id)?;
        writeln!(out, "Removed {}", id)?;
    } else {
        writeln!(out, "{} was not bookmarked", id)?;
    }
    Ok(())
}

pub fn bookmark_list<W: Write>(
    catalog: &Catalog,
    session: &Session,
    order: ViewOrder,
    out: &mut W,
) -> anyhow::Result<()> {
    let ids = session.bookmarks().bookmarked_ids()?;
    let items = selected_items(catalog, &ids, order);

    if items.is_empty() {
        writeln!(out, "No bookmarks yet.")?;
        return Ok(());
    }

    for item in &items {
        write_item_line(out, item, true)?;
    }

    let missing = ids.len() - items.len();
    if missing > 0 {
        writeln!(out, "({} bookmarked tools are no longer listed)", missing)?;
    }
    Ok(())
}

pub fn bookmark_clear<W: Write>(session: &Session, out: &mut W) -> anyhow::Result<()> {
    let bookmarks = session.bookmarks();
    let count = bookmarks.len()?;
    bookmarks.clear_bookmarks()?;
    writeln!(out, "Cleared {} bookmarks", count)?;
    Ok(())
}

pub fn bookmark_export<W: Write>(
    catalog: &Catalog,
    session: &Session,
    order: ViewOrder,
    path: &Path,
    out: &mut W,
) -> anyhow::Result<()> {
    let ids = session.bookmarks().bookmarked_ids()?;
    let items = selected_items(catalog, &ids, order);

    let format = Exporter::export_to_file(&items, path)?;
    writeln!(
        out,
        "Exported {} bookmarks to {} ({})",
        items.len(),
        path.display(),
        format.extension()
    )?;
    Ok(())
}

pub fn compare<W: Write>(
    catalog: &Catalog,
    session: &Session,
    ids: &[String],
    out: &mut W,
) -> anyhow::Result<()> {
    let compare = session.compare();
    let mut skipped = Vec::new();

    for id in ids {
        if catalog.get(id).is_none() {
            tracing::warn!("Unknown tool {}, not comparing it", id);
            continue;
        }
        // Capacity rejections are silent, so check membership afterwards
        compare.add_to_compare(id)?;
        if !compare.is_selected(id)? {
            skipped.push(id.as_str());
        }
    }

    if !skipped.is_empty() {
        writeln!(
            out,
            "Comparison holds at most {} tools, skipped: {}",
            MAX_COMPARE_ITEMS,
            skipped.join(", ")
        )?;
        writeln!(out)?;
    }

    let selected = compare.selected_ids()?;
    let table = ComparisonTable::build(catalog, &selected);
    write!(out, "{}", table.to_markdown())?;
    Ok(())
}

pub fn config<W: Write>(config: &Config, path: &Path, init: bool, out: &mut W) -> anyhow::Result<()> {
    if init {
        if path.exists() {
            writeln!(out, "Config already exists at {}", path.display())?;
        } else {
            config.save_to(path)?;
            writeln!(out, "Wrote default config to {}", path.display())?;
        }
        return Ok(());
    }

    writeln!(out, "# {}", path.display())?;
    write!(out, "{}", toml::to_string_pretty(config)?)?;
    Ok(())
}
