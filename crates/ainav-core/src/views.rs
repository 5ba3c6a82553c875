use crate::catalog::CatalogProvider;
use crate::models::CatalogItem;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which order a derived list of selected items comes out in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewOrder {
    /// Same order the items appear in the catalog
    Catalog,
    /// Order the user selected them in
    #[default]
    #[serde(alias = "bookmark")]
    Selection,
}

/// Turn selected IDs back into catalog items
///
/// IDs the catalog doesn't know are skipped; a stale bookmark for a delisted
/// tool just disappears from the view.
pub fn selected_items<'a, P>(provider: &'a P, ids: &[String], order: ViewOrder) -> Vec<&'a CatalogItem>
where
    P: CatalogProvider + ?Sized,
{
    match order {
        ViewOrder::Catalog => {
            let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
            provider
                .items()
                .iter()
                .filter(|item| wanted.contains(item.id.as_str()))
                .collect()
        }
        ViewOrder::Selection => ids.iter().filter_map(|id| provider.get(id)).collect(),
    }
}

/// One labelled row of the comparison grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub values: Vec<String>,
}

/// Side-by-side view of the staged items, one column per tool
#[derive(Debug, Clone)]
pub struct ComparisonTable<'a> {
    items: Vec<&'a CatalogItem>,
}

impl<'a> ComparisonTable<'a> {
    pub fn build<P>(provider: &'a P, ids: &[String]) -> Self
    where
        P: CatalogProvider + ?Sized,
    {
        Self {
            items: selected_items(provider, ids, ViewOrder::Selection),
        }
    }

    pub fn items(&self) -> &[&'a CatalogItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn rows(&self) -> Vec<ComparisonRow> {
        let row = |label: &'static str, f: &dyn Fn(&CatalogItem) -> String| ComparisonRow {
            label,
            values: self.items.iter().map(|item| f(*item)).collect(),
        };

        vec![
            row("Description", &|i: &CatalogItem| i.description.clone()),
            row("Category", &|i: &CatalogItem| i.category.clone()),
            row("Pricing", &|i: &CatalogItem| {
                i.pricing.map(|p| p.label().to_string()).unwrap_or_else(|| "-".to_string())
            }),
            row("Language", &|i: &CatalogItem| i.language.clone().unwrap_or_else(|| "-".to_string())),
            row("Featured", &|i: &CatalogItem| (if i.is_featured() { "Yes" } else { "No" }).to_string()),
            row("Tags", &|i: &CatalogItem| {
                if i.tags.is_empty() {
                    "-".to_string()
                } else {
                    i.tags.join(", ")
                }
            }),
            row("URL", &|i: &CatalogItem| i.url.clone()),
        ]
    }

    pub fn to_markdown(&self) -> String {
        if self.items.is_empty() {
            return "Nothing to compare.\n".to_string();
        }

        let mut output = String::new();

        output.push_str("| |");
        for item in &self.items {
            output.push_str(&format!(" {} |", escape_cell(&item.name)));
        }
        output.push('\n');

        output.push_str("|---|");
        for _ in &self.items {
            output.push_str("---|");
        }
        output.push('\n');

        for row in self.rows() {
            output.push_str(&format!("| **{}** |", row.label));
            for value in &row.values {
                output.push_str(&format!(" {} |", escape_cell(value)));
            }
            output.push('\n');
        }

        output
    }
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::item;
    use crate::catalog::Catalog;
    use crate::models::Pricing;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            item("a", "Alpha", "Chat", &["x"]),
            item("b", "Beta", "Image", &[]),
            item("c", "Gamma | Delta", "Code", &["y", "z"]),
        ])
        .unwrap()
    }

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_selection_order() {
        let catalog = catalog();
        let items = selected_items(&catalog, &ids(&["c", "a"]), ViewOrder::Selection);
        let got: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(got, vec!["c", "a"]);
    }

    #[test]
    fn test_catalog_order_skips_unknown() {
        let catalog = catalog();
        let items = selected_items(&catalog, &ids(&["c", "ghost", "a"]), ViewOrder::Catalog);
        let got: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(got, vec!["a", "c"]);
    }

    #[test]
    fn test_view_order_config_names() {
        let order: ViewOrder = serde_json::from_str("\"bookmark\"").unwrap();
        assert_eq!(order, ViewOrder::Selection);
        let order: ViewOrder = serde_json::from_str("\"catalog\"").unwrap();
        assert_eq!(order, ViewOrder::Catalog);
    }

    #[test]
    fn test_comparison_rows() {
        let mut items = vec![item("a", "Alpha", "Chat", &["x"]), item("b", "Beta", "Image", &[])];
        items[0].pricing = Some(Pricing::Paid);
        items[1].featured = Some(true);
        let catalog = Catalog::new(items).unwrap();

        let table = ComparisonTable::build(&catalog, &ids(&["a", "b"]));
        let rows = table.rows();

        let pricing = rows.iter().find(|r| r.label == "Pricing").unwrap();
        assert_eq!(pricing.values, vec!["Paid", "-"]);
        let featured = rows.iter().find(|r| r.label == "Featured").unwrap();
        assert_eq!(featured.values, vec!["No", "Yes"]);
        let tags = rows.iter().find(|r| r.label == "Tags").unwrap();
        assert_eq!(tags.values, vec!["x", "-"]);
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let catalog = catalog();
        let table = ComparisonTable::build(&catalog, &ids(&["a", "c"]));
        let md = table.to_markdown();

        assert!(md.starts_with("| | Alpha | Gamma \\| Delta |\n|---|---|---|\n"));
        assert!(md.contains("| **Category** | Chat | Code |"));
    }

    #[test]
    fn test_empty_table() {
        let catalog = catalog();
        let table = ComparisonTable::build(&catalog, &[]);
        assert!(table.is_empty());
        assert_eq!(table.to_markdown(), "Nothing to compare.\n");
    }
}
