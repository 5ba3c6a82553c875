use crate::catalog::CatalogProvider;
use crate::models::CatalogItem;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Name hits count double so "claude" ranks Claude above tools that only
/// mention it in passing
const NAME_WEIGHT: i64 = 2;

/// A catalog item that matched a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub item: &'a CatalogItem,
    pub score: i64,
}

/// Fuzzy search over name, description, category and tags
///
/// Results are ordered by score; equal scores keep catalog order. A blank
/// query lists the catalog as-is. At most `limit` hits come back.
pub fn search<'a, P>(provider: &'a P, query: &str, limit: usize) -> Vec<SearchHit<'a>>
where
    P: CatalogProvider + ?Sized,
{
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        return provider
            .items()
            .iter()
            .take(limit)
            .map(|item| SearchHit { item, score: 0 })
            .collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut hits: Vec<SearchHit<'a>> = provider
        .items()
        .iter()
        .filter_map(|item| score_item(&matcher, item, &query).map(|score| SearchHit { item, score }))
        .collect();

    // sort_by is stable, so ties stay in catalog order
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(limit);

    tracing::debug!("Search {:?} matched {} items", query, hits.len());
    hits
}

fn score_item(matcher: &SkimMatcherV2, item: &CatalogItem, query: &str) -> Option<i64> {
    let name = matcher
        .fuzzy_match(&item.name, query)
        .map(|s| s * NAME_WEIGHT);
    let others = std::iter::once(item.description.as_str())
        .chain(std::iter::once(item.category.as_str()))
        .chain(item.tags.iter().map(String::as_str))
        .filter_map(|field| matcher.fuzzy_match(field, query));

    name.into_iter().chain(others).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_name_match_ranks_first() {
        let catalog = Catalog::bundled().unwrap();
        let hits = search(&catalog, "Claude", 10);

        assert!(!hits.is_empty());
        assert_eq!(hits[0].item.id, "claude");
    }

    #[test]
    fn test_tag_matches_keep_catalog_order() {
        let catalog = Catalog::bundled().unwrap();
        let ids: Vec<_> = search(&catalog, "chatbot", 10)
            .into_iter()
            .map(|h| h.item.id.as_str())
            .collect();

        assert_eq!(ids, vec!["gpt-4", "claude", "gemini"]);
    }

    #[test]
    fn test_blank_query_lists_catalog() {
        let catalog = Catalog::bundled().unwrap();
        let hits = search(&catalog, "   ", 3);

        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].item.id, catalog.items()[0].id);
        assert!(hits.iter().all(|h| h.score == 0));
    }

    #[test]
    fn test_no_match() {
        let catalog = Catalog::bundled().unwrap();
        assert!(search(&catalog, "zzzzqqq", 10).is_empty());
    }

    #[test]
    fn test_limit_applies() {
        let catalog = Catalog::bundled().unwrap();
        assert!(search(&catalog, "e", 2).len() <= 2);
    }
}
