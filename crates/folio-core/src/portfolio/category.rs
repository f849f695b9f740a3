use super::entry::PortfolioEntry;
use super::list::PortfolioList;

/// The pseudo-category that matches everything. Always offered first in the
/// filter bar.
pub const ALL: &str = "all";

/// Category filter over a portfolio list. Matching is case-insensitive and
/// never reorders: filtering only removes non-matching entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Named(String),
}

impl CategoryFilter {
    /// `"all"` (any casing) parses to the identity filter.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case(ALL) {
            Self::All
        } else {
            Self::Named(raw.trim().to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name.to_lowercase() == category.to_lowercase(),
        }
    }

    /// The matching subsequence of `list`, in original order.
    pub fn apply<'a>(&self, list: &'a PortfolioList) -> Vec<&'a PortfolioEntry> {
        list.iter().filter(|e| self.matches(&e.category)).collect()
    }
}

/// The distinct categories present in `list`, in first-appearance order and
/// prefixed with the `all` pseudo-category. Spellings that differ only in
/// case collapse to the first one seen.
pub fn available_categories(list: &PortfolioList) -> Vec<String> {
    let mut out = vec![ALL.to_string()];
    let mut seen: Vec<String> = Vec::new();
    for entry in list {
        let folded = entry.category.to_lowercase();
        if !seen.contains(&folded) {
            seen.push(folded);
            out.push(entry.category.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::entry::EntryId;

    fn entry(id: i64, title: &str, category: &str) -> PortfolioEntry {
        PortfolioEntry {
            id: EntryId::new(id),
            title: title.into(),
            category: category.into(),
            image_url: format!("https://example.com/{id}.jpg"),
            description: None,
            link: None,
        }
    }

    fn seedlike() -> PortfolioList {
        [
            entry(1, "Neon Dreams", "Brand Identity"),
            entry(2, "Abstract Waves", "Digital Art"),
            entry(3, "Vibrant Gradients", "UI Design"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn all_is_the_identity_filter() {
        let list = seedlike();
        let filtered = CategoryFilter::All.apply(&list);
        assert_eq!(filtered.len(), list.len());
        assert!(filtered.iter().zip(list.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn parse_recognizes_all_case_insensitively() {
        assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(" all "), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("UI Design"),
            CategoryFilter::Named("UI Design".into())
        );
    }

    #[test]
    fn named_filter_matches_case_insensitively_in_order() {
        let list = seedlike();
        let filtered = CategoryFilter::parse("ui design").apply(&list);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Vibrant Gradients");
    }

    #[test]
    fn filtering_preserves_insertion_order() {
        let mut list = seedlike();
        list.append(entry(4, "Waves Again", "digital art")).unwrap();
        let filtered = CategoryFilter::parse("Digital Art").apply(&list);
        let titles: Vec<_> = filtered.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Abstract Waves", "Waves Again"]);
    }

    #[test]
    fn categories_are_distinct_ordered_and_prefixed_with_all() {
        let mut list = seedlike();
        list.append(entry(4, "Waves Again", "digital art")).unwrap();
        assert_eq!(
            available_categories(&list),
            vec!["all", "Brand Identity", "Digital Art", "UI Design"]
        );
    }

    #[test]
    fn empty_list_still_offers_all() {
        assert_eq!(available_categories(&PortfolioList::new()), vec!["all"]);
    }
}
