//! Tag and text-query filters over program listings.

use dagskra_types::Program;
use std::collections::HashSet;

/// Keep programs carrying at least one of `selected_tags`.
///
/// An empty selection keeps every program in its original order.
pub fn filter_by_tags<'a, I>(programs: I, selected_tags: &[String]) -> Vec<&'a Program>
where
    I: IntoIterator<Item = &'a Program>,
{
    if selected_tags.is_empty() {
        return programs.into_iter().collect();
    }

    let wanted: HashSet<&str> = selected_tags.iter().map(String::as_str).collect();
    programs
        .into_iter()
        .filter(|p| p.tags.iter().any(|t| wanted.contains(t.as_str())))
        .collect()
}

/// Keep programs whose name or description contains `query`,
/// case-insensitively. A blank query keeps everything.
pub fn filter_by_query<'a, I>(programs: I, query: &str) -> Vec<&'a Program>
where
    I: IntoIterator<Item = &'a Program>,
{
    let query = query.trim();
    if query.is_empty() {
        return programs.into_iter().collect();
    }

    let needle = query.to_lowercase();
    programs
        .into_iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description_or_empty().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Unique tags across all programs, in first-seen order
pub fn extract_tags<'a, I>(programs: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Program>,
{
    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    for program in programs {
        for tag in &program.tags {
            if seen.insert(tag.as_str()) {
                tags.push(tag.clone());
            }
        }
    }
    tags
}
