//! Tag and category aggregation over post lists

use std::collections::{BTreeSet, HashMap};

use crate::content::Post;

/// All distinct tags across `posts`, sorted ascending.
///
/// The result does not depend on the order of `posts`. Unpublished posts
/// never reach an index, but they are ignored here too.
pub fn all_tags(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .filter(|p| p.published)
        .flat_map(|p| p.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Number of posts carrying each tag, most used first (ties by name)
pub fn tag_counts(posts: &[Post]) -> Vec<(String, usize)> {
    let mut tags: HashMap<&str, usize> = HashMap::new();

    for post in posts.iter().filter(|p| p.published) {
        let distinct: BTreeSet<&str> = post.tags.iter().map(String::as_str).collect();
        for tag in distinct {
            *tags.entry(tag).or_insert(0) += 1;
        }
    }

    sorted_counts(tags)
}

/// Number of posts in each category, most used first (ties by name)
pub fn category_counts(posts: &[Post]) -> Vec<(String, usize)> {
    let mut categories: HashMap<&str, usize> = HashMap::new();

    for post in posts.iter().filter(|p| p.published) {
        if !post.category.is_empty() {
            *categories.entry(post.category.as_str()).or_insert(0) += 1;
        }
    }

    sorted_counts(categories)
}

fn sorted_counts(counts: HashMap<&str, usize>) -> Vec<(String, usize)> {
    let mut sorted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}
