//! On-disk document shapes for the site index and post files

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::path::Path;

use super::{Category, ContentIndex, Post, PostMeta, SiteMeta};

/// Calendar date format used by `publish_date` and `updated_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Reading time in whole minutes; negative values clamp to zero
fn minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    Ok(u32::try_from(value.max(0)).unwrap_or(u32::MAX))
}

/// The site index document (`blogs.yaml`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IndexDocument {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub meta: SiteMeta,
    pub categories: Vec<Category>,
}

impl IndexDocument {
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Start an index with no posts yet
    pub fn into_index(self) -> ContentIndex {
        ContentIndex {
            title: self.title,
            subtitle: self.subtitle,
            description: self.description,
            meta: self.meta,
            categories: self.categories,
            posts: Vec::new(),
        }
    }
}

/// A single post document (`posts/*.yaml`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostDocument {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub publish_date: String,
    pub updated_date: Option<String>,
    pub category: String,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "minutes")]
    pub reading_time: u32,
    pub featured: bool,
    /// Drafts are the default: a post must opt in to publication
    pub published: bool,
    pub meta: PostMeta,
}

impl PostDocument {
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Convert into a [`Post`], resolving dates. `path` is only used to
    /// label warnings.
    pub fn into_post(self, path: &Path) -> Post {
        let publish_date = parse_date(&self.publish_date);
        if publish_date.is_none() {
            tracing::warn!(
                path = %path.display(),
                field = "publish_date",
                value = %self.publish_date,
                "Unparsable date, post will sort last"
            );
        }

        let updated_date = match self.updated_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                let parsed = parse_date(raw);
                if parsed.is_none() {
                    tracing::warn!(
                        path = %path.display(),
                        field = "updated_date",
                        value = %raw,
                        "Unparsable date, leaving it unset"
                    );
                }
                parsed
            }
            _ => None,
        };

        let mut tags = self.tags;
        dedup_preserving_order(&mut tags);

        Post {
            id: self.id,
            title: self.title,
            slug: self.slug,
            excerpt: self.excerpt,
            content: self.content,
            author: self.author,
            publish_date,
            updated_date,
            category: self.category,
            tags,
            reading_time: self.reading_time,
            featured: self.featured,
            published: self.published,
            meta: self.meta,
        }
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

fn dedup_preserving_order(items: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}
