//! The content store: every topic page, keyed by topic id.
//!
//! Topic sources are markdown files compiled into the binary, so the key set is fixed at build
//! time and the store never changes once loaded. Lookups for ids outside that set return `None`;
//! deciding what to show instead is the renderer's job.

use crate::error::ContentError;
use crate::formats::markdown::MarkdownFormat;
use crate::formats::Format;
use crate::section::Section;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Topic ids paired with their embedded markdown source.
pub const TOPIC_SOURCES: &[(&str, &str)] = &[
    ("introduction", include_str!("../content/introduction.md")),
    ("getting-started", include_str!("../content/getting-started.md")),
    ("authentication", include_str!("../content/authentication.md")),
    ("user", include_str!("../content/user.md")),
    ("teams", include_str!("../content/teams.md")),
    ("product-overview", include_str!("../content/product-overview.md")),
    ("tournaments", include_str!("../content/tournaments.md")),
    ("casual-games", include_str!("../content/casual-games.md")),
    ("quests-rewards", include_str!("../content/quests-rewards.md")),
    ("shop", include_str!("../content/shop.md")),
    (
        "tournaments-api-overview",
        include_str!("../content/tournaments-api-overview.md"),
    ),
    (
        "tournaments-api-tournament",
        include_str!("../content/tournaments-api-tournament.md"),
    ),
    (
        "tournaments-api-rounds-groups",
        include_str!("../content/tournaments-api-rounds-groups.md"),
    ),
    (
        "tournaments-api-matches",
        include_str!("../content/tournaments-api-matches.md"),
    ),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One navigable documentation page.
pub struct Document {
    /// Page title from the `#` heading.
    pub title: String,
    /// Lead text shown under the title.
    pub description: String,
    /// Sections in page order.
    pub sections: Vec<Section>,
}

impl Document {
    #[must_use]
    /// Indices of the sections that document an endpoint.
    pub fn reference_indices(&self) -> BTreeSet<usize> {
        self.sections
            .iter()
            .enumerate()
            .filter(|(_, section)| section.is_reference())
            .map(|(index, _)| index)
            .collect()
    }

    #[must_use]
    /// Whether the section at `index` exists and documents an endpoint.
    pub fn is_reference_at(&self, index: usize) -> bool {
        self.sections.get(index).is_some_and(Section::is_reference)
    }
}

/// Immutable mapping from topic id to document.
pub struct ContentStore {
    documents: BTreeMap<String, Document>,
}

impl ContentStore {
    /// Parses the embedded topic sources.
    ///
    /// # Errors
    ///
    /// Returns the first [`ContentError`] hit while parsing a topic.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_sources(TOPIC_SOURCES.iter().copied())
    }

    /// Parses arbitrary `(topic id, markdown)` pairs with the markdown format.
    ///
    /// # Errors
    ///
    /// Returns the first [`ContentError`] hit while parsing a topic.
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ContentError> {
        let format = MarkdownFormat;
        let mut documents = BTreeMap::new();
        for (topic, source) in sources {
            if documents.contains_key(topic) {
                return Err(ContentError::DuplicateTopic {
                    topic: topic.to_string(),
                });
            }
            let document = format.parse_document(topic, source)?;
            tracing::debug!(
                topic,
                sections = document.sections.len(),
                "parsed topic source"
            );
            documents.insert(topic.to_string(), document);
        }
        tracing::info!(topics = documents.len(), "content store loaded");
        Ok(Self { documents })
    }

    #[must_use]
    /// Resolves a topic id to its document.
    pub fn lookup(&self, topic_id: &str) -> Option<&Document> {
        self.documents.get(topic_id)
    }

    #[must_use]
    /// Whether `topic_id` names a known topic.
    pub fn contains(&self, topic_id: &str) -> bool {
        self.documents.contains_key(topic_id)
    }

    /// Topic ids in lexical order.
    pub fn topic_ids(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    #[must_use]
    /// Number of topics held.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    /// Whether the store holds no topics at all.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/content.rs"]
mod tests;
