//! Sidebar structure: named groups of topics and one collapsible sub-group.
//!
//! The tree is fixed. What changes at runtime (which topic is active, whether the sub-group is
//! open) lives in [`crate::app_state::UiState`]; this module only answers structural questions
//! such as "is this topic inside the sub-group" and "what rows are visible".

/// Footer shown under the topic list.
pub const VERSION_LABEL: &str = "Version 1.0.0";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Glyph drawn before a topic label.
pub enum Icon {
    /// Introductory reading.
    Book,
    /// Quick start.
    Zap,
    /// Security topics.
    Shield,
    /// Single-user APIs.
    User,
    /// Team APIs.
    Users,
    /// Product overview.
    Layers,
    /// Tournaments.
    Trophy,
    /// Casual games.
    Gamepad,
    /// Quests and rewards.
    Gift,
    /// Shop.
    Store,
    /// API reference pages.
    Code,
}

impl Icon {
    #[must_use]
    /// Terminal glyph for the icon.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Book => "📖",
            Self::Zap => "⚡",
            Self::Shield => "🛡",
            Self::User => "👤",
            Self::Users => "👥",
            Self::Layers => "🗂",
            Self::Trophy => "🏆",
            Self::Gamepad => "🎮",
            Self::Gift => "🎁",
            Self::Store => "🛒",
            Self::Code => "📄",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One clickable topic.
pub struct TopicEntry {
    /// Content store key.
    pub id: &'static str,
    /// Label shown in the sidebar.
    pub title: &'static str,
    /// Leading glyph.
    pub icon: Icon,
}

const fn topic(id: &'static str, title: &'static str, icon: Icon) -> TopicEntry {
    TopicEntry { id, title, icon }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Entry of a group: a topic, or a nested set of topics under a heading.
pub enum NavItem {
    /// A plain topic.
    Topic(TopicEntry),
    /// A collapsible parent heading with its own topics.
    SubGroup {
        /// Heading of the sub-group.
        title: &'static str,
        /// Glyph of the heading row.
        icon: Icon,
        /// Nested topics.
        topics: Vec<TopicEntry>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A titled run of sidebar items.
pub struct NavGroup {
    /// Upper-cased heading in the sidebar.
    pub title: &'static str,
    /// Items in display order.
    pub items: Vec<NavItem>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One visible line of the sidebar.
pub enum SidebarRow {
    /// Group heading; not selectable.
    Group(&'static str),
    /// Topic row; `nested` when it belongs to the sub-group.
    Topic {
        /// The topic shown on this row.
        entry: TopicEntry,
        /// Whether the row is indented under the sub-group heading.
        nested: bool,
    },
    /// Sub-group heading row.
    SubGroup {
        /// Heading text.
        title: &'static str,
        /// Heading glyph.
        icon: Icon,
        /// Whether the nested topics are currently shown.
        expanded: bool,
    },
}

impl SidebarRow {
    #[must_use]
    /// Group headings are skipped by the cursor.
    pub fn is_selectable(&self) -> bool {
        !matches!(self, Self::Group(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// The full navigation tree.
pub struct Sidebar {
    /// Groups in display order.
    pub groups: Vec<NavGroup>,
}

impl Sidebar {
    #[must_use]
    /// The metaninza documentation tree.
    pub fn standard() -> Self {
        Self {
            groups: vec![
                NavGroup {
                    title: "Product",
                    items: vec![
                        NavItem::Topic(topic("product-overview", "Product Overview", Icon::Layers)),
                        NavItem::Topic(topic("tournaments", "Tournaments", Icon::Trophy)),
                        NavItem::Topic(topic("casual-games", "Casual Games", Icon::Gamepad)),
                        NavItem::Topic(topic("quests-rewards", "Quests & Rewards", Icon::Gift)),
                        NavItem::Topic(topic("shop", "Shop", Icon::Store)),
                    ],
                },
                NavGroup {
                    title: "Documentation",
                    items: vec![
                        NavItem::Topic(topic("introduction", "Introduction", Icon::Book)),
                        NavItem::Topic(topic("getting-started", "Getting Started", Icon::Zap)),
                        NavItem::Topic(topic("authentication", "Authentication", Icon::Shield)),
                        NavItem::Topic(topic("user", "User & Login", Icon::User)),
                        NavItem::Topic(topic("teams", "Teams", Icon::Users)),
                    ],
                },
                NavGroup {
                    title: "API Reference",
                    items: vec![NavItem::SubGroup {
                        title: "Tournaments",
                        icon: Icon::Trophy,
                        topics: vec![
                            topic("tournaments-api-overview", "Overview", Icon::Code),
                            topic("tournaments-api-tournament", "Tournament", Icon::Code),
                            topic("tournaments-api-rounds-groups", "Rounds & Groups", Icon::Code),
                            topic("tournaments-api-matches", "Matches", Icon::Code),
                        ],
                    }],
                },
            ],
        }
    }

    /// Every topic in display order, nested ones included.
    pub fn topics(&self) -> impl Iterator<Item = &TopicEntry> {
        self.groups
            .iter()
            .flat_map(|group| group.items.iter())
            .flat_map(|item| match item {
                NavItem::Topic(entry) => std::slice::from_ref(entry).iter(),
                NavItem::SubGroup { topics, .. } => topics.iter(),
            })
    }

    #[must_use]
    /// Whether `topic_id` is one of the sub-group's nested topics.
    pub fn in_subgroup(&self, topic_id: &str) -> bool {
        self.groups
            .iter()
            .flat_map(|group| group.items.iter())
            .any(|item| match item {
                NavItem::SubGroup { topics, .. } => topics.iter().any(|t| t.id == topic_id),
                NavItem::Topic(_) => false,
            })
    }

    #[must_use]
    /// Sidebar label for a topic id.
    pub fn title_of(&self, topic_id: &str) -> Option<&'static str> {
        self.topics().find(|t| t.id == topic_id).map(|t| t.title)
    }

    #[must_use]
    /// Visible rows given the sub-group's expansion.
    pub fn rows(&self, subgroup_expanded: bool) -> Vec<SidebarRow> {
        let mut rows = Vec::new();
        for group in &self.groups {
            rows.push(SidebarRow::Group(group.title));
            for item in &group.items {
                match item {
                    NavItem::Topic(entry) => rows.push(SidebarRow::Topic {
                        entry: *entry,
                        nested: false,
                    }),
                    NavItem::SubGroup {
                        title,
                        icon,
                        topics,
                    } => {
                        rows.push(SidebarRow::SubGroup {
                            title: *title,
                            icon: *icon,
                            expanded: subgroup_expanded,
                        });
                        if subgroup_expanded {
                            rows.extend(topics.iter().map(|entry| SidebarRow::Topic {
                                entry: *entry,
                                nested: true,
                            }));
                        }
                    }
                }
            }
        }
        rows
    }

    #[must_use]
    /// Row index of a topic, if it is currently visible.
    pub fn row_of(&self, topic_id: &str, subgroup_expanded: bool) -> Option<usize> {
        self.rows(subgroup_expanded)
            .iter()
            .position(|row| matches!(row, SidebarRow::Topic { entry, .. } if entry.id == topic_id))
    }
}

#[cfg(test)]
#[path = "tests/navigation.rs"]
mod tests;
