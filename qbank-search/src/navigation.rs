//! Static navigation catalog.
//!
//! A fixed list of feature pages, built once at startup and shared
//! read-only. It is not a scoped source: its filtered entries are appended
//! to every searchable query, and the full list answers short queries.

use serde::Serialize;

use crate::query::Pattern;
use crate::types::{ResultType, SearchResult};

/// A link to an application feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub url: &'static str,
}

impl NavigationEntry {
    fn to_result(&self) -> SearchResult {
        SearchResult::new(self.id, self.title, self.description, ResultType::Navigation)
            .with_url(self.url)
    }
}

const DEFAULT_ENTRIES: &[NavigationEntry] = &[
    NavigationEntry {
        id: "nav-dashboard",
        title: "Dashboard",
        description: "Overview of question bank activity and statistics",
        url: "/dashboard",
    },
    NavigationEntry {
        id: "nav-question-bank",
        title: "Question Bank",
        description: "Browse previous exam questions by course and trimester",
        url: "/question-bank",
    },
    NavigationEntry {
        id: "nav-upload-questions",
        title: "Upload Questions",
        description: "Add new exam questions to the question bank",
        url: "/question-bank/upload",
    },
    NavigationEntry {
        id: "nav-courses",
        title: "Courses",
        description: "Manage the course catalogue and departments",
        url: "/courses",
    },
    NavigationEntry {
        id: "nav-users",
        title: "User Management",
        description: "Manage student, teacher and admin accounts",
        url: "/admin/users",
    },
    NavigationEntry {
        id: "nav-agents",
        title: "AI Agents",
        description: "Configure study assistants and their prompts",
        url: "/agents",
    },
    NavigationEntry {
        id: "nav-ai-chat",
        title: "AI Chat",
        description: "Ask an assistant about course material",
        url: "/chat",
    },
    NavigationEntry {
        id: "nav-audit-logs",
        title: "Audit Logs",
        description: "Review administrative actions and system activity",
        url: "/admin/audit-logs",
    },
    NavigationEntry {
        id: "nav-analytics",
        title: "Analytics",
        description: "Usage trends and popular courses",
        url: "/admin/analytics",
    },
    NavigationEntry {
        id: "nav-profile",
        title: "My Profile",
        description: "View and edit your profile details",
        url: "/profile",
    },
    NavigationEntry {
        id: "nav-settings",
        title: "Settings",
        description: "Application preferences and account settings",
        url: "/settings",
    },
    NavigationEntry {
        id: "nav-help",
        title: "Help & Support",
        description: "Guides, FAQs and contact information",
        url: "/help",
    },
];

/// The immutable navigation catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationCatalog {
    entries: Vec<NavigationEntry>,
}

impl Default for NavigationCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRIES.to_vec())
    }
}

impl NavigationCatalog {
    /// Build a catalog from explicit entries.
    pub fn new(entries: Vec<NavigationEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry, in catalog order.
    pub fn all(&self) -> Vec<SearchResult> {
        self.entries.iter().map(NavigationEntry::to_result).collect()
    }

    /// Entries whose title or description contains the pattern.
    pub fn filter(&self, pattern: &Pattern) -> Vec<SearchResult> {
        self.entries
            .iter()
            .filter(|entry| pattern.is_match(entry.title) || pattern.is_match(entry.description))
            .map(NavigationEntry::to_result)
            .collect()
    }
}
