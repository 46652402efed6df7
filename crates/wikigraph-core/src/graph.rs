//! Adjacency consistency checks.
//!
//! Pages and sections each record their own view of a containment edge
//! (`hasPart` on the page, `isPartOf` on the section). The types never sync
//! the two sides. [`check_adjacency`] reports where they disagree, for the
//! nodes it is given; edges pointing outside that set are not checked.

use crate::content::{Identifier, Page, Section};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A disagreement between the two endpoints of a containment edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Inconsistency {
    /// Page lists the section, but the section does not list the page
    MissingBackEdge {
        /// Parent page
        page: Identifier,
        /// Child section
        section: Identifier,
    },
    /// Section lists the page, but the page does not list the section
    MissingForwardEdge {
        /// Parent page
        page: Identifier,
        /// Child section
        section: Identifier,
    },
    /// The same child appears more than once in a page's `hasPart`
    DuplicatePart {
        /// Parent page
        page: Identifier,
        /// Repeated child
        part: Identifier,
    },
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBackEdge { page, section } => {
                write!(f, "{page} hasPart {section}, but {section} is not part of {page}")
            }
            Self::MissingForwardEdge { page, section } => {
                write!(f, "{section} isPartOf {page}, but {page} does not list it")
            }
            Self::DuplicatePart { page, part } => {
                write!(f, "{page} lists {part} more than once")
            }
        }
    }
}

/// Check that `hasPart` and `isPartOf` agree across the given nodes.
///
/// Returns an empty vector when the graph is consistent. Findings are
/// ordered page by page, then section by section, following input order.
#[must_use]
pub fn check_adjacency(pages: &[Page], sections: &[Section]) -> Vec<Inconsistency> {
    let pages_by_id: HashMap<&str, &Page> = pages.iter().map(|p| (p.id.as_str(), p)).collect();
    let sections_by_id: HashMap<&str, &Section> =
        sections.iter().map(|s| (s.id.as_str(), s)).collect();

    let mut found = Vec::new();

    for page in pages {
        let mut seen = HashSet::new();
        for part in &page.has_part {
            if !seen.insert(part.as_str()) {
                found.push(Inconsistency::DuplicatePart {
                    page: page.id.clone(),
                    part: part.clone(),
                });
                continue;
            }
            if let Some(section) = sections_by_id.get(part.as_str()) {
                if !section.belongs_to(&page.id) {
                    found.push(Inconsistency::MissingBackEdge {
                        page: page.id.clone(),
                        section: section.id.clone(),
                    });
                }
            }
        }
    }

    for section in sections {
        for parent in &section.is_part_of {
            if let Some(page) = pages_by_id.get(parent.as_str()) {
                if !page.contains_part(&section.id) {
                    found.push(Inconsistency::MissingForwardEdge {
                        page: page.id.clone(),
                        section: section.id.clone(),
                    });
                }
            }
        }
    }

    tracing::debug!(
        pages = pages.len(),
        sections = sections.len(),
        inconsistencies = found.len(),
        "Checked adjacency"
    );
    found
}
