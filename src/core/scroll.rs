use serde::Serialize;

use crate::types::{Project, ProjectKind};

/// Distance below the top of the viewport at which a section counts as
/// reached.
pub const SCROLL_SPY_OFFSET: f64 = 100.0;

/// Index of the last section whose top is at or above the viewport's
/// effective top line. Offsets are in document order.
pub fn active_section(offsets: &[f64], scroll_y: f64, fixed_offset: f64) -> Option<usize> {
    let line = scroll_y + fixed_offset;
    offsets.iter().rposition(|top| *top <= line)
}

/// Anchor id of a category section on a project page.
pub fn section_anchor(category_slug: &str) -> String {
    format!("category-{}", category_slug)
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SectionAnchor {
    pub anchor: String,
    pub category_id: String,
    pub title: String,
}

/// Anchors of a professional project's sections, in document order.
pub fn section_anchors(project: &Project) -> Vec<SectionAnchor> {
    match &project.kind {
        ProjectKind::Professional { category_sections } => category_sections
            .iter()
            .map(|section| SectionAnchor {
                anchor: section_anchor(section.category.identity()),
                category_id: section.category.identity().to_string(),
                title: section.category.title.clone(),
            })
            .collect(),
        ProjectKind::Personal { .. } => Vec::new(),
    }
}

/// Tracks the active section across scroll events and reports only changes.
#[derive(Debug)]
pub struct ScrollSpy {
    offsets: Vec<f64>,
    fixed_offset: f64,
    active: Option<usize>,
}

impl ScrollSpy {
    pub fn new(offsets: Vec<f64>) -> Self {
        ScrollSpy {
            offsets,
            fixed_offset: SCROLL_SPY_OFFSET,
            active: None,
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Returns the new active section when it differs from the last one.
    pub fn update(&mut self, scroll_y: f64) -> Option<Option<usize>> {
        let next = active_section(&self.offsets, scroll_y, self.fixed_offset);
        if next == self.active {
            None
        } else {
            self.active = next;
            Some(next)
        }
    }
}
