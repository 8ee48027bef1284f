use serde::Serialize;
use tracing::debug;

use crate::core::keys::{clean_opt, find_section};
use crate::core::scroll::section_anchor;
use crate::types::{CategorySection, FeaturedItem, Placement, Project, ProjectKind};

fn matched_section<'a>(item: &FeaturedItem, project: &'a Project) -> Option<&'a CategorySection> {
    match &project.kind {
        ProjectKind::Professional { category_sections } => item
            .category_section_key
            .as_deref()
            .and_then(|key| find_section(category_sections, key)),
        ProjectKind::Personal { .. } => None,
    }
}

/// Picks the preview image of a featured item.
///
/// Personal projects use their cover. Professional projects prefer the
/// matched section's preview, then the first image in that section's
/// content, then the project cover. `None` means the item must not be
/// rendered.
pub fn resolve_cover(item: &FeaturedItem) -> Option<&str> {
    let project = item.project.as_ref()?;
    if project.is_personal() {
        return project.cover_url();
    }

    let from_section = matched_section(item, project).and_then(|section| {
        section
            .preview_image()
            .or_else(|| section.content.iter().find_map(|block| block.lead_image()))
            .map(|image| image.url.as_str())
    });
    from_section.or_else(|| project.cover_url())
}

/// Cover alt text, falling back to the project title.
pub fn alt_for(project: &Project) -> String {
    clean_opt(project.cover_image.as_ref().and_then(|image| image.alt.as_deref()))
        .unwrap_or_else(|| project.title.clone())
}

/// Link target of a featured item. Personal projects open in a modal and
/// have none.
pub fn href_for(item: &FeaturedItem, group_slug: &str) -> Option<String> {
    let project = item.project.as_ref()?;
    if project.is_personal() {
        return None;
    }
    let type_slug = project
        .project_type_slug
        .as_deref()
        .filter(|slug| !slug.is_empty())
        .unwrap_or(group_slug);
    let mut href = format!("/{}/{}", type_slug, project.slug);
    if let Some(section) = matched_section(item, project) {
        let identity = section.category.identity();
        if !identity.is_empty() {
            href.push('#');
            href.push_str(&section_anchor(identity));
        }
    }
    Some(href)
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct GridItem {
    pub key: String,
    pub project_id: String,
    pub title: String,
    pub cover_url: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub opens_modal: bool,
    pub placement: Placement,
}

/// Resolves featured items into renderable cards. Items without a project
/// or without a cover are left out.
pub fn grid_items<'a, I>(items: I, group_slug: &str) -> Vec<GridItem>
where
    I: IntoIterator<Item = &'a FeaturedItem>,
{
    items
        .into_iter()
        .filter_map(|item| {
            let project = item.project.as_ref()?;
            let Some(cover_url) = resolve_cover(item) else {
                debug!("Skipping \"{}\": no cover image", item.key);
                return None;
            };
            Some(GridItem {
                key: item.key.clone(),
                project_id: project.id.clone(),
                title: project.title.clone(),
                cover_url: cover_url.to_string(),
                alt: alt_for(project),
                title_image_url: project
                    .title_image
                    .as_ref()
                    .map(|image| image.url.clone())
                    .filter(|url| !url.is_empty()),
                href: href_for(item, group_slug),
                opens_modal: project.is_personal(),
                placement: item.placement.clone(),
            })
        })
        .collect()
}
