use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::core::keys::{find_section, strip_invisible};
use crate::types::{Category, FeaturedItem, Project, ProjectKind};

/// Categories a featured item is filed under.
///
/// Personal projects contribute every tagged category. Professional projects
/// contribute the category of the section the item points at, if any.
pub fn item_categories(item: &FeaturedItem) -> Vec<&Category> {
    let Some(project) = &item.project else {
        return Vec::new();
    };
    match &project.kind {
        ProjectKind::Personal { categories, .. } => categories.iter().collect(),
        ProjectKind::Professional { category_sections } => item
            .category_section_key
            .as_deref()
            .and_then(|key| find_section(category_sections, key))
            .map(|section| vec![&section.category])
            .unwrap_or_default(),
    }
}

/// Navigable categories for a listing page, in first-seen order.
pub fn build_category_index(items: &[FeaturedItem]) -> Vec<Category> {
    let mut seen = HashSet::new();
    let mut index = Vec::new();
    for item in items {
        let categories = item_categories(item);
        if categories.is_empty() {
            debug!("Featured item \"{}\" has no category", item.key);
        }
        for category in categories {
            let identity = strip_invisible(category.identity());
            if identity.is_empty() {
                continue;
            }
            if seen.insert(identity) {
                index.push(category.clone());
            }
        }
    }
    index
}

/// Whether a featured item belongs to the category with the given identity.
pub fn item_matches_category(item: &FeaturedItem, category_id: &str) -> bool {
    let wanted = strip_invisible(category_id);
    !wanted.is_empty()
        && item_categories(item)
            .iter()
            .any(|category| strip_invisible(category.identity()) == wanted)
}

/// Catalogue membership, independent of any curated placement.
pub fn project_in_category(project: &Project, category: &Category) -> bool {
    match &project.kind {
        ProjectKind::Personal { categories, .. } => categories.iter().any(|c| c.id == category.id),
        ProjectKind::Professional { category_sections } => category_sections
            .iter()
            .any(|section| section.category.id == category.id),
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct CategoryGroup<'a> {
    pub category: &'a Category,
    pub projects: Vec<&'a Project>,
}

/// Groups the catalogue by category, keeping catalogue order and dropping
/// categories nothing belongs to.
pub fn group_by_category<'a>(categories: &'a [Category], projects: &'a [Project]) -> Vec<CategoryGroup<'a>> {
    categories
        .iter()
        .map(|category| CategoryGroup {
            category,
            projects: projects
                .iter()
                .filter(|project| project_in_category(project, category))
                .collect(),
        })
        .filter(|group| !group.projects.is_empty())
        .collect()
}

fn in_group(project: &Project, group: &str) -> bool {
    project.project_type_slug.as_deref() == Some(group)
}

/// Projects of one project type that belong to a category.
pub fn projects_in_group_category<'a>(projects: &'a [Project], group: &str, category: &Category) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|project| in_group(project, group) && project_in_category(project, category))
        .collect()
}

/// Catalogue categories that at least one project of the group belongs to.
pub fn group_categories<'a>(categories: &'a [Category], projects: &[Project], group: &str) -> Vec<&'a Category> {
    categories
        .iter()
        .filter(|category| {
            projects
                .iter()
                .any(|project| in_group(project, group) && project_in_category(project, category))
        })
        .collect()
}

/// Looks a catalogue category up by its identity.
pub fn find_category<'a>(categories: &'a [Category], identity: &str) -> Option<&'a Category> {
    let wanted = strip_invisible(identity);
    if wanted.is_empty() {
        return None;
    }
    categories
        .iter()
        .find(|category| strip_invisible(category.identity()) == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::core::fixtures::{arb_items, category, item, orphan, personal, professional, section, works_page};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn index_is_unique_and_in_first_seen_order(items in arb_items()) {
            let index = build_category_index(&items);
            let stream: Vec<String> = items
                .iter()
                .flat_map(item_categories)
                .map(|c| strip_invisible(c.identity()))
                .collect();

            let listed: Vec<String> = index.iter().map(|c| strip_invisible(c.identity())).collect();
            let unique: HashSet<&String> = listed.iter().collect();
            prop_assert_eq!(unique.len(), listed.len());

            let all: HashSet<&String> = stream.iter().collect();
            prop_assert_eq!(unique, all);

            let first_seen = |id: &String| stream.iter().position(|s| s == id);
            for pair in listed.windows(2) {
                prop_assert!(first_seen(&pair[0]) < first_seen(&pair[1]));
            }
        }
    }

    fn identities(index: &[Category]) -> Vec<&str> {
        index.iter().map(|c| c.identity()).collect()
    }

    #[test]
    fn index_keeps_first_seen_order_without_duplicates() {
        let page = works_page();
        let index = build_category_index(&page.featured);
        assert_eq!(identities(&index), vec!["fashion", "sculpture", "video", "editorial"]);
    }

    #[test]
    fn first_duplicate_wins() {
        let mut first = category("c1", "video");
        first.title = "Moving image".to_string();
        let mut second = category("c1-copy", "video\u{200B}");
        second.title = "Video".to_string();

        let items = vec![
            item("a", personal("one", None, vec![first]), None),
            item("b", personal("two", None, vec![second]), None),
        ];
        let index = build_category_index(&items);
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].title, "Moving image");
    }

    #[test]
    fn prefix_collision_resolves_to_first_section() {
        let project = professional(
            "collide",
            None,
            vec![
                section("abcdef123456-v1", category("c1", "fashion")),
                section("abcdef123456-v2", category("c2", "editorial")),
            ],
        );
        let items = vec![item("a", project, Some("abcdef123456-v2"))];
        assert_eq!(identities(&build_category_index(&items)), vec!["fashion"]);
    }

    #[test]
    fn unmatched_and_orphan_items_contribute_nothing() {
        let project = professional("p", None, vec![section("abcdef123456", category("c1", "fashion"))]);
        let items = vec![
            item("a", project.clone(), Some("zzzzzzzzzzzz")),
            item("b", project, None),
            orphan("c"),
        ];
        assert!(build_category_index(&items).is_empty());
    }

    #[test]
    fn matching_branches_on_kind() {
        let page = works_page();
        let dust = &page.featured[1];
        assert!(item_matches_category(dust, "video"));
        assert!(!item_matches_category(dust, "painting"));

        let maison_fashion = &page.featured[0];
        assert!(item_matches_category(maison_fashion, "fashion"));
        assert!(!item_matches_category(maison_fashion, "editorial"));

        assert!(!item_matches_category(&page.featured[4], "fashion"));
        assert!(!item_matches_category(dust, ""));
    }

    fn group_catalogue() -> (Vec<Category>, Vec<Project>) {
        let video = category("c-video", "video");
        let fashion = category("c-fashion", "fashion");
        let mut untitled = category("c-untitled", "");
        untitled.title = "Untitled".to_string();
        let mut dust = personal("dust", None, vec![video.clone(), untitled.clone()]);
        dust.project_type_slug = Some("studio".to_string());
        let mut film = personal("film", None, vec![video.clone()]);
        film.project_type_slug = Some("films".to_string());
        let maison = professional("maison", None, vec![section("k1", fashion.clone())]);
        (vec![video, fashion, untitled, category("c-paint", "painting")], vec![dust, film, maison])
    }

    #[test]
    fn group_category_lists_only_that_group() {
        let (catalogue, projects) = group_catalogue();
        let slugs = |found: Vec<&Project>| found.into_iter().map(|p| p.slug.clone()).collect::<Vec<_>>();

        assert_eq!(slugs(projects_in_group_category(&projects, "studio", &catalogue[0])), vec!["dust"]);
        assert_eq!(slugs(projects_in_group_category(&projects, "films", &catalogue[0])), vec!["film"]);
        assert_eq!(slugs(projects_in_group_category(&projects, "studio", &catalogue[1])), vec!["maison"]);
        assert!(projects_in_group_category(&projects, "films", &catalogue[1]).is_empty());
    }

    #[test]
    fn group_nav_keeps_categories_used_by_the_group() {
        let (catalogue, projects) = group_catalogue();
        let nav: Vec<_> = group_categories(&catalogue, &projects, "studio")
            .into_iter()
            .map(|c| c.identity())
            .collect();
        assert_eq!(nav, vec!["video", "fashion", "c-untitled"]);
        assert!(group_categories(&catalogue, &projects, "nobody").is_empty());
    }

    #[test]
    fn categories_are_found_by_slug_or_id() {
        let (catalogue, _) = group_catalogue();
        assert_eq!(find_category(&catalogue, "video").unwrap().id, "c-video");
        assert_eq!(find_category(&catalogue, "c-untitled\u{200B}").unwrap().title, "Untitled");
        assert!(find_category(&catalogue, "sculpture").is_none());
        assert!(find_category(&catalogue, "").is_none());
    }

    #[test]
    fn grouping_skips_empty_categories() {
        let catalogue = vec![
            category("c-video", "video"),
            category("c-painting", "painting"),
            category("c-fashion", "fashion"),
        ];
        let projects = vec![
            personal("dust", None, vec![category("c-video", "video")]),
            professional("maison", None, vec![section("k1", category("c-fashion", "fashion"))]),
        ];
        let groups = group_by_category(&catalogue, &projects);
        let slugs: Vec<_> = groups.iter().map(|g| g.category.slug.as_str()).collect();
        assert_eq!(slugs, vec!["video", "fashion"]);
        assert_eq!(groups[1].projects[0].slug, "maison");
    }
}
