//! Builders shared by the unit tests.

use proptest::prelude::*;

use crate::types::{
    Category, CategorySection, ContentBlock, FeaturedItem, ImageRef, ListingPage, Placement, Project,
    ProjectKind, SectionPreview,
};

pub fn category(id: &str, slug: &str) -> Category {
    Category {
        id: id.to_string(),
        title: slug.to_uppercase(),
        slug: slug.to_string(),
        title_image_url: None,
    }
}

pub fn section(key: &str, category: Category) -> CategorySection {
    CategorySection {
        key: key.to_string(),
        category,
        preview: None,
        content: Vec::new(),
    }
}

pub fn section_with_preview(key: &str, category: Category, url: &str) -> CategorySection {
    CategorySection {
        preview: Some(SectionPreview::Image {
            image: ImageRef::new(url),
        }),
        ..section(key, category)
    }
}

pub fn gallery(urls: &[&str]) -> ContentBlock {
    ContentBlock::ImageGallery {
        images: urls.iter().map(|url| ImageRef::new(url)).collect(),
        columns: None,
        display_style: None,
        spacing: None,
    }
}

pub fn personal(slug: &str, cover: Option<&str>, categories: Vec<Category>) -> Project {
    Project {
        id: format!("id-{}", slug),
        title: slug.to_string(),
        slug: slug.to_string(),
        project_type_slug: None,
        title_image: None,
        cover_image: cover.map(ImageRef::new),
        description: None,
        kind: ProjectKind::Personal {
            categories,
            content: Vec::new(),
        },
    }
}

pub fn professional(slug: &str, cover: Option<&str>, sections: Vec<CategorySection>) -> Project {
    Project {
        id: format!("id-{}", slug),
        title: slug.to_string(),
        slug: slug.to_string(),
        project_type_slug: Some("studio".to_string()),
        title_image: None,
        cover_image: cover.map(ImageRef::new),
        description: None,
        kind: ProjectKind::Professional {
            category_sections: sections,
        },
    }
}

pub fn item(key: &str, project: Project, section_key: Option<&str>) -> FeaturedItem {
    FeaturedItem {
        key: key.to_string(),
        project: Some(project),
        category_section_key: section_key.map(str::to_string),
        placement: Placement::default(),
    }
}

pub fn orphan(key: &str) -> FeaturedItem {
    FeaturedItem {
        key: key.to_string(),
        project: None,
        category_section_key: None,
        placement: Placement::default(),
    }
}

/// A listing page mixing both project shapes.
pub fn works_page() -> ListingPage {
    let fashion = category("c-fashion", "fashion");
    let editorial = category("c-editorial", "editorial");
    let sculpture = category("c-sculpture", "sculpture");
    let video = category("c-video", "video");

    let studio = professional(
        "maison",
        Some("https://cdn/maison-cover.jpg"),
        vec![
            section_with_preview("fashion00001-a", fashion.clone(), "https://cdn/maison-fashion.jpg"),
            section("editorial001-a", editorial.clone()),
        ],
    );
    let dust = personal(
        "dust",
        Some("https://cdn/dust.jpg"),
        vec![sculpture.clone(), video.clone()],
    );
    let lost = professional("lost", None, vec![section("fashion00002-a", fashion.clone())]);

    ListingPage {
        slug: "works".to_string(),
        title: "Works".to_string(),
        title_image_url: Some("https://cdn/works-title.png".to_string()),
        featured: vec![
            item("i1", studio.clone(), Some("fashion00001-b")),
            item("i2", dust, None),
            item("i3", studio, Some("editorial001")),
            item("i4", lost, Some("nomatch00000")),
            orphan("i5"),
        ],
    }
}

const POOL: [&str; 6] = ["fashion", "video", "sculpture", "editorial", "painting", "prints"];

fn pooled(n: usize) -> Category {
    category(&format!("c-{}", POOL[n]), POOL[n])
}

/// Arbitrary listing content: personal items tagged from a small pool,
/// professional items pointing at one of their sections (or at nothing),
/// and items without a project.
pub fn arb_items() -> impl Strategy<Value = Vec<FeaturedItem>> {
    let entry = (0..3u8, prop::collection::vec(0..POOL.len(), 0..4), 0..POOL.len() + 2);
    prop::collection::vec(entry, 0..12).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(n, (kind, tags, pick))| {
                let key = format!("item-{}", n);
                match kind {
                    0 => {
                        let categories = tags.into_iter().map(pooled).collect();
                        item(&key, personal(&key, Some("https://cdn/p.jpg"), categories), None)
                    }
                    1 => {
                        let sections = tags
                            .into_iter()
                            .map(|t| section(&format!("section{:05}-{}", t, n), pooled(t)))
                            .collect();
                        let pointer = format!("section{:05}", pick);
                        item(&key, professional(&key, None, sections), Some(&pointer))
                    }
                    _ => orphan(&key),
                }
            })
            .collect()
    })
}
