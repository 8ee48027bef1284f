use crate::core::keys::{clean_opt, strip_invisible};
use crate::types::{CategorySection, ContentBlock, ImageRef, Project, ProjectKind, SectionPreview};

fn clean_image(image: &ImageRef) -> ImageRef {
    ImageRef {
        url: image.url.trim().to_string(),
        alt: clean_opt(image.alt.as_deref()),
        caption: clean_opt(image.caption.as_deref()),
        material: clean_opt(image.material.as_deref()),
        dimensions: clean_opt(image.dimensions.as_deref()),
        year: clean_opt(image.year.as_deref()),
    }
}

fn clean_text(text: &[String]) -> Vec<String> {
    text.iter().map(|line| strip_invisible(line)).collect()
}

/// Copy of a content block with invisible characters removed from every
/// text and layout field.
pub fn clean_block(block: &ContentBlock) -> ContentBlock {
    match block {
        ContentBlock::TextBlock { text, alignment } => ContentBlock::TextBlock {
            text: clean_text(text),
            alignment: clean_opt(alignment.as_deref()),
        },
        ContentBlock::ImageBlock {
            images,
            image_size,
            image_position,
        } => ContentBlock::ImageBlock {
            images: images.iter().map(clean_image).collect(),
            image_size: clean_opt(image_size.as_deref()),
            image_position: clean_opt(image_position.as_deref()),
        },
        ContentBlock::ImageGallery {
            images,
            columns,
            display_style,
            spacing,
        } => ContentBlock::ImageGallery {
            images: images.iter().map(clean_image).collect(),
            columns: clean_opt(columns.as_deref()),
            display_style: clean_opt(display_style.as_deref()),
            spacing: clean_opt(spacing.as_deref()),
        },
        ContentBlock::TextWithImage {
            text,
            image,
            image_position,
        } => ContentBlock::TextWithImage {
            text: clean_text(text),
            image: image.as_ref().map(clean_image),
            image_position: clean_opt(image_position.as_deref()),
        },
        ContentBlock::VideoBlock { url, aspect_ratio } => ContentBlock::VideoBlock {
            url: url.trim().to_string(),
            aspect_ratio: clean_opt(aspect_ratio.as_deref()),
        },
    }
}

fn clean_section(section: &CategorySection) -> CategorySection {
    CategorySection {
        key: section.key.clone(),
        category: section.category.clone(),
        preview: section.preview.as_ref().map(|preview| match preview {
            SectionPreview::Image { image } => SectionPreview::Image {
                image: clean_image(image),
            },
            SectionPreview::Text { text } => SectionPreview::Text {
                text: strip_invisible(text),
            },
        }),
        content: section.content.iter().map(clean_block).collect(),
    }
}

/// Copy of a project ready to be served on its detail page.
pub fn clean_project(project: &Project) -> Project {
    let kind = match &project.kind {
        ProjectKind::Personal { categories, content } => ProjectKind::Personal {
            categories: categories.clone(),
            content: content.iter().map(clean_block).collect(),
        },
        ProjectKind::Professional { category_sections } => ProjectKind::Professional {
            category_sections: category_sections.iter().map(clean_section).collect(),
        },
    };
    Project {
        title: strip_invisible(&project.title),
        description: clean_opt(project.description.as_deref()),
        title_image: project.title_image.as_ref().map(clean_image),
        cover_image: project.cover_image.as_ref().map(clean_image),
        kind,
        ..project.clone()
    }
}
