use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ImageRef {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

impl ImageRef {
    pub fn new(url: &str) -> Self {
        ImageRef {
            url: url.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Category {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_image_url: Option<String>,
}

impl Category {
    /// The value used in the `category` query parameter and in section anchors.
    pub fn identity(&self) -> &str {
        if self.slug.trim().is_empty() {
            &self.id
        } else {
            &self.slug
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    TextBlock {
        #[serde(default)]
        text: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alignment: Option<String>,
    },
    ImageBlock {
        #[serde(default)]
        images: Vec<ImageRef>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_size: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_position: Option<String>,
    },
    ImageGallery {
        #[serde(default)]
        images: Vec<ImageRef>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        columns: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_style: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        spacing: Option<String>,
    },
    TextWithImage {
        #[serde(default)]
        text: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<ImageRef>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_position: Option<String>,
    },
    VideoBlock {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        aspect_ratio: Option<String>,
    },
}

impl ContentBlock {
    /// First image of an image or gallery block, if it has a URL.
    pub fn lead_image(&self) -> Option<&ImageRef> {
        match self {
            ContentBlock::ImageBlock { images, .. } | ContentBlock::ImageGallery { images, .. } => {
                images.first().filter(|image| !image.url.is_empty())
            }
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionPreview {
    Image { image: ImageRef },
    Text { text: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CategorySection {
    pub key: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<SectionPreview>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

impl CategorySection {
    pub fn preview_image(&self) -> Option<&ImageRef> {
        match &self.preview {
            Some(SectionPreview::Image { image }) if !image.url.is_empty() => Some(image),
            _ => None,
        }
    }

    pub fn preview_text(&self) -> Option<&str> {
        match &self.preview {
            Some(SectionPreview::Text { text }) => Some(text),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProjectKind {
    Personal {
        #[serde(default)]
        categories: Vec<Category>,
        #[serde(default)]
        content: Vec<ContentBlock>,
    },
    Professional {
        #[serde(default)]
        category_sections: Vec<CategorySection>,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_image: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub kind: ProjectKind,
}

impl Project {
    pub fn is_personal(&self) -> bool {
        matches!(self.kind, ProjectKind::Personal { .. })
    }

    pub fn cover_url(&self) -> Option<&str> {
        self.cover_image
            .as_ref()
            .map(|image| image.url.as_str())
            .filter(|url| !url.is_empty())
    }
}

fn default_scale() -> f64 {
    1.0
}

/// Presentation offsets of a curated placement.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Placement {
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub z_index: i32,
}

impl Default for Placement {
    fn default() -> Self {
        Placement {
            offset_x: 0.0,
            offset_y: 0.0,
            rotation: 0.0,
            scale: default_scale(),
            z_index: 0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FeaturedItem {
    pub key: String,
    #[serde(default)]
    pub project: Option<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_section_key: Option<String>,
    #[serde(flatten)]
    pub placement: Placement,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ListingPage {
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_image_url: Option<String>,
    #[serde(default)]
    pub featured: Vec<FeaturedItem>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ContentSnapshot {
    #[serde(default = "Uuid::nil")]
    pub revision: Uuid,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub pages: Vec<ListingPage>,
}

impl ContentSnapshot {
    pub fn empty() -> Self {
        ContentSnapshot {
            revision: Uuid::nil(),
            updated_at: String::new(),
            categories: Vec::new(),
            projects: Vec::new(),
            pages: Vec::new(),
        }
    }

    pub fn page(&self, slug: &str) -> Option<&ListingPage> {
        self.pages.iter().find(|page| page.slug == slug)
    }

    pub fn project(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.slug == slug)
    }
}
