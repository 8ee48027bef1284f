//! Category selection state and its projection onto the URL query string.
//!
//! The query string is read once, when the state is created. After that the
//! state is the only source of truth and every transition writes it back.

use std::fmt;

use tracing::{debug, warn};

use crate::core::index::item_matches_category;
use crate::core::keys::strip_invisible;
use crate::types::FeaturedItem;

pub const CATEGORY_PARAM: &str = "category";

/// Narrow view of wherever the selection is persisted between requests.
pub trait QueryChannel {
    fn read_param(&self, name: &str) -> Option<String>;
    /// Sets `name`, or removes it when `value` is `None`.
    fn write_param(&mut self, name: &str, value: Option<&str>);
}

/// An `application/x-www-form-urlencoded` query string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    /// Parses a raw query. Malformed input yields an empty query.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim_start_matches('?');
        match serde_urlencoded::from_str::<Vec<(String, String)>>(raw) {
            Ok(pairs) => QueryString { pairs },
            Err(error) => {
                warn!("Ignoring malformed query string \"{}\": {}", raw, error);
                QueryString::default()
            }
        }
    }
}

impl QueryChannel for QueryString {
    fn read_param(&self, name: &str) -> Option<String> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    fn write_param(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) => match self.pairs.iter_mut().find(|(key, _)| key == name) {
                Some(pair) => pair.1 = value.to_string(),
                None => self.pairs.push((name.to_string(), value.to_string())),
            },
            None => self.pairs.retain(|(key, _)| key != name),
        }
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = serde_urlencoded::to_string(&self.pairs).map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

pub struct FilterState<C: QueryChannel> {
    selected: Option<String>,
    channel: C,
}

impl<C: QueryChannel> FilterState<C> {
    /// Hydrates the initial selection from the channel.
    pub fn new(channel: C) -> Self {
        let selected = channel
            .read_param(CATEGORY_PARAM)
            .map(|value| strip_invisible(&value))
            .filter(|value| !value.is_empty());
        if let Some(category) = &selected {
            debug!("Hydrated category selection \"{}\"", category);
        }
        FilterState { selected, channel }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn into_channel(self) -> C {
        self.channel
    }

    /// Selects a category, or deselects it when it is already selected.
    pub fn select(&mut self, category_id: &str) {
        let category_id = strip_invisible(category_id);
        if category_id.is_empty() || self.selected.as_deref() == Some(category_id.as_str()) {
            self.selected = None;
        } else {
            self.selected = Some(category_id);
        }
        self.project();
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.project();
    }

    /// Featured items visible under the current selection. An unknown
    /// category yields nothing.
    pub fn filter<'a>(&self, items: &'a [FeaturedItem]) -> Vec<&'a FeaturedItem> {
        match &self.selected {
            None => items.iter().collect(),
            Some(category_id) => items
                .iter()
                .filter(|item| item_matches_category(item, category_id))
                .collect(),
        }
    }

    fn project(&mut self) {
        self.channel.write_param(CATEGORY_PARAM, self.selected.as_deref());
    }
}
