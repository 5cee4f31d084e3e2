use crate::config::{MAX_TAGS, MAX_TAG_LENGTH};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("Cannot add an empty tag")]
    Empty,
    #[error("Already Tagged")]
    Duplicate,
    #[error("You can only add up to {0} tags.")]
    LimitReached(usize),
    #[error("Tags can be at most {0} characters long.")]
    TooLong(usize),
}

/// The ordered, duplicate free list of tags on a snippet form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
    presets: Vec<String>,
    max_tags: usize,
    max_length: usize,
}

impl Default for TagSet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TagSet {
    pub fn new(presets: Vec<String>) -> Self {
        Self::with_limits(presets, MAX_TAGS, MAX_TAG_LENGTH)
    }

    pub fn with_limits(presets: Vec<String>, max_tags: usize, max_length: usize) -> Self {
        Self {
            tags: Vec::new(),
            presets,
            max_tags,
            max_length,
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tags.len() >= self.max_tags
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Maps `text` onto the preset with the same letters, if there is one.
    pub fn canonical(&self, text: &str) -> String {
        let text = text.trim();
        self.presets
            .iter()
            .find(|preset| preset.to_uppercase() == text.to_uppercase())
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }

    /// Adds a tag, returning the form it was stored under.
    pub fn add(&mut self, text: &str) -> Result<String, TagError> {
        self.insert(text, true)
    }

    /// Adds a tag already saved on the snippet. Tags saved before the length
    /// limit existed are kept as they are.
    pub fn restore(&mut self, text: &str) -> Result<String, TagError> {
        self.insert(text, false)
    }

    fn insert(&mut self, text: &str, limit_length: bool) -> Result<String, TagError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TagError::Empty);
        }
        if self.is_full() {
            return Err(TagError::LimitReached(self.max_tags));
        }
        if limit_length && text.chars().count() > self.max_length {
            return Err(TagError::TooLong(self.max_length));
        }
        let tag = self.canonical(text);
        if self.contains(&tag) {
            return Err(TagError::Duplicate);
        }
        self.tags.push(tag.clone());
        Ok(tag)
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        before != self.tags.len()
    }

    /// Value of the hidden form field.
    pub fn hidden_value(&self) -> String {
        self.tags.join(",")
    }

    /// Presets offered in the dropdown for the current input text.
    pub fn visible_presets(&self, filter: &str) -> Vec<String> {
        let filter = filter.trim().to_uppercase();
        self.presets
            .iter()
            .filter(|preset| !self.contains(preset))
            .filter(|preset| filter.is_empty() || preset.to_uppercase().contains(&filter))
            .cloned()
            .collect()
    }

    pub fn count_label(&self) -> String {
        format!("{}/{}", self.tags.len(), self.max_tags)
    }

    pub fn length_label(&self, input: &str) -> String {
        format!("{}/{}", input.chars().count(), self.max_length)
    }

    pub fn placeholder(&self) -> &'static str {
        if self.is_full() {
            "Tag limit reached"
        } else {
            "Type tags and press Enter"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presets() -> Vec<String> {
        ["Python", "JavaScript", "Rust", "SQL"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn duplicate_in_any_case_is_kept_once_in_preset_casing() {
        let mut tags = TagSet::new(presets());
        assert_eq!(tags.add("python"), Ok("Python".to_string()));
        assert_eq!(tags.add("PYTHON"), Err(TagError::Duplicate));
        assert_eq!(tags.add(" Python "), Err(TagError::Duplicate));
        assert_eq!(tags.tags(), &["Python".to_string()]);
    }

    #[test]
    fn free_text_tags_keep_their_casing() {
        let mut tags = TagSet::new(presets());
        assert_eq!(tags.add("leetCode"), Ok("leetCode".to_string()));
        assert_eq!(tags.add("leetCode"), Err(TagError::Duplicate));
    }

    #[test]
    fn never_exceeds_the_limit() {
        let mut tags = TagSet::new(vec![]);
        for i in 0..MAX_TAGS {
            tags.add(&format!("tag{i}")).unwrap();
        }
        assert!(tags.is_full());
        let before = tags.clone();
        assert_eq!(tags.add("one-more"), Err(TagError::LimitReached(MAX_TAGS)));
        assert_eq!(tags, before);
        assert_eq!(tags.count_label(), "15/15");
        assert_eq!(tags.placeholder(), "Tag limit reached");
    }

    #[test]
    fn rejects_empty_and_long_tags() {
        let mut tags = TagSet::new(vec![]);
        assert_eq!(tags.add("   "), Err(TagError::Empty));
        assert_eq!(
            tags.add("abcdefghijklmnopqrstuvwxyz"),
            Err(TagError::TooLong(MAX_TAG_LENGTH))
        );
        assert!(tags.is_empty());
    }

    #[test]
    fn hidden_value_tracks_adds_and_removes() {
        let mut tags = TagSet::new(presets());
        tags.add("rust").unwrap();
        tags.add("sql").unwrap();
        tags.add("wasm").unwrap();
        assert_eq!(tags.hidden_value(), "Rust,SQL,wasm");
        assert!(tags.remove("SQL"));
        assert!(!tags.remove("SQL"));
        assert_eq!(tags.hidden_value(), "Rust,wasm");
    }

    #[test]
    fn dropdown_hides_selected_and_non_matching_presets() {
        let mut tags = TagSet::new(presets());
        tags.add("Python").unwrap();
        assert_eq!(tags.visible_presets(""), vec!["JavaScript", "Rust", "SQL"]);
        assert_eq!(tags.visible_presets("s"), vec!["JavaScript", "Rust", "SQL"]);
        assert_eq!(tags.visible_presets("py"), Vec::<String>::new());
        tags.remove("Python");
        assert_eq!(tags.visible_presets("py"), vec!["Python"]);
    }

    #[test]
    fn counts_characters() {
        let tags = TagSet::new(vec![]);
        assert_eq!(tags.length_label("héllo"), "5/20");
    }

    #[test]
    fn stored_tags_skip_the_length_limit() {
        let mut tags = TagSet::new(presets());
        let legacy = "a-very-long-legacy-tag-name";
        assert_eq!(tags.add(legacy), Err(TagError::TooLong(MAX_TAG_LENGTH)));
        assert_eq!(tags.restore(legacy), Ok(legacy.to_string()));
        assert_eq!(tags.restore("rust"), Ok("Rust".to_string()));
        assert_eq!(tags.restore("RUST"), Err(TagError::Duplicate));
        assert_eq!(tags.hidden_value(), format!("{legacy},Rust"));
    }
}
