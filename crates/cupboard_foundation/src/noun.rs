//! Naming metadata for describing objects in prose.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How an object is named in generated text.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Noun {
    /// Head noun, also used in "On the X is" headers.
    pub name: String,
    /// Name used in lists and sentences ("small brass key").
    pub verbose_name: String,
    /// Explicit plural, when the `s`/`es` rule is wrong.
    pub plural: Option<String>,
    /// Whether any article is ever printed.
    pub has_article: bool,
    /// Proper nouns always take "the".
    pub is_definite: bool,
    /// Mass nouns (liquids) take no indefinite article.
    pub is_numberless: bool,
}

impl Noun {
    /// Creates a noun whose verbose name equals its name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            verbose_name: name.clone(),
            name,
            plural: None,
            has_article: true,
            is_definite: false,
            is_numberless: false,
        }
    }

    /// Builder method to set the verbose name.
    #[must_use]
    pub fn with_verbose_name(mut self, verbose_name: impl Into<String>) -> Self {
        self.verbose_name = verbose_name.into();
        self
    }

    /// Builder method to set an irregular plural.
    #[must_use]
    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    /// Builder method to mark the noun as numberless.
    #[must_use]
    pub fn numberless(mut self) -> Self {
        self.is_numberless = true;
        self
    }

    /// Builder method to mark the noun as definite.
    #[must_use]
    pub fn definite(mut self) -> Self {
        self.is_definite = true;
        self
    }

    /// Builder method to suppress articles entirely.
    #[must_use]
    pub fn without_article(mut self) -> Self {
        self.has_article = false;
        self
    }

    /// Returns the article to print before the verbose name, with a trailing
    /// space, or an empty string.
    #[must_use]
    pub fn article(&self, definite: bool) -> &'static str {
        if !self.has_article {
            ""
        } else if definite || self.is_definite {
            "the "
        } else if self.is_numberless {
            ""
        } else if self
            .verbose_name
            .chars()
            .next()
            .is_some_and(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
        {
            "an "
        } else {
            "a "
        }
    }

    /// Article plus verbose name ("a brass key", "the water").
    #[must_use]
    pub fn with_article(&self, definite: bool) -> String {
        format!("{}{}", self.article(definite), self.verbose_name)
    }

    /// [`Self::with_article`] with the first letter capitalized.
    #[must_use]
    pub fn capitalized_with_article(&self, definite: bool) -> String {
        let text = self.with_article(definite);
        let mut chars = text.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => text,
        }
    }

    /// Plural form of the verbose name.
    #[must_use]
    pub fn plural(&self) -> String {
        if let Some(plural) = &self.plural {
            return plural.clone();
        }
        let v = &self.verbose_name;
        if ["s", "x", "z", "ch", "sh"].iter().any(|end| v.ends_with(end)) {
            format!("{v}es")
        } else {
            format!("{v}s")
        }
    }
}

/// Joins items as an English list: "a", "a and b", "a, b and c".
#[must_use]
pub fn join_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head = init
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{head} and {}", last.as_ref())
        }
    }
}
