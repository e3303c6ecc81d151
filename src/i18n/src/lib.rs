// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Localized message catalogs for column type errors.
//!
//! A [`Catalog`] maps stable message keys to templates in one locale. The
//! catalogs for the supported locales are embedded in the binary, so loading
//! never touches the filesystem; [`Catalog::from_json`] additionally accepts
//! caller-supplied catalogs in the same format.
//!
//! Template placeholder syntax is validated when the catalog is loaded, not
//! when a message is rendered. Rendering is total: an unknown key renders as
//! the key itself and an unmatched placeholder is left in place, so error
//! paths never produce a second error.

use std::collections::BTreeMap;
use std::fmt;
use std::mem;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A locale with an embedded message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    En,
    /// Russian.
    Ru,
}

impl Locale {
    /// All locales with an embedded catalog.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ru];

    fn embedded_catalog(self) -> &'static str {
        match self {
            Locale::En => include_str!("../locales/en.json"),
            Locale::Ru => include_str!("../locales/ru.json"),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        })
    }
}

impl FromStr for Locale {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Locale, CatalogError> {
        match s {
            "en" => Ok(Locale::En),
            "ru" => Ok(Locale::Ru),
            other => Err(CatalogError::UnknownLocale(other.to_string())),
        }
    }
}

/// An error that occurred while loading a message catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The named locale has no embedded catalog.
    #[error("unknown locale '{0}'")]
    UnknownLocale(String),
    /// The catalog source was not a JSON object of strings.
    #[error("malformed message catalog: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A message template failed placeholder validation.
    #[error("message '{key}': {source}")]
    Template {
        /// The key of the offending message.
        key: String,
        source: TemplateError,
    },
}

/// An error in a message template's placeholder syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A `{` with no matching `}`.
    #[error("unclosed placeholder at byte {0}")]
    Unclosed(usize),
    /// A `}` with no matching `{`.
    #[error("stray '}}' at byte {0}")]
    StrayClose(usize),
    /// A `{}` with no name between the braces.
    #[error("empty placeholder at byte {0}")]
    Empty(usize),
    /// A placeholder name containing a character outside `[A-Za-z0-9_]`.
    #[error("invalid placeholder character {ch:?} at byte {pos}")]
    BadChar {
        /// The offending character.
        ch: char,
        /// Its byte offset in the template.
        pos: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A message template parsed into literal runs and `{name}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Template {
    segments: Vec<Segment>,
}

impl Template {
    fn parse(raw: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = raw.char_indices();
        while let Some((pos, ch)) = chars.next() {
            match ch {
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, c)) if c.is_ascii_alphanumeric() || c == '_' => name.push(c),
                            Some((p, c)) => return Err(TemplateError::BadChar { ch: c, pos: p }),
                            None => return Err(TemplateError::Unclosed(pos)),
                        }
                    }
                    if name.is_empty() {
                        return Err(TemplateError::Empty(pos));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(name));
                }
                '}' => return Err(TemplateError::StrayClose(pos)),
                _ => literal.push(ch),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Template { segments })
    }

    fn render(&self, params: &Params) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => out.push_str(s),
                Segment::Placeholder(name) => match params.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                },
            }
        }
        out
    }
}

/// Ordered substitution parameters for [`Catalog::translate`].
///
/// Values are converted to their display form when added. If a name is added
/// twice, the later value wins.
#[derive(Debug, Clone, Default)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    /// Creates an empty parameter list.
    pub fn new() -> Params {
        Params::default()
    }

    /// Adds a named parameter.
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Params {
        self.entries.push((name.into(), value.to_string()));
        self
    }

    /// Looks up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Reports whether no parameters have been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An immutable catalog of localized message templates.
///
/// Cloning is cheap; the messages are shared behind an [`Arc`].
#[derive(Debug, Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

#[derive(Debug)]
struct CatalogInner {
    locale: Locale,
    messages: BTreeMap<String, Template>,
}

impl Catalog {
    /// Loads the embedded catalog for `locale`.
    pub fn load(locale: Locale) -> Result<Catalog, CatalogError> {
        Catalog::from_json(locale, locale.embedded_catalog())
    }

    /// Parses a catalog from a JSON object mapping keys to message templates.
    ///
    /// Every template's placeholder syntax is validated here; one malformed
    /// template fails the whole load.
    pub fn from_json(locale: Locale, json: &str) -> Result<Catalog, CatalogError> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut messages = BTreeMap::new();
        for (key, message) in raw {
            let template = Template::parse(&message)
                .map_err(|source| CatalogError::Template {
                    key: key.clone(),
                    source,
                })?;
            messages.insert(key, template);
        }
        debug!(%locale, messages = messages.len(), "loaded message catalog");
        Ok(Catalog {
            inner: Arc::new(CatalogInner { locale, messages }),
        })
    }

    /// The locale this catalog was loaded for.
    pub fn locale(&self) -> Locale {
        self.inner.locale
    }

    /// Renders the message for `key`, substituting `params`.
    ///
    /// An unknown key renders as the key itself and an unmatched placeholder
    /// is left in place, so this never fails.
    pub fn translate(&self, key: &str, params: &Params) -> String {
        match self.inner.messages.get(key) {
            Some(template) => template.render(params),
            None => key.to_string(),
        }
    }

    /// Reports whether the catalog defines a message for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.messages.contains_key(key)
    }

    /// The keys defined by this catalog, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.messages.keys().map(|k| k.as_str())
    }
}
