//! Notice text lookup.
//!
//! # Responsibility
//! - Define the message-lookup contract the workflow depends on.
//! - Ship an in-memory bundle implementation with `{n}` interpolation.
//!
//! # Invariants
//! - Workflow code supplies keys and arguments only, never display text.
//! - Lookup falls back from `lang-REGION` to `lang` to the default locale,
//!   then to the key itself.

use log::warn;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\d+)\}").expect("valid placeholder regex"));

/// Resolves a notice key for a locale into display text.
pub trait MessageSource {
    fn message(&self, key: &str, args: &[&str], locale: &str) -> String;
}

/// In-memory message bundles keyed by locale.
#[derive(Debug, Clone)]
pub struct BundleMessageSource {
    default_locale: String,
    bundles: HashMap<String, HashMap<String, String>>,
}

impl BundleMessageSource {
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
            bundles: HashMap::new(),
        }
    }

    /// Adds or replaces one template.
    pub fn with_message(
        mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.bundles
            .entry(locale.into())
            .or_default()
            .insert(key.into(), template.into());
        self
    }

    /// English notices for every catalog resource.
    pub fn english() -> Self {
        let mut source = Self::new("en");
        for (plural, label) in [
            ("albums", "Album"),
            ("songs", "Song"),
            ("musicians", "Musician"),
            ("genres", "Genre"),
        ] {
            let templates = [
                ("detail.notFound", format!("{label} was not found.")),
                ("edit.notFound", format!("{label} to edit was not found.")),
                ("delete.notFound", format!("{label} to delete was not found.")),
                ("create.saved", format!("{label} \"{{0}}\" was created.")),
                ("edit.saved", format!("{label} \"{{0}}\" was saved.")),
                ("delete.deleted", format!("{label} \"{{0}}\" was deleted.")),
                (
                    "delete.conflict",
                    format!("{label} \"{{0}}\" is still in use and cannot be deleted."),
                ),
                ("create.rejected", format!("{label} could not be saved: {{0}}")),
                ("edit.rejected", format!("{label} could not be saved: {{0}}")),
            ];
            for (action_key, template) in templates {
                source = source.with_message("en", format!("{plural}.{action_key}"), template);
            }
        }
        source
    }

    fn lookup(&self, key: &str, locale: &str) -> Option<&str> {
        let language = locale.split(['-', '_']).next().unwrap_or(locale);
        [locale, language, self.default_locale.as_str()]
            .into_iter()
            .find_map(|candidate| self.bundles.get(candidate)?.get(key))
            .map(String::as_str)
    }
}

impl MessageSource for BundleMessageSource {
    fn message(&self, key: &str, args: &[&str], locale: &str) -> String {
        match self.lookup(key, locale) {
            Some(template) => interpolate(template, args),
            None => {
                warn!(
                    "event=message_lookup module=workflow status=missing key={key} locale={locale}"
                );
                key.to_string()
            }
        }
    }
}

/// Replaces `{n}` with the n-th argument; out-of-range placeholders stay.
pub fn interpolate(template: &str, args: &[&str]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| args.get(index))
                .map_or_else(|| caps[0].to_string(), |arg| (*arg).to_string())
        })
        .into_owned()
}
