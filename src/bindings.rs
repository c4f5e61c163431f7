//! Host page elements the overlay and scroll tracker are wired to.
//!
//! Wiring itself is the host's job; this module only checks, once at
//! initialization, that every element the configuration names exists. A
//! missing element is a setup error and is reported immediately rather than
//! turning the overlay into a silent no-op.

use crate::error::BindError;
use serde::Deserialize;
use std::collections::HashSet;

/// Element ids looked up on the host page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub popup: String,
    pub input: String,
    pub results: String,
    pub toggle_button: String,
    pub scroll_container: String,
    pub scroll_fill: String,
    pub scroll_button: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            popup: "goto-popup".to_string(),
            input: "goto-input".to_string(),
            results: "goto-results".to_string(),
            toggle_button: "goto-button".to_string(),
            scroll_container: "scroll-element".to_string(),
            scroll_fill: "scroll-fill".to_string(),
            scroll_button: "scroll-to-top".to_string(),
        }
    }
}

/// Answers whether the host page has an element with a given id.
pub trait ElementLookup {
    fn has_element(&self, id: &str) -> bool;
}

impl ElementLookup for HashSet<String> {
    fn has_element(&self, id: &str) -> bool {
        self.contains(id)
    }
}

impl ElementLookup for [&str] {
    fn has_element(&self, id: &str) -> bool {
        self.iter().any(|candidate| *candidate == id)
    }
}

/// Elements confirmed present on the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    pub popup: String,
    pub input: String,
    pub results: String,
    /// The toggle button is optional; pages without one only get keyboard access
    pub toggle_button: Option<String>,
    pub scroll_container: String,
    pub scroll_fill: String,
    pub scroll_button: String,
}

impl Bindings {
    /// Resolves every configured id, failing on the first required element that
    /// is missing.
    pub fn resolve(
        lookup: &(impl ElementLookup + ?Sized),
        ids: &ElementIds,
    ) -> Result<Self, BindError> {
        let require = |role: &'static str, id: &str| {
            if lookup.has_element(id) {
                Ok(id.to_string())
            } else {
                tracing::error!("Host page is missing the {} element '#{}'", role, id);
                Err(BindError::MissingElement {
                    role,
                    id: id.to_string(),
                })
            }
        };

        let toggle_button = lookup
            .has_element(&ids.toggle_button)
            .then(|| ids.toggle_button.clone());
        if toggle_button.is_none() {
            tracing::debug!("No toggle button '#{}' on host page", ids.toggle_button);
        }

        Ok(Self {
            popup: require("popup", &ids.popup)?,
            input: require("query input", &ids.input)?,
            results: require("results list", &ids.results)?,
            toggle_button,
            scroll_container: require("scroll container", &ids.scroll_container)?,
            scroll_fill: require("scroll fill", &ids.scroll_fill)?,
            scroll_button: require("scroll-to-top button", &ids.scroll_button)?,
        })
    }
}
