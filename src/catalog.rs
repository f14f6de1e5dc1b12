//! Troop catalog for the conquest engine.
//!
//! Defines the troop types a match is played with and the trivia
//! category each type is tied to. A built-in catalog covers the standard
//! game; custom catalogs can be loaded from a JSON file so deployments
//! can swap in their own question banks.

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a troop catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read '{0}': {1}")]
    Io(String, #[source] std::io::Error),

    #[error("failed to parse troop catalog JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("catalog defines no troop types")]
    Empty,

    #[error("duplicate troop type '{0}'")]
    DuplicateKind(String),

    #[error("troop type '{0}' has no category")]
    MissingCategory(String),
}

/// A single troop type and the question category it answers under.
#[derive(Debug, Clone, Deserialize)]
pub struct TroopKind {
    /// Stable identifier used as the `TroopSet` key.
    pub id: String,
    /// Human-facing name; falls back to `id` when absent in JSON.
    #[serde(default)]
    pub name: String,
    /// Trivia category drawn when this type leads an attack.
    pub category: String,
}

impl TroopKind {
    /// The display name, or the id when no name was given.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// The full set of troop types available to a match.
#[derive(Debug, Clone, Deserialize)]
pub struct TroopCatalog {
    kinds: Vec<TroopKind>,
}

impl TroopCatalog {
    /// The built-in catalog used by the standard game.
    pub fn standard() -> Self {
        let kinds = [
            ("infantry", "Infantry", "history"),
            ("cavalry", "Cavalry", "geography"),
            ("artillery", "Artillery", "science"),
            ("archers", "Archers", "arts"),
        ]
        .into_iter()
        .map(|(id, name, category)| TroopKind {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
        })
        .collect();
        TroopCatalog { kinds }
    }

    /// Loads a catalog from a JSON file at the given path.
    pub fn from_file(path: &Path) -> Result<TroopCatalog, CatalogError> {
        let data = fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(path.display().to_string(), e))?;
        Self::from_json(&data)
    }

    /// Loads a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<TroopCatalog, CatalogError> {
        let catalog: TroopCatalog = serde_json::from_str(json).map_err(CatalogError::Parse)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.kinds.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, kind) in self.kinds.iter().enumerate() {
            if kind.category.is_empty() {
                return Err(CatalogError::MissingCategory(kind.id.clone()));
            }
            if self.kinds[..i].iter().any(|k| k.id == kind.id) {
                return Err(CatalogError::DuplicateKind(kind.id.clone()));
            }
        }
        Ok(())
    }

    /// All troop types in declaration order.
    pub fn kinds(&self) -> &[TroopKind] {
        &self.kinds
    }

    /// True if `id` names a troop type in this catalog.
    pub fn contains(&self, id: &str) -> bool {
        self.kinds.iter().any(|k| k.id == id)
    }

    /// The trivia category of a troop type, if it exists.
    pub fn category_of(&self, id: &str) -> Option<&str> {
        self.kinds
            .iter()
            .find(|k| k.id == id)
            .map(|k| k.category.as_str())
    }

    /// Picks a troop type id uniformly at random.
    pub fn random_kind(&self, rng: &mut impl Rng) -> &str {
        let idx = rng.gen_range(0..self.kinds.len());
        &self.kinds[idx].id
    }
}
