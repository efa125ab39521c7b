//! Spell definitions and the read-only catalog shared by both sides of a duel.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use encoding_rs::Encoding;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::combatant::StatusKind;
use crate::content::{builtin_catalogs, DEFAULT_CATALOG};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectClass {
    Damage,
    Healing,
    ResistanceBoost,
}

impl EffectClass {
    pub fn label(self) -> &'static str {
        match self {
            EffectClass::Damage => "Attack",
            EffectClass::Healing => "Healing",
            EffectClass::ResistanceBoost => "Resistance",
        }
    }
}

/// Chance for a damage spell to inflict a timed status on its target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusProc {
    pub kind: StatusKind,
    pub duration: u32,
    pub chance: f64,
}

/// What a spell does once its cost is paid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "snake_case")]
pub enum SpellEffect {
    /// Hits the opposing side; resistance absorbs up to `magnitude` and is then zeroed.
    Damage {
        magnitude: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<StatusProc>,
    },
    /// Restores the caster's hp, capped at its maximum.
    Healing { magnitude: i32 },
    /// Adds to the caster's resistance with no upper bound.
    ResistanceBoost { magnitude: i32 },
}

impl SpellEffect {
    pub fn class(&self) -> EffectClass {
        match self {
            SpellEffect::Damage { .. } => EffectClass::Damage,
            SpellEffect::Healing { .. } => EffectClass::Healing,
            SpellEffect::ResistanceBoost { .. } => EffectClass::ResistanceBoost,
        }
    }

    pub fn magnitude(&self) -> i32 {
        match *self {
            SpellEffect::Damage { magnitude, .. }
            | SpellEffect::Healing { magnitude }
            | SpellEffect::ResistanceBoost { magnitude } => magnitude,
        }
    }

    pub fn status(&self) -> Option<StatusProc> {
        match *self {
            SpellEffect::Damage { status, .. } => status,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost: i32,
    #[serde(flatten)]
    pub effect: SpellEffect,
}

impl Spell {
    pub fn class(&self) -> EffectClass {
        self.effect.class()
    }

    pub fn is_affordable(&self, mana: i32) -> bool {
        self.cost <= mana
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog has no spells")]
    Empty,
    #[error("spell #{index} has a blank name")]
    BlankName { index: usize },
    #[error("duplicate spell '{0}'")]
    Duplicate(String),
    #[error("spell '{name}' has negative {field}: {value}")]
    Negative {
        name: String,
        field: &'static str,
        value: i32,
    },
    #[error("spell '{name}' has {kind} chance {chance} outside [0, 1]")]
    ChanceOutOfRange {
        name: String,
        kind: StatusKind,
        chance: f64,
    },
    #[error("spell '{name}' has a zero-duration {kind} proc")]
    ZeroDuration { name: String, kind: StatusKind },
    #[error("unknown built-in catalog '{0}'")]
    UnknownBuiltin(String),
    #[error("failed to read catalog {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON")]
    Json(#[from] serde_json::Error),
    #[error("invalid catalog YAML")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// `.yaml` / `.yml` files are YAML; everything else is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => CatalogFormat::Yaml,
            _ => CatalogFormat::Json,
        }
    }
}

/// Immutable registry of spells, iterated in declaration order.
///
/// Built once and passed by reference into the resolver and the search; nothing
/// mutates it after construction.
#[derive(Debug, Clone)]
pub struct SpellCatalog {
    spells: IndexMap<String, Spell>,
}

impl SpellCatalog {
    pub fn new(spells: Vec<Spell>) -> Result<Self, CatalogError> {
        if spells.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for (index, spell) in spells.iter().enumerate() {
            validate(index, spell)?;
            if !seen.insert(spell.name.as_str()) {
                return Err(CatalogError::Duplicate(spell.name.clone()));
            }
        }
        let spells = spells.into_iter().map(|s| (s.name.clone(), s)).collect();
        Ok(Self { spells })
    }

    pub fn parse(text: &str, format: CatalogFormat) -> Result<Self, CatalogError> {
        match format {
            CatalogFormat::Json => Self::from_json_str(text),
            CatalogFormat::Yaml => Self::from_yaml_str(text),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(text)?)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, CatalogError> {
        Self::new(serde_yaml::from_str(text)?)
    }

    /// Reads a catalog file, honoring a UTF-8 or UTF-16 byte order mark.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let io_err = |source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        };
        let bytes = fs::read(path).map_err(io_err)?;
        let text = decode_text(bytes).map_err(io_err)?;
        Self::parse(&text, CatalogFormat::from_path(path))
    }

    pub fn builtin(id: &str) -> Result<Self, CatalogError> {
        let text = builtin_catalogs()
            .get(id)
            .copied()
            .ok_or_else(|| CatalogError::UnknownBuiltin(id.to_string()))?;
        Self::from_json_str(text)
    }

    /// The nine-spell catalog MageBot ships with.
    pub fn default_catalog() -> Result<Self, CatalogError> {
        Self::builtin(DEFAULT_CATALOG)
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&Spell> {
        self.spells.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.spells.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spell> {
        self.spells.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.spells.keys().map(String::as_str)
    }

    pub fn by_class(&self, class: EffectClass) -> impl Iterator<Item = &Spell> {
        self.iter().filter(move |s| s.class() == class)
    }

    /// Spells castable with `mana`, in catalog order.
    pub fn affordable(&self, mana: i32) -> Vec<&Spell> {
        self.iter().filter(|s| s.is_affordable(mana)).collect()
    }

    pub fn min_cost(&self) -> Option<i32> {
        self.iter().map(|s| s.cost).min()
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    /// Spells in catalog order, for serialization.
    pub fn to_vec(&self) -> Vec<Spell> {
        self.iter().cloned().collect()
    }
}

impl fmt::Display for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = match self.effect {
            SpellEffect::Damage { magnitude, .. } => format!("Damage : {}", magnitude),
            SpellEffect::Healing { magnitude } => format!("Healing : {}", magnitude),
            SpellEffect::ResistanceBoost { magnitude } => format!("Resistance : +{}", magnitude),
        };
        write!(f, "{} : {} ({}, Mana : {})", self.name, self.description, amount, self.cost)?;
        if let Some(p) = self.effect.status() {
            write!(
                f,
                " | Effect: {} ({:.0}% chance, {} turn(s))",
                p.kind,
                p.chance * 100.0,
                p.duration
            )?;
        }
        Ok(())
    }
}

fn validate(index: usize, spell: &Spell) -> Result<(), CatalogError> {
    if spell.name.trim().is_empty() {
        return Err(CatalogError::BlankName { index });
    }
    let negative = |field: &'static str, value: i32| CatalogError::Negative {
        name: spell.name.clone(),
        field,
        value,
    };
    if spell.cost < 0 {
        return Err(negative("cost", spell.cost));
    }
    if spell.effect.magnitude() < 0 {
        return Err(negative("magnitude", spell.effect.magnitude()));
    }
    if let Some(p) = spell.effect.status() {
        if !(0.0..=1.0).contains(&p.chance) {
            return Err(CatalogError::ChanceOutOfRange {
                name: spell.name.clone(),
                kind: p.kind,
                chance: p.chance,
            });
        }
        if p.duration == 0 {
            return Err(CatalogError::ZeroDuration {
                name: spell.name.clone(),
                kind: p.kind,
            });
        }
    }
    Ok(())
}

fn decode_text(bytes: Vec<u8>) -> io::Result<String> {
    match Encoding::for_bom(&bytes) {
        Some((enc, bom_len)) => {
            let (text, _, _) = enc.decode(&bytes[bom_len..]);
            Ok(text.into_owned())
        }
        None => {
            String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        }
    }
}
