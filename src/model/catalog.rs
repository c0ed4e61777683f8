//! # Price Catalog
//!
//! The static, read-only price table every ordering session prices against.
//! Each section keeps its entries in display order; prices are integer minor
//! currency units.
//!
//! A catalog is only ever constructed through [`PriceCatalog::new`] (or
//! deserialization, which goes through the same checks), so holding a
//! `PriceCatalog` means:
//!
//! - every section is non-empty and its keys are unique,
//! - the default size and default crust exist,
//! - the default crust carries no extra charge.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Integer price in minor currency units.
pub type Price = u64;

/// One selectable option and its price (or price delta).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub key: String,
    pub price: Price,
}

impl PriceEntry {
    pub fn new(key: impl Into<String>, price: Price) -> Self {
        Self {
            key: key.into(),
            price,
        }
    }
}

/// The four priced sections of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Size,
    Crust,
    Topping,
    Side,
}

impl Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Section::Size => "size",
            Section::Crust => "crust",
            Section::Topping => "topping",
            Section::Side => "side",
        };
        f.write_str(name)
    }
}

/// Reasons a catalog definition is rejected.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Catalog section '{0}' is empty")]
    EmptySection(Section),

    #[error("Duplicate {section} '{key}'")]
    DuplicateKey { section: Section, key: String },

    #[error("Default {section} '{key}' is not in the catalog")]
    MissingDefault { section: Section, key: String },

    #[error("Default crust '{key}' must not carry a charge (found {price})")]
    ChargedDefaultCrust { key: String, price: Price },
}

/// The serialized form of a catalog, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDefinition {
    pub sizes: Vec<PriceEntry>,
    pub crusts: Vec<PriceEntry>,
    pub toppings: Vec<PriceEntry>,
    pub sides: Vec<PriceEntry>,
    pub default_size: String,
    pub default_crust: String,
}

/// Validated, immutable price table.
///
/// Shared between sessions behind an `Arc`; nothing mutates it after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogDefinition", into = "CatalogDefinition")]
pub struct PriceCatalog {
    sizes: Vec<PriceEntry>,
    crusts: Vec<PriceEntry>,
    toppings: Vec<PriceEntry>,
    sides: Vec<PriceEntry>,
    default_size: String,
    default_crust: String,
}

impl PriceCatalog {
    /// Validates a definition and builds the catalog from it.
    pub fn new(definition: CatalogDefinition) -> Result<Self, CatalogError> {
        let CatalogDefinition {
            sizes,
            crusts,
            toppings,
            sides,
            default_size,
            default_crust,
        } = definition;

        check_section(Section::Size, &sizes)?;
        check_section(Section::Crust, &crusts)?;
        check_section(Section::Topping, &toppings)?;
        check_section(Section::Side, &sides)?;

        if lookup(&sizes, &default_size).is_none() {
            return Err(CatalogError::MissingDefault {
                section: Section::Size,
                key: default_size,
            });
        }
        match lookup(&crusts, &default_crust) {
            None => {
                return Err(CatalogError::MissingDefault {
                    section: Section::Crust,
                    key: default_crust,
                })
            }
            Some(price) if price != 0 => {
                return Err(CatalogError::ChargedDefaultCrust {
                    key: default_crust,
                    price,
                })
            }
            Some(_) => {}
        }

        Ok(Self {
            sizes,
            crusts,
            toppings,
            sides,
            default_size,
            default_crust,
        })
    }

    /// The shop's built-in menu, priced in rupees.
    pub fn builtin() -> Self {
        Self {
            sizes: vec![
                PriceEntry::new("Small", 299),
                PriceEntry::new("Medium", 499),
                PriceEntry::new("Large", 799),
            ],
            crusts: vec![
                PriceEntry::new("New Hand Tossed", 0),
                PriceEntry::new("Wheat Thin Crust", 50),
                PriceEntry::new("Cheese Burst", 99),
                PriceEntry::new("Fresh Pan Pizza", 40),
            ],
            toppings: vec![
                PriceEntry::new("Paneer", 60),
                PriceEntry::new("Onion", 30),
                PriceEntry::new("Capsicum", 30),
                PriceEntry::new("Mushroom", 50),
                PriceEntry::new("Corn", 30),
                PriceEntry::new("Chicken", 80),
                PriceEntry::new("Pepperoni", 90),
            ],
            sides: vec![
                PriceEntry::new("Coke (500ml)", 60),
                PriceEntry::new("Garlic Bread", 120),
                PriceEntry::new("Choco Lava Cake", 110),
                PriceEntry::new("Cheese Dip", 30),
            ],
            default_size: "Medium".to_string(),
            default_crust: "New Hand Tossed".to_string(),
        }
    }

    pub fn sizes(&self) -> &[PriceEntry] {
        &self.sizes
    }

    pub fn crusts(&self) -> &[PriceEntry] {
        &self.crusts
    }

    pub fn toppings(&self) -> &[PriceEntry] {
        &self.toppings
    }

    pub fn sides(&self) -> &[PriceEntry] {
        &self.sides
    }

    pub fn default_size(&self) -> &str {
        &self.default_size
    }

    pub fn default_crust(&self) -> &str {
        &self.default_crust
    }

    /// Price of `key` in `section`, or `None` if the option does not exist.
    pub fn price(&self, section: Section, key: &str) -> Option<Price> {
        let entries = match section {
            Section::Size => &self.sizes,
            Section::Crust => &self.crusts,
            Section::Topping => &self.toppings,
            Section::Side => &self.sides,
        };
        lookup(entries, key)
    }

    pub fn contains(&self, section: Section, key: &str) -> bool {
        self.price(section, key).is_some()
    }
}

impl Default for PriceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<CatalogDefinition> for PriceCatalog {
    type Error = CatalogError;

    fn try_from(definition: CatalogDefinition) -> Result<Self, Self::Error> {
        Self::new(definition)
    }
}

impl From<PriceCatalog> for CatalogDefinition {
    fn from(catalog: PriceCatalog) -> Self {
        Self {
            sizes: catalog.sizes,
            crusts: catalog.crusts,
            toppings: catalog.toppings,
            sides: catalog.sides,
            default_size: catalog.default_size,
            default_crust: catalog.default_crust,
        }
    }
}

fn lookup(entries: &[PriceEntry], key: &str) -> Option<Price> {
    entries.iter().find(|e| e.key == key).map(|e| e.price)
}

fn check_section(section: Section, entries: &[PriceEntry]) -> Result<(), CatalogError> {
    if entries.is_empty() {
        return Err(CatalogError::EmptySection(section));
    }
    for (i, entry) in entries.iter().enumerate() {
        if entries[..i].iter().any(|e| e.key == entry.key) {
            return Err(CatalogError::DuplicateKey {
                section,
                key: entry.key.clone(),
            });
        }
    }
    Ok(())
}
