//! # Order Configuration
//!
//! The customer's selections for one pizza order and the prices derived from
//! them. Every mutator takes the [`PriceCatalog`] so the configuration can only
//! ever refer to options that exist; unknown keys leave it untouched and the
//! mutator reports `false`.

use super::catalog::{Price, PriceCatalog, Section};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// What one ordering session has selected so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfiguration {
    size: String,
    crust: String,
    toppings: BTreeSet<String>,
    sides: BTreeMap<String, u32>,
    quantity: u32,
}

impl OrderConfiguration {
    /// Default configuration: default size and crust, nothing else, quantity 1.
    pub fn new(catalog: &PriceCatalog) -> Self {
        Self {
            size: catalog.default_size().to_string(),
            crust: catalog.default_crust().to_string(),
            toppings: BTreeSet::new(),
            sides: BTreeMap::new(),
            quantity: 1,
        }
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn crust(&self) -> &str {
        &self.crust
    }

    pub fn toppings(&self) -> &BTreeSet<String> {
        &self.toppings
    }

    pub fn has_topping(&self, topping: &str) -> bool {
        self.toppings.contains(topping)
    }

    /// Quantity of a side item; absent items count as zero.
    pub fn side_quantity(&self, side: &str) -> u32 {
        self.sides.get(side).copied().unwrap_or(0)
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn set_size(&mut self, catalog: &PriceCatalog, size: &str) -> bool {
        if !catalog.contains(Section::Size, size) || self.size == size {
            return false;
        }
        self.size = size.to_string();
        true
    }

    pub fn set_crust(&mut self, catalog: &PriceCatalog, crust: &str) -> bool {
        if !catalog.contains(Section::Crust, crust) || self.crust == crust {
            return false;
        }
        self.crust = crust.to_string();
        true
    }

    /// Adds the topping if absent, removes it if present.
    pub fn toggle_topping(&mut self, catalog: &PriceCatalog, topping: &str) -> bool {
        if !catalog.contains(Section::Topping, topping) {
            return false;
        }
        if !self.toppings.remove(topping) {
            self.toppings.insert(topping.to_string());
        }
        true
    }

    /// Shifts a side item's quantity by `delta`, clamping at zero.
    pub fn adjust_side_quantity(&mut self, catalog: &PriceCatalog, side: &str, delta: i64) -> bool {
        if !catalog.contains(Section::Side, side) {
            return false;
        }
        let current = self.side_quantity(side);
        let next = clamp_u32(i64::from(current).saturating_add(delta), 0);
        if next == current {
            return false;
        }
        if next == 0 {
            self.sides.remove(side);
        } else {
            self.sides.insert(side.to_string(), next);
        }
        true
    }

    /// Sets the number of pizzas, never below one.
    pub fn set_quantity(&mut self, requested: i64) -> bool {
        let next = clamp_u32(requested, 1);
        let changed = next != self.quantity;
        self.quantity = next;
        changed
    }

    pub fn adjust_quantity(&mut self, delta: i64) -> bool {
        self.set_quantity(i64::from(self.quantity).saturating_add(delta))
    }

    /// Price of one pizza: size plus crust plus every selected topping.
    pub fn unit_price(&self, catalog: &PriceCatalog) -> Price {
        let base = price_of(catalog, Section::Size, &self.size)
            .saturating_add(price_of(catalog, Section::Crust, &self.crust));
        self.toppings
            .iter()
            .map(|t| price_of(catalog, Section::Topping, t))
            .fold(base, Price::saturating_add)
    }

    pub fn sides_total(&self, catalog: &PriceCatalog) -> Price {
        self.sides
            .iter()
            .map(|(side, qty)| price_of(catalog, Section::Side, side).saturating_mul(Price::from(*qty)))
            .fold(0, Price::saturating_add)
    }

    /// `(unit + sides) * quantity`.
    pub fn total(&self, catalog: &PriceCatalog) -> Price {
        self.unit_price(catalog)
            .saturating_add(self.sides_total(catalog))
            .saturating_mul(Price::from(self.quantity))
    }

    /// Itemised breakdown in catalog display order.
    pub fn summary(&self, catalog: &PriceCatalog) -> OrderSummary {
        let mut lines = vec![SummaryLine {
            label: format!("{} Pizza", self.size),
            amount: price_of(catalog, Section::Size, &self.size),
        }];

        let crust = price_of(catalog, Section::Crust, &self.crust);
        if crust > 0 {
            lines.push(SummaryLine {
                label: self.crust.clone(),
                amount: crust,
            });
        }

        for entry in catalog.toppings().iter().filter(|e| self.has_topping(&e.key)) {
            lines.push(SummaryLine {
                label: entry.key.clone(),
                amount: entry.price,
            });
        }

        for entry in catalog.sides() {
            let qty = self.side_quantity(&entry.key);
            if qty > 0 {
                lines.push(SummaryLine {
                    label: format!("{qty} x {}", entry.key),
                    amount: entry.price.saturating_mul(Price::from(qty)),
                });
            }
        }

        OrderSummary {
            lines,
            quantity: self.quantity,
            total: self.total(catalog),
        }
    }
}

/// One row of the order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub label: String,
    pub amount: Price,
}

/// Itemised view of a configuration: the lines, the pizza count and the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub quantity: u32,
    pub total: Price,
}

fn price_of(catalog: &PriceCatalog, section: Section, key: &str) -> Price {
    catalog.price(section, key).unwrap_or(0)
}

fn clamp_u32(value: i64, min: u32) -> u32 {
    u32::try_from(value.max(i64::from(min))).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (PriceCatalog, OrderConfiguration) {
        let catalog = PriceCatalog::builtin();
        let config = OrderConfiguration::new(&catalog);
        (catalog, config)
    }

    #[test]
    fn defaults_price_to_size_plus_crust() {
        let (catalog, config) = setup();
        assert_eq!(config.size(), "Medium");
        assert_eq!(config.crust(), "New Hand Tossed");
        assert_eq!(config.quantity(), 1);
        assert_eq!(config.total(&catalog), 499);
    }

    #[test]
    fn paneer_medium_example() {
        let (catalog, mut config) = setup();
        assert!(config.toggle_topping(&catalog, "Paneer"));
        assert_eq!(config.total(&catalog), 559);

        assert!(config.set_quantity(2));
        assert_eq!(config.total(&catalog), 1118);
    }

    #[test]
    fn total_scales_with_quantity() {
        let (catalog, mut config) = setup();
        config.set_size(&catalog, "Large");
        config.set_crust(&catalog, "Cheese Burst");
        config.toggle_topping(&catalog, "Chicken");
        config.adjust_side_quantity(&catalog, "Garlic Bread", 2);
        let single = config.total(&catalog);
        assert_eq!(single, 799 + 99 + 80 + 240);

        config.set_quantity(3);
        assert_eq!(config.total(&catalog), single * 3);
    }

    #[test]
    fn toggling_twice_restores_toppings() {
        let (catalog, mut config) = setup();
        config.toggle_topping(&catalog, "Onion");
        let before = config.toppings().clone();

        config.toggle_topping(&catalog, "Corn");
        config.toggle_topping(&catalog, "Corn");
        assert_eq!(config.toppings(), &before);
    }

    #[test]
    fn side_quantities_clamp_at_zero() {
        let (catalog, mut config) = setup();
        assert!(!config.adjust_side_quantity(&catalog, "Cheese Dip", -1));
        assert_eq!(config.side_quantity("Cheese Dip"), 0);

        config.adjust_side_quantity(&catalog, "Cheese Dip", 3);
        config.adjust_side_quantity(&catalog, "Cheese Dip", -10);
        assert_eq!(config.side_quantity("Cheese Dip"), 0);
        assert_eq!(config.total(&catalog), 499);
    }

    #[test]
    fn quantity_never_drops_below_one() {
        let (_, mut config) = setup();
        assert!(!config.set_quantity(0));
        assert!(!config.set_quantity(-5));
        assert_eq!(config.quantity(), 1);

        config.adjust_quantity(4);
        assert_eq!(config.quantity(), 5);
        config.adjust_quantity(-100);
        assert_eq!(config.quantity(), 1);
    }

    #[test]
    fn unknown_options_are_ignored() {
        let (catalog, mut config) = setup();
        let before = config.clone();
        assert!(!config.set_size(&catalog, "Gigantic"));
        assert!(!config.set_crust(&catalog, "Stuffed"));
        assert!(!config.toggle_topping(&catalog, "Pineapple"));
        assert!(!config.adjust_side_quantity(&catalog, "Fries", 1));
        assert_eq!(config, before);
    }

    #[test]
    fn summary_lists_priced_lines_in_menu_order() {
        let (catalog, mut config) = setup();
        config.toggle_topping(&catalog, "Mushroom");
        config.toggle_topping(&catalog, "Paneer");
        config.adjust_side_quantity(&catalog, "Coke (500ml)", 2);

        let summary = config.summary(&catalog);
        let labels: Vec<&str> = summary.lines.iter().map(|l| l.label.as_str()).collect();
        // Zero-charge crust is omitted.
        assert_eq!(labels, ["Medium Pizza", "Paneer", "Mushroom", "2 x Coke (500ml)"]);
        assert_eq!(summary.lines[3].amount, 120);
        assert_eq!(summary.total, 499 + 60 + 50 + 120);

        config.set_crust(&catalog, "Fresh Pan Pizza");
        let summary = config.summary(&catalog);
        assert_eq!(summary.lines[1].label, "Fresh Pan Pizza");
        assert_eq!(summary.lines[1].amount, 40);
    }
}
