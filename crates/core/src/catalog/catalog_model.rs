//! Catalog data model: models, variants, options and their prices.
//!
//! Prices are integer minor currency units. The catalog is built once from
//! configuration and never mutated afterwards; concurrent reads need no
//! synchronization.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::display::display_name;

/// Per-option pricing: minor-unit price per currency plus an optional
/// mutual-exclusion group. At most one option per group applies to a quote.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OptionPricing {
    // Configuration keys are matched case-insensitively, like the
    // deployment files this catalog format comes from.
    #[serde(default, alias = "group")]
    pub group: Option<i64>,
    #[serde(default, alias = "prices")]
    pub prices: HashMap<String, i64>,
}

/// One configured model: its default variant, per-variant base prices and
/// per-option prices.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Model {
    #[serde(default, alias = "defaultvariant", alias = "default_variant")]
    pub default_variant: String,
    #[serde(default, alias = "options")]
    pub options: HashMap<String, OptionPricing>,
    #[serde(default, alias = "variants")]
    pub variants: HashMap<String, HashMap<String, i64>>,
}

/// Externally visible summary of one model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModelSummary {
    pub name: String,
    pub options: Vec<String>,
    pub variants: Vec<String>,
}

/// Immutable, load-once catalog of configured models.
///
/// All keys (model, variant, option, currency) are lowercased at
/// construction so lookups are case-insensitive.
pub struct PricingCatalog {
    models: HashMap<String, Model>,
}

impl PricingCatalog {
    pub fn new(models: HashMap<String, Model>) -> Self {
        let models = models
            .into_iter()
            .map(|(name, model)| (name.to_lowercase(), normalize_model(model)))
            .collect();
        Self { models }
    }

    /// Look up a model by name.
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.get(&name.to_lowercase())
    }

    /// Price table (currency -> minor units) for a model variant.
    pub fn variant_prices(&self, model: &str, variant: &str) -> Option<&HashMap<String, i64>> {
        self.model(model)?.variants.get(&variant.to_lowercase())
    }

    /// Pricing for one option of a model.
    pub fn option(&self, model: &str, option: &str) -> Option<&OptionPricing> {
        self.model(model)?.options.get(&option.to_lowercase())
    }

    /// Distinct currencies priced anywhere in the catalog, uppercased.
    ///
    /// One spot-price refresher is started per entry of this set.
    pub fn currencies(&self) -> BTreeSet<String> {
        let mut currencies = BTreeSet::new();
        for model in self.models.values() {
            for prices in model.variants.values() {
                currencies.extend(prices.keys().map(|c| c.to_uppercase()));
            }
            for option in model.options.values() {
                currencies.extend(option.prices.keys().map(|c| c.to_uppercase()));
            }
        }
        currencies
    }

    /// Summaries of every model, with display names, sorted for stable
    /// output.
    pub fn summaries(&self) -> Vec<ModelSummary> {
        let mut summaries: Vec<ModelSummary> = self
            .models
            .iter()
            .map(|(name, model)| {
                let mut options: Vec<String> =
                    model.options.keys().map(|o| display_name(o)).collect();
                options.sort();
                let mut variants: Vec<String> =
                    model.variants.keys().map(|v| display_name(v)).collect();
                variants.sort();
                ModelSummary {
                    name: name.to_uppercase(),
                    options,
                    variants,
                }
            })
            .collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }
}

fn normalize_model(model: Model) -> Model {
    Model {
        default_variant: model.default_variant.to_lowercase(),
        options: model
            .options
            .into_iter()
            .map(|(name, option)| {
                (
                    name.to_lowercase(),
                    OptionPricing {
                        group: option.group,
                        prices: lowercase_keys(option.prices),
                    },
                )
            })
            .collect(),
        variants: model
            .variants
            .into_iter()
            .map(|(name, prices)| (name.to_lowercase(), lowercase_keys(prices)))
            .collect(),
    }
}

fn lowercase_keys(prices: HashMap<String, i64>) -> HashMap<String, i64> {
    prices
        .into_iter()
        .map(|(currency, price)| (currency.to_lowercase(), price))
        .collect()
}
