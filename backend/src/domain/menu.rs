//! Menu records: salads and the custom options that can be added to them.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OptionId, SaladId};

/// Category an option belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionCategory {
    /// Leaf or grain base.
    Base,
    /// Extra topping.
    Topping,
    /// Dressing.
    Dressing,
}

impl OptionCategory {
    /// All categories in display order.
    pub const ALL: [Self; 3] = [Self::Base, Self::Topping, Self::Dressing];

    /// Stored string form of the category.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Topping => "topping",
            Self::Dressing => "dressing",
        }
    }

    /// Parse the stored string form.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == raw)
    }
}

impl fmt::Display for OptionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Salad offered on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salad {
    /// Record identifier.
    pub id: SaladId,
    /// Display name.
    pub name: String,
    /// Base price before options.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Ingredient names shown on the menu.
    pub ingredients: Vec<String>,
    /// Stored image file name, if an image was uploaded.
    pub image: Option<String>,
    /// Whether the salad is part of the default menu.
    pub is_default: bool,
}

/// Option a customer can add to a salad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomOption {
    /// Record identifier.
    pub id: OptionId,
    /// Category the option belongs to.
    pub category: OptionCategory,
    /// Display name.
    pub name: String,
    /// Surcharge added to the order total.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Whether the option can currently be ordered.
    pub available: bool,
}

impl CustomOption {
    /// Whether `selector` names this option, by id in any textual UUID form
    /// or by case-insensitive name.
    pub fn matches(&self, selector: &str) -> bool {
        let selector = selector.trim();
        Uuid::parse_str(selector).is_ok_and(|id| &id == self.id.as_uuid())
            || self.name.eq_ignore_ascii_case(selector)
    }
}

/// Full menu returned to clients.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Menu {
    /// Salads ordered by name.
    pub salads: Vec<Salad>,
    /// Options ordered by category, then name.
    pub options: Vec<CustomOption>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn option(name: &str) -> CustomOption {
        CustomOption {
            id: OptionId::random(),
            category: OptionCategory::Base,
            name: name.to_owned(),
            price: Decimal::ZERO,
            available: true,
        }
    }

    #[rstest]
    #[case("Spinach", true)]
    #[case("spinach", true)]
    #[case("  SPINACH ", true)]
    #[case("kale", false)]
    fn matches_by_name_ignoring_case(#[case] selector: &str, #[case] expected: bool) {
        assert_eq!(option("Spinach").matches(selector), expected);
    }

    #[rstest]
    fn matches_by_id() {
        let spinach = option("Spinach");
        assert!(spinach.matches(&spinach.id.to_string()));
        assert!(!spinach.matches(&OptionId::random().to_string()));
    }

    #[rstest]
    #[case::uppercase(|id: &Uuid| id.hyphenated().to_string().to_uppercase())]
    #[case::braced(|id: &Uuid| id.braced().to_string())]
    #[case::simple(|id: &Uuid| id.simple().to_string())]
    #[case::urn(|id: &Uuid| id.urn().to_string())]
    #[case::padded(|id: &Uuid| format!("  {id} "))]
    fn matches_ids_in_any_uuid_spelling(#[case] spell: fn(&Uuid) -> String) {
        let spinach = option("Spinach");
        assert!(spinach.matches(&spell(spinach.id.as_uuid())));
    }

    #[rstest]
    fn category_parse_round_trips_all() {
        for category in OptionCategory::ALL {
            assert_eq!(OptionCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(OptionCategory::parse("sauce"), None);
    }

    #[rstest]
    fn prices_serialise_as_numbers() {
        let salad = Salad {
            id: SaladId::random(),
            name: "Garden".to_owned(),
            price: Decimal::new(850, 2),
            ingredients: vec!["lettuce".to_owned()],
            image: None,
            is_default: true,
        };
        let value = serde_json::to_value(&salad).expect("serialise");
        assert_eq!(value.get("price"), Some(&serde_json::json!(8.5)));
    }
}
