//! Orders, their status state machine and server-side pricing.
//!
//! An order moves strictly forward through
//! `pending -> prepping -> ready -> delivered`; `delivered` is terminal.
//! Totals are always computed here from stored prices, never taken from the
//! client.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CustomOption, OptionCategory, OrderId, Salad, SaladId, UserId};

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Accepted, not yet started.
    #[default]
    Pending,
    /// Being prepared.
    Prepping,
    /// Ready for pickup or dispatch.
    Ready,
    /// Handed over; terminal.
    Delivered,
}

impl OrderStatus {
    /// Stored string form of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Prepping => "prepping",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
        }
    }

    /// Parse the stored string form.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "prepping" => Some(Self::Prepping),
            "ready" => Some(Self::Ready),
            "delivered" => Some(Self::Delivered),
            _ => None,
        }
    }

    /// The only status this one may advance to, if any.
    pub const fn successor(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Prepping),
            Self::Prepping => Some(Self::Ready),
            Self::Ready => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    /// Validate a transition from `self` to `next`.
    ///
    /// # Examples
    /// ```
    /// use salad_backend::domain::OrderStatus;
    ///
    /// assert!(OrderStatus::Pending.transition_to(OrderStatus::Prepping).is_ok());
    /// assert!(OrderStatus::Pending.transition_to(OrderStatus::Ready).is_err());
    /// ```
    pub fn transition_to(self, next: Self) -> Result<Self, StatusTransitionError> {
        if self.successor() == Some(next) {
            Ok(next)
        } else {
            Err(StatusTransitionError {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("order status cannot move from {from} to {to}")]
pub struct StatusTransitionError {
    /// Current status.
    pub from: OrderStatus,
    /// Requested status.
    pub to: OrderStatus,
}

/// Salad selection persisted in the order's `items` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItems {
    /// Chosen salad.
    pub salad_id: SaladId,
    /// Resolved option names per category.
    #[serde(default)]
    pub custom: BTreeMap<OptionCategory, Vec<String>>,
}

/// Persisted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Record identifier.
    pub id: OrderId,
    /// Owning user.
    pub user_id: UserId,
    /// Salad and customisations.
    pub items: OrderItems,
    /// Server-computed total.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Whether the order is delivered rather than collected.
    pub delivery: bool,
    /// Creation time assigned by the store.
    pub created: DateTime<Utc>,
}

/// Order ready to be inserted; the store assigns `id` and `created`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    /// Owning user.
    pub user_id: UserId,
    /// Salad and customisations.
    pub items: OrderItems,
    /// Server-computed total.
    pub total: Decimal,
    /// Initial status, always [`OrderStatus::Pending`].
    pub status: OrderStatus,
    /// Whether the order is delivered rather than collected.
    pub delivery: bool,
}

/// Reasons a customisation request cannot be priced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomizationError {
    /// The category key is not one of `base`, `topping`, `dressing`.
    #[error("unknown option category `{category}`")]
    UnknownCategory {
        /// Category as sent by the client.
        category: String,
    },
    /// No option in the category matches the selector.
    #[error("no {category} option named `{selector}`")]
    UnknownOption {
        /// Category searched.
        category: OptionCategory,
        /// Selector as sent by the client.
        selector: String,
    },
    /// The option exists but is switched off.
    #[error("{category} option `{name}` is not available")]
    UnavailableOption {
        /// Category of the option.
        category: OptionCategory,
        /// Option display name.
        name: String,
    },
}

/// Priced order contents produced by [`price_order`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedItems {
    /// Items to persist.
    pub items: OrderItems,
    /// Salad price plus every selected option price.
    pub total: Decimal,
}

/// First available option in `category` matching `selector`. Names are not
/// unique, so an unavailable match only wins when nothing else matches.
fn resolve_option<'a>(
    options: &'a [CustomOption],
    category: OptionCategory,
    selector: &str,
) -> Result<&'a CustomOption, CustomizationError> {
    let mut matching = options
        .iter()
        .filter(|option| option.category == category && option.matches(selector))
        .peekable();
    let Some(first) = matching.peek().copied() else {
        return Err(CustomizationError::UnknownOption {
            category,
            selector: selector.to_owned(),
        });
    };
    matching
        .find(|option| option.available)
        .ok_or_else(|| CustomizationError::UnavailableOption {
            category,
            name: first.name.clone(),
        })
}

/// Resolve the customer's selections against the stored options and compute
/// the order total.
///
/// `custom` maps raw category names to option selectors (ids or names).
pub fn price_order(
    salad: &Salad,
    options: &[CustomOption],
    custom: &BTreeMap<String, Vec<String>>,
) -> Result<PricedItems, CustomizationError> {
    let mut total = salad.price;
    let mut resolved: BTreeMap<OptionCategory, Vec<String>> = BTreeMap::new();

    for (raw_category, selectors) in custom {
        let category = OptionCategory::parse(raw_category.trim()).ok_or_else(|| {
            CustomizationError::UnknownCategory {
                category: raw_category.clone(),
            }
        })?;
        for selector in selectors {
            let option = resolve_option(options, category, selector)?;
            total += option.price;
            resolved.entry(category).or_default().push(option.name.clone());
        }
    }

    Ok(PricedItems {
        items: OrderItems {
            salad_id: salad.id,
            custom: resolved,
        },
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OptionId;
    use rstest::{fixture, rstest};

    #[fixture]
    fn salad() -> Salad {
        Salad {
            id: SaladId::random(),
            name: "Garden".to_owned(),
            price: Decimal::new(800, 2),
            ingredients: vec![],
            image: None,
            is_default: true,
        }
    }

    #[fixture]
    fn options() -> Vec<CustomOption> {
        let make = |category, name: &str, cents, available| CustomOption {
            id: OptionId::random(),
            category,
            name: name.to_owned(),
            price: Decimal::new(cents, 2),
            available,
        };
        vec![
            make(OptionCategory::Base, "Spinach", 0, true),
            make(OptionCategory::Topping, "Feta", 150, true),
            make(OptionCategory::Topping, "Avocado", 200, true),
            make(OptionCategory::Topping, "Truffle", 900, false),
            make(OptionCategory::Dressing, "Vinaigrette", 50, true),
        ]
    }

    fn custom(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(category, names)| {
                (
                    (*category).to_owned(),
                    names.iter().map(|name| (*name).to_owned()).collect(),
                )
            })
            .collect()
    }

    #[rstest]
    fn total_is_salad_price_plus_selected_options(salad: Salad, options: Vec<CustomOption>) {
        let priced = price_order(
            &salad,
            &options,
            &custom(&[
                ("base", &["spinach"]),
                ("topping", &["Feta", "avocado"]),
                ("dressing", &["Vinaigrette"]),
            ]),
        )
        .expect("valid selection");

        assert_eq!(priced.total, Decimal::new(1200, 2));
        assert_eq!(
            priced.items.custom.get(&OptionCategory::Topping),
            Some(&vec!["Feta".to_owned(), "Avocado".to_owned()])
        );
    }

    #[rstest]
    fn no_customisation_costs_the_salad_price(salad: Salad, options: Vec<CustomOption>) {
        let priced = price_order(&salad, &options, &BTreeMap::new()).expect("valid");
        assert_eq!(priced.total, salad.price);
        assert!(priced.items.custom.is_empty());
        assert_eq!(priced.items.salad_id, salad.id);
    }

    #[rstest]
    fn options_are_matched_within_their_category(salad: Salad, options: Vec<CustomOption>) {
        let err = price_order(&salad, &options, &custom(&[("base", &["Feta"])]))
            .expect_err("feta is a topping");
        assert_eq!(
            err,
            CustomizationError::UnknownOption {
                category: OptionCategory::Base,
                selector: "Feta".to_owned(),
            }
        );
    }

    #[rstest]
    fn unknown_categories_are_rejected(salad: Salad, options: Vec<CustomOption>) {
        let err = price_order(&salad, &options, &custom(&[("sauce", &["Mayo"])]))
            .expect_err("unknown category");
        assert!(matches!(err, CustomizationError::UnknownCategory { .. }));
    }

    #[rstest]
    fn unavailable_options_are_rejected(salad: Salad, options: Vec<CustomOption>) {
        let err = price_order(&salad, &options, &custom(&[("topping", &["truffle"])]))
            .expect_err("unavailable");
        assert!(matches!(err, CustomizationError::UnavailableOption { .. }));
    }

    #[rstest]
    fn duplicate_names_resolve_to_the_available_option(
        salad: Salad,
        mut options: Vec<CustomOption>,
    ) {
        let restocked = CustomOption {
            id: OptionId::random(),
            category: OptionCategory::Topping,
            name: "truffle".to_owned(),
            price: Decimal::new(700, 2),
            available: true,
        };
        options.push(restocked);

        let priced = price_order(&salad, &options, &custom(&[("topping", &["Truffle"])]))
            .expect("an available truffle exists");
        assert_eq!(priced.total, Decimal::new(1500, 2));
        assert_eq!(
            priced.items.custom.get(&OptionCategory::Topping),
            Some(&vec!["truffle".to_owned()])
        );
    }

    #[rstest]
    #[case(OrderStatus::Pending, OrderStatus::Prepping, true)]
    #[case(OrderStatus::Prepping, OrderStatus::Ready, true)]
    #[case(OrderStatus::Ready, OrderStatus::Delivered, true)]
    #[case(OrderStatus::Pending, OrderStatus::Ready, false)]
    #[case(OrderStatus::Ready, OrderStatus::Prepping, false)]
    #[case(OrderStatus::Pending, OrderStatus::Pending, false)]
    #[case(OrderStatus::Delivered, OrderStatus::Pending, false)]
    fn only_the_immediate_successor_is_accepted(
        #[case] from: OrderStatus,
        #[case] to: OrderStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.transition_to(to).is_ok(), allowed);
    }

    #[rstest]
    fn delivered_is_terminal() {
        assert_eq!(OrderStatus::Delivered.successor(), None);
    }
}
