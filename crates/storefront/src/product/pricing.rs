//! Sale-price presentation.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use larkspur_core::Price;

/// How a product's price is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricePresentation {
    /// The charged price is below the origin price: show the origin price
    /// struck through next to the sale price.
    Discounted { origin: Price, sale: Price },
    /// Show the charged price alone.
    Regular { price: Price },
}

impl PricePresentation {
    /// Decide how to present `price` (origin) and `real_price` (charged).
    ///
    /// Only a strictly lower charged price counts as a discount; equal prices
    /// and prices in different currencies render as regular.
    #[must_use]
    pub fn present(price: Price, real_price: Price) -> Self {
        if real_price < price {
            Self::Discounted {
                origin: price,
                sale: real_price,
            }
        } else {
            Self::Regular { price: real_price }
        }
    }

    /// The price the customer pays.
    #[must_use]
    pub const fn active(&self) -> Price {
        match self {
            Self::Discounted { sale, .. } => *sale,
            Self::Regular { price } => *price,
        }
    }

    /// The struck-through origin price, if discounted.
    #[must_use]
    pub const fn struck_through(&self) -> Option<Price> {
        match self {
            Self::Discounted { origin, .. } => Some(*origin),
            Self::Regular { .. } => None,
        }
    }

    /// Whole-percent discount, rounded down. `None` when not discounted or
    /// when the amounts are out of range.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        match self {
            Self::Discounted { origin, sale } if !origin.amount.is_zero() => origin
                .amount
                .checked_sub(sale.amount)?
                .checked_div(origin.amount)?
                .checked_mul(Decimal::ONE_HUNDRED)?
                .floor()
                .to_u32(),
            _ => None,
        }
    }
}

/// Display strings for a [`PricePresentation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceView {
    /// Formatted price the customer pays.
    pub active: String,
    /// Formatted origin price to strike through.
    pub struck_through: Option<String>,
    /// Discount badge percentage.
    pub discount_percent: Option<u32>,
}

impl From<&PricePresentation> for PriceView {
    fn from(presentation: &PricePresentation) -> Self {
        Self {
            active: presentation.active().display(),
            struck_through: presentation.struck_through().map(|p| p.display()),
            discount_percent: presentation.discount_percent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use larkspur_core::CurrencyCode;

    use super::*;

    fn usd(minor: i64) -> Price {
        Price::from_minor_units(minor, CurrencyCode::USD)
    }

    #[test]
    fn test_lower_real_price_is_discounted() {
        let presentation = PricePresentation::present(usd(8999), usd(5999));

        assert_eq!(presentation.struck_through(), Some(usd(8999)));
        assert_eq!(presentation.active(), usd(5999));
        assert_eq!(presentation.discount_percent(), Some(33));
    }

    #[test]
    fn test_equal_prices_are_regular() {
        let presentation = PricePresentation::present(usd(5000), usd(5000));

        assert_eq!(presentation, PricePresentation::Regular { price: usd(5000) });
        assert_eq!(presentation.struck_through(), None);
        assert_eq!(presentation.discount_percent(), None);
    }

    #[test]
    fn test_higher_real_price_shows_real_price_only() {
        let presentation = PricePresentation::present(usd(4000), usd(4500));
        assert_eq!(presentation.active(), usd(4500));
        assert_eq!(presentation.struck_through(), None);
    }

    #[test]
    fn test_mixed_currencies_are_regular() {
        let origin = Price::from_minor_units(9000, CurrencyCode::EUR);
        let presentation = PricePresentation::present(origin, usd(100));
        assert_eq!(presentation.active(), usd(100));
        assert_eq!(presentation.struck_through(), None);
    }

    #[test]
    fn test_free_sale_is_full_discount() {
        let presentation = PricePresentation::present(usd(1000), usd(0));
        assert_eq!(presentation.discount_percent(), Some(100));
    }

    #[test]
    fn test_extreme_amounts_do_not_overflow() {
        let presentation = PricePresentation::present(
            Price::new(Decimal::MAX, CurrencyCode::USD),
            Price::new(Decimal::ONE, CurrencyCode::USD),
        );
        assert!(matches!(presentation.discount_percent(), Some(99 | 100)));

        let presentation = PricePresentation::present(
            Price::new(Decimal::MAX, CurrencyCode::USD),
            Price::new(Decimal::MIN, CurrencyCode::USD),
        );
        assert_eq!(presentation.discount_percent(), None);
    }

    #[test]
    fn test_price_view_formats_branches() {
        let view = PriceView::from(&PricePresentation::present(usd(8999), usd(5999)));
        assert_eq!(view.active, "$59.99");
        assert_eq!(view.struck_through.as_deref(), Some("$89.99"));

        let view = PriceView::from(&PricePresentation::present(usd(5999), usd(5999)));
        assert_eq!(view.active, "$59.99");
        assert_eq!(view.struck_through, None);
        assert_eq!(view.discount_percent, None);
    }
}
