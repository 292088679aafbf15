//! Pricing
//!
//! Offer prices are rounded per unit, tax is rounded once on the subtotal. The
//! two roundings are independent, so `subtotal + tax` can differ by one unit from
//! an unrounded calculation.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::cart::CartLine;

/// Errors that can occur while pricing cart lines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Decimal arithmetic overflowed.
    #[error("price arithmetic overflowed")]
    Overflow,
}

/// Flat discount applied to products on offer.
pub fn offer_discount() -> Percentage {
    Percentage::from(Decimal::new(30, 2))
}

/// Flat tax rate applied to the subtotal.
pub fn tax_rate() -> Percentage {
    Percentage::from(Decimal::new(21, 2))
}

/// Round an amount to the nearest whole currency unit, halves away from zero.
pub fn round_to_unit(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Price of a single unit after the offer discount, if any.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the discount calculation overflows.
pub fn effective_unit_price(price: Decimal, on_offer: bool) -> Result<Decimal, PricingError> {
    if !on_offer {
        return Ok(price);
    }

    let discount = (offer_discount() * Decimal::ONE)
        .checked_mul(price)
        .ok_or(PricingError::Overflow)?;

    price
        .checked_sub(discount)
        .map(round_to_unit)
        .ok_or(PricingError::Overflow)
}

/// Effective unit price multiplied by the line quantity.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the calculation overflows.
pub fn line_total(line: &CartLine) -> Result<Decimal, PricingError> {
    effective_unit_price(line.price, line.on_offer)?
        .checked_mul(Decimal::from(line.quantity))
        .ok_or(PricingError::Overflow)
}

/// Cart totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Sum of all line totals
    pub subtotal: Decimal,

    /// Tax on the subtotal, rounded to whole units
    pub tax: Decimal,

    /// Subtotal plus tax
    pub total: Decimal,
}

/// Calculates subtotal, tax and total for a sequence of cart lines.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if any step of the calculation overflows.
pub fn compute_totals<'a>(
    lines: impl IntoIterator<Item = &'a CartLine>,
) -> Result<Totals, PricingError> {
    let subtotal = lines
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, line| {
            acc.checked_add(line_total(line)?)
                .ok_or(PricingError::Overflow)
        })?;

    let tax = (tax_rate() * Decimal::ONE)
        .checked_mul(subtotal)
        .map(round_to_unit)
        .ok_or(PricingError::Overflow)?;

    let total = subtotal.checked_add(tax).ok_or(PricingError::Overflow)?;

    Ok(Totals {
        subtotal,
        tax,
        total,
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::products::Product;

    use super::*;

    fn line(price: i64, on_offer: bool, quantity: u32) -> CartLine {
        let product = Product::new(1, "A", Decimal::from(price)).with_offer(on_offer);

        let mut line = CartLine::from(&product);
        line.quantity = quantity;

        line
    }

    #[test]
    fn regular_price_is_unchanged() -> TestResult {
        assert_eq!(
            effective_unit_price(Decimal::from(1234), false)?,
            Decimal::from(1234)
        );
        assert_eq!(
            effective_unit_price(Decimal::new(995, 1), false)?,
            Decimal::new(995, 1)
        );

        Ok(())
    }

    #[test]
    fn offer_price_is_seventy_percent_rounded() -> TestResult {
        assert_eq!(effective_unit_price(Decimal::from(200), true)?, Decimal::from(140));
        assert_eq!(effective_unit_price(Decimal::from(999), true)?, Decimal::from(699));

        Ok(())
    }

    #[test]
    fn offer_price_rounds_halves_up() -> TestResult {
        // 5 * 0.7 = 3.5
        assert_eq!(effective_unit_price(Decimal::from(5), true)?, Decimal::from(4));

        // 15 * 0.7 = 10.5
        assert_eq!(effective_unit_price(Decimal::from(15), true)?, Decimal::from(11));

        Ok(())
    }

    #[test]
    fn offer_rounding_happens_per_unit() -> TestResult {
        // 3 units of 5 on offer: per unit 4, not round(10.5) = 11
        assert_eq!(line_total(&line(5, true, 3))?, Decimal::from(12));

        Ok(())
    }

    #[test]
    fn totals_for_scenario_cart() -> TestResult {
        let lines = [line(100, false, 1), line(200, true, 2)];

        let totals = compute_totals(&lines)?;

        assert_eq!(totals.subtotal, Decimal::from(380));
        assert_eq!(totals.tax, Decimal::from(80));
        assert_eq!(totals.total, Decimal::from(460));

        Ok(())
    }

    #[test]
    fn tax_rounds_on_the_subtotal() -> TestResult {
        // 50 * 0.21 = 10.5
        let totals = compute_totals(&[line(50, false, 1)])?;

        assert_eq!(totals.tax, Decimal::from(11));
        assert_eq!(totals.total, Decimal::from(61));

        Ok(())
    }

    #[test]
    fn total_is_always_subtotal_plus_tax() -> TestResult {
        let cases = [(1, false, 1), (7, true, 3), (333, true, 9), (12, false, 40)];

        for (price, on_offer, quantity) in cases {
            let totals = compute_totals(&[line(price, on_offer, quantity), line(19, true, 2)])?;

            assert_eq!(totals.total, totals.subtotal + totals.tax);
        }

        Ok(())
    }

    #[test]
    fn empty_lines_total_zero() -> TestResult {
        let lines: [CartLine; 0] = [];

        let totals = compute_totals(&lines)?;

        assert_eq!(totals, Totals::default());

        Ok(())
    }

    #[test]
    fn overflow_is_reported() {
        let mut huge = line(1, false, u32::MAX);
        huge.price = Decimal::MAX;

        assert_eq!(compute_totals(&[huge]), Err(PricingError::Overflow));
    }
}
