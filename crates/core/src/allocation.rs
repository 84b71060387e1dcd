//! Amount splitting utilities.
//!
//! Every function here guarantees that the parts sum EXACTLY to the
//! (rounded) total: no cents are lost or gained.
//!
//! - [`AllocationUtil::split_last_absorbs`]: equal parts floored to the
//!   target precision, the last part takes whatever is left over. Installment
//!   schedules and the varied prefill are built with it.
//! - [`AllocationUtil::shares_by_percentage`]: the amount each result center
//!   receives from an apportionment, shown in the economic preview.

use rust_decimal::prelude::*;

/// Allocation utility for distributing amounts.
pub struct AllocationUtil;

impl AllocationUtil {
    /// Split `total` into `count` parts of equal base value, the last part
    /// absorbing the rounding remainder.
    ///
    /// `base = floor(total * 10^dp / count) / 10^dp`, every part but the last
    /// equals `base`, the last equals `total - base * (count - 1)`.
    ///
    /// Returns an empty vector for `count == 0`. `total` is expected to be
    /// non-negative; callers bound `count`, since one part is allocated per
    /// unit of it.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use expensa_core::allocation::AllocationUtil;
    ///
    /// let parts = AllocationUtil::split_last_absorbs(dec!(100), 3, 2);
    /// assert_eq!(parts, vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
    /// ```
    #[must_use]
    pub fn split_last_absorbs(total: Decimal, count: usize, decimal_places: u32) -> Vec<Decimal> {
        if count == 0 {
            return vec![];
        }

        let count_dec = Decimal::from(count as u64);
        let base = floor_share(total, count_dec, decimal_places);
        let remainder = total - base * count_dec;

        let mut parts = vec![base; count];
        if let Some(last) = parts.last_mut() {
            *last += remainder;
        }
        parts
    }

    /// Amount each result center receives from `total`, given its
    /// apportionment percentage.
    ///
    /// Each share is truncated to `decimal_places`; the cents lost to
    /// truncation go one by one to the centers whose exact share lost the
    /// most, earlier centers first on ties. With percentages summing to 100
    /// the shares add up to `total` rounded to `decimal_places`.
    ///
    /// Returns `None` when an intermediate amount does not fit in a
    /// `Decimal`, which only absurd form input can cause.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use expensa_core::allocation::AllocationUtil;
    ///
    /// let shares = AllocationUtil::shares_by_percentage(dec!(10), &[dec!(50), dec!(50)], 2);
    /// assert_eq!(shares, Some(vec![dec!(5), dec!(5)]));
    /// ```
    #[must_use]
    pub fn shares_by_percentage(
        total: Decimal,
        percentages: &[Decimal],
        decimal_places: u32,
    ) -> Option<Vec<Decimal>> {
        let cent = Decimal::new(1, decimal_places);
        let total = total.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven);

        // (truncated share, what truncation dropped) per center
        let mut shares = Vec::with_capacity(percentages.len());
        for percentage in percentages {
            let exact = total.checked_mul(*percentage)?.checked_div(Decimal::ONE_HUNDRED)?;
            let truncated = exact.round_dp_with_strategy(decimal_places, RoundingStrategy::ToZero);
            shares.push((truncated, exact.checked_sub(truncated)?));
        }

        let handed_out = shares
            .iter()
            .try_fold(Decimal::ZERO, |acc, (share, _)| acc.checked_add(*share))?;
        // Overshooting percentages leave nothing to hand out.
        let missing_cents = total
            .checked_sub(handed_out)?
            .checked_div(cent)?
            .trunc()
            .to_usize()
            .unwrap_or(0);

        let mut by_loss: Vec<usize> = (0..shares.len()).collect();
        by_loss.sort_by(|&a, &b| shares[b].1.cmp(&shares[a].1));
        for &index in by_loss.iter().take(missing_cents) {
            shares[index].0 = shares[index].0.checked_add(cent)?;
        }

        Some(shares.into_iter().map(|(share, _)| share).collect())
    }
}

/// `floor(total * 10^dp / count) / 10^dp`.
///
/// The division runs on integers so the 28-digit precision of `Decimal`
/// division never rounds the base up past the true floor.
fn floor_share(total: Decimal, count: Decimal, decimal_places: u32) -> Decimal {
    let unit = Decimal::new(1, decimal_places);

    if let Some(scaled) = total.checked_div(unit).map(|s| s.floor()) {
        // floor(floor(x) / n) == floor(x / n) for a positive integer n
        let rem = scaled % count;
        let mut quotient = (scaled - rem) / count;
        if rem < Decimal::ZERO {
            quotient -= Decimal::ONE;
        }
        return quotient * unit;
    }

    // total * 10^dp does not fit. Such a total has no cents worth keeping,
    // so floor to whole units and step down until base * count <= total.
    let mut base = (total / count).floor();
    while base.checked_mul(count).is_none_or(|product| product > total) {
        base -= Decimal::ONE;
    }
    base
}
