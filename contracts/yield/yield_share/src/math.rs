use yield_share_interface::LedgerError;

/// Pool exchange rate snapshot: assets per share scaled by `scale`.
///
/// Read once per operation so every conversion in a claim uses the same rate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rate {
    pub rate: i128,
    pub scale: i128,
}

impl Rate {
    pub fn new(rate: i128, decimals: u32) -> Result<Self, LedgerError> {
        if rate <= 0 {
            return Err(LedgerError::InvalidExchangeRate);
        }
        let scale = 10i128
            .checked_pow(decimals)
            .ok_or(LedgerError::MathOverflow)?;
        Ok(Rate { rate, scale })
    }

    /// floor(shares * rate / scale)
    pub fn asset_value(&self, shares: i128) -> Result<i128, LedgerError> {
        shares
            .checked_mul(self.rate)
            .map(|v| v / self.scale)
            .ok_or(LedgerError::MathOverflow)
    }

    /// floor(assets * scale / rate)
    pub fn shares_for_assets(&self, assets: i128) -> Result<i128, LedgerError> {
        assets
            .checked_mul(self.scale)
            .map(|v| v / self.rate)
            .ok_or(LedgerError::MathOverflow)
    }
}

/// Outcome of a claim computed before touching the pool.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClaimPlan {
    /// Shares left with the donator after the claim
    pub remaining_shares: i128,
    /// Shares redeemed for the receiver
    pub shares_to_claim: i128,
    /// Asset value of `shares_to_claim` at the snapshot rate
    pub claim_value: i128,
}

/// Splits `shares` into the part that backs `principal + dust` and the yield.
///
/// Every check runs on the snapshot rate, so a failing plan never reaches the
/// pool and a passing plan leaves `asset_value(remaining) >= principal`.
pub fn plan_claim(
    rate: &Rate,
    principal: i128,
    shares: i128,
    dust_threshold: i128,
) -> Result<ClaimPlan, LedgerError> {
    let protected = principal
        .checked_add(dust_threshold)
        .ok_or(LedgerError::MathOverflow)?;

    let current_value = rate.asset_value(shares)?;
    if current_value <= protected {
        return Err(LedgerError::NoYieldAvailable);
    }

    let remaining_shares = rate.shares_for_assets(protected)?;
    if shares <= remaining_shares {
        return Err(LedgerError::InsufficientYieldAfterRounding);
    }
    let shares_to_claim = shares - remaining_shares;

    if rate.asset_value(remaining_shares)? < principal {
        return Err(LedgerError::ClaimExceedsYield);
    }

    Ok(ClaimPlan {
        remaining_shares,
        shares_to_claim,
        claim_value: rate.asset_value(shares_to_claim)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // 7 decimals, like Stellar assets
    const SCALE: i128 = 10_000_000;

    fn rate(r: i128) -> Rate {
        Rate::new(r, 7).unwrap()
    }

    #[test]
    fn test_rate_rejects_non_positive() {
        assert_eq!(Rate::new(0, 7), Err(LedgerError::InvalidExchangeRate));
        assert_eq!(Rate::new(-5, 7), Err(LedgerError::InvalidExchangeRate));
    }

    #[test]
    fn test_conversions_round_down() {
        // 1 share = 1.5 assets
        let r = rate(15_000_000);
        assert_eq!(r.asset_value(3), Ok(4));
        assert_eq!(r.shares_for_assets(4), Ok(2));
        assert_eq!(r.asset_value(0), Ok(0));
    }

    #[test]
    fn test_conversion_overflow() {
        let r = rate(SCALE);
        assert_eq!(r.asset_value(i128::MAX), Err(LedgerError::MathOverflow));
        assert_eq!(r.shares_for_assets(i128::MAX), Err(LedgerError::MathOverflow));
    }

    #[test]
    fn test_plan_no_yield_at_par() {
        let r = rate(SCALE);
        assert_eq!(
            plan_claim(&r, 1000, 1000, 0),
            Err(LedgerError::NoYieldAvailable)
        );
    }

    #[test]
    fn test_plan_yield_within_dust() {
        // value 1005, protected 1010
        let r = rate(10_050_000);
        assert_eq!(
            plan_claim(&r, 1000, 1000, 10),
            Err(LedgerError::NoYieldAvailable)
        );
    }

    #[test]
    fn test_plan_splits_yield_above_dust() {
        // value 1050, principal 1000, dust 10
        let r = rate(10_500_000);
        let plan = plan_claim(&r, 1000, 1000, 10).unwrap();

        // floor(1010 / 1.05) = 961
        assert_eq!(plan.remaining_shares, 961);
        assert_eq!(plan.shares_to_claim, 39);
        assert_eq!(plan.claim_value, 40);
        assert!(r.asset_value(plan.remaining_shares).unwrap() >= 1000);
    }

    #[test]
    fn test_plan_rejects_claim_that_erodes_principal() {
        // 2 shares at 3.3 are worth 6 > 5, but the single retained share is worth 3
        let r = rate(33_000_000);
        assert_eq!(
            plan_claim(&r, 5, 2, 0),
            Err(LedgerError::ClaimExceedsYield)
        );
    }

    #[test]
    fn test_plan_dust_absorbs_rounding() {
        // Without dust, floor(1000 / 1.05) = 952 shares are worth only 999
        let r = rate(10_500_000);
        assert_eq!(
            plan_claim(&r, 1000, 1000, 0),
            Err(LedgerError::ClaimExceedsYield)
        );

        let plan = plan_claim(&r, 1000, 1000, 1).unwrap();
        assert_eq!(plan.remaining_shares, 953);
        assert!(r.asset_value(plan.remaining_shares).unwrap() >= 1000);
    }
}
