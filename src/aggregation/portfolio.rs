use std::collections::HashSet;

use bigdecimal::BigDecimal;

use crate::{
    error::Error,
    helpers::{parse_base_units, token_decimals},
    types::{Liquidation, Offer, PoolBalance, PortfolioSummary, Position},
};

/// Offer ids belonging to the connected lender, narrowed to the target
/// quote token. Offers arrive lender-scoped from the API; the join with
/// liquidations and positions is string equality on these ids.
pub fn owned_offer_addresses(offers: &[Offer], quote_token: &str) -> HashSet<String> {
    offers
        .iter()
        .filter(|offer| offer.quote_token.matches(quote_token))
        .map(|offer| offer.public_key.clone())
        .collect()
}

/// Liquidation proceeds headed back to the lender but not yet sent:
/// records for an owned offer, denominated in the target quote token,
/// with no send transaction. Settled transfers contribute nothing, so
/// nothing is double counted.
pub fn liquidated_unsettled_amount(
    liquidations: &[Liquidation],
    owned: &HashSet<String>,
    quote_token: &str,
) -> Result<BigDecimal, Error> {
    let decimals = token_decimals(quote_token);
    let mut total = BigDecimal::from(0);

    for liquidation in liquidations {
        if liquidation.send_tx.is_some() {
            continue;
        }
        if !owned.contains(&liquidation.offer) {
            continue;
        }
        if liquidation.to_receive_token != quote_token {
            continue;
        }

        total += parse_base_units(&liquidation.sold_for, decimals)?;
    }

    Ok(total)
}

/// Interest accrued on the lender's active positions for the target
/// quote token. The server already reports `interest_accrued` in
/// decimal units; non-active positions contribute zero.
pub fn pending_interest(
    positions: &[Position],
    owned: &HashSet<String>,
    quote_token: &str,
) -> Result<BigDecimal, Error> {
    let mut total = BigDecimal::from(0);

    for position in positions {
        if !position.status.is_active() {
            continue;
        }
        if !owned.contains(&position.offer) {
            continue;
        }
        if !position.quote_token.matches(quote_token) {
            continue;
        }

        total += BigDecimal::try_from(position.interest_accrued)?;
    }

    Ok(total)
}

/// Share of an offer's exposure ceiling currently deployed.
pub fn offer_utilization(offer: &Offer) -> f64 {
    if offer.max_exposure <= 0.0 {
        return 0.0;
    }
    offer.current_exposure / offer.max_exposure
}

/// Pool snapshot with liquidation and interest data layered on top,
/// the number set the dashboard renders per quote token.
pub fn portfolio_summary(
    balance: &PoolBalance,
    offers: &[Offer],
    positions: &[Position],
    liquidations: &[Liquidation],
    quote_token: &str,
) -> Result<PortfolioSummary, Error> {
    let owned = owned_offer_addresses(offers, quote_token);

    Ok(PortfolioSummary {
        total: BigDecimal::try_from(balance.total)?,
        available: BigDecimal::try_from(balance.available)?,
        deployed: BigDecimal::try_from(balance.deployed)?,
        liquidated: liquidated_unsettled_amount(liquidations, &owned, quote_token)?,
        pending_interest: pending_interest(positions, &owned, quote_token)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{NATIVE_MINT, USDC_MINT};
    use crate::types::{PositionStatus, TokenRef};
    use chrono::Utc;

    fn offer(public_key: &str, quote: &str) -> Offer {
        Offer {
            public_key: public_key.to_owned(),
            lender_wallet: "lender".to_owned(),
            collateral_token: TokenRef::Address("mintA".to_owned()),
            quote_token: TokenRef::Address(quote.to_owned()),
            apr: 120.0,
            max_exposure: 100.0,
            current_exposure: 40.0,
            available_for_open: 60.0,
            active: true,
            target_ltv: 0.7,
            created_at: None,
        }
    }

    fn liquidation(offer: &str, sold_for: &str, receive: &str, send_tx: Option<&str>) -> Liquidation {
        Liquidation {
            offer: offer.to_owned(),
            position: "pos".to_owned(),
            borrowed_amount: 1.0,
            sold_for: sold_for.to_owned(),
            token_sold: "mintA".to_owned(),
            to_receive_token: receive.to_owned(),
            liquidated_at: Utc::now(),
            sold_at: None,
            liquidation_tx: "liqtx".to_owned(),
            sale_tx: None,
            send_tx: send_tx.map(str::to_owned),
            send_timestamp: None,
        }
    }

    fn position(offer: &str, status: PositionStatus, interest: f64, quote: &str) -> Position {
        Position {
            address: "pos".to_owned(),
            status,
            collateral_token: TokenRef::Address("mintA".to_owned()),
            quote_token: TokenRef::Address(quote.to_owned()),
            initial_borrow_quantity: 5.0,
            interest_accrued: interest,
            current_ltv: 0.5,
            current_price: 100.0,
            liquidation_price: 50.0,
            opened_at: None,
            closed_at: None,
            offer: offer.to_owned(),
            trader: "trader".to_owned(),
        }
    }

    #[test]
    fn owned_set_narrows_by_quote_token() {
        let offers = vec![offer("o1", NATIVE_MINT), offer("o2", USDC_MINT)];
        let owned = owned_offer_addresses(&offers, NATIVE_MINT);
        assert!(owned.contains("o1"));
        assert!(!owned.contains("o2"));
    }

    #[test]
    fn settled_liquidations_are_excluded() {
        let owned: HashSet<String> = ["o1".to_owned()].into();
        let liquidations = vec![
            liquidation("o1", "2000000000", NATIVE_MINT, None),
            liquidation("o1", "3000000000", NATIVE_MINT, Some("sendtx")),
        ];

        let total = liquidated_unsettled_amount(&liquidations, &owned, NATIVE_MINT).unwrap();
        assert_eq!(total, BigDecimal::from(2));
    }

    #[test]
    fn foreign_offers_do_not_change_the_total() {
        let owned: HashSet<String> = ["o1".to_owned()].into();
        let mut liquidations = vec![liquidation("o1", "5000000", USDC_MINT, None)];
        let baseline = liquidated_unsettled_amount(&liquidations, &owned, USDC_MINT).unwrap();

        // monotonic removal: a record for an offer outside the owned
        // set must not move the sum
        liquidations.push(liquidation("someone-elses-offer", "9000000", USDC_MINT, None));
        let with_foreign = liquidated_unsettled_amount(&liquidations, &owned, USDC_MINT).unwrap();
        assert_eq!(baseline, with_foreign);
        assert_eq!(baseline, BigDecimal::from(5));
    }

    #[test]
    fn mismatched_receive_token_is_excluded() {
        let owned: HashSet<String> = ["o1".to_owned()].into();
        let liquidations = vec![liquidation("o1", "1000000000", NATIVE_MINT, None)];
        let total = liquidated_unsettled_amount(&liquidations, &owned, USDC_MINT).unwrap();
        assert_eq!(total, BigDecimal::from(0));
    }

    #[test]
    fn base_unit_conversion_follows_the_quote_token() {
        let owned: HashSet<String> = ["o1".to_owned()].into();

        // 1.5 SOL in lamports
        let sol = vec![liquidation("o1", "1500000000", NATIVE_MINT, None)];
        let total = liquidated_unsettled_amount(&sol, &owned, NATIVE_MINT).unwrap();
        assert_eq!(total, BigDecimal::try_from(1.5).unwrap());

        // 1.5 USDC in micro units
        let usdc = vec![liquidation("o1", "1500000", USDC_MINT, None)];
        let total = liquidated_unsettled_amount(&usdc, &owned, USDC_MINT).unwrap();
        assert_eq!(total, BigDecimal::try_from(1.5).unwrap());
    }

    #[test]
    fn only_active_owned_positions_accrue_interest() {
        let owned: HashSet<String> = ["o1".to_owned()].into();
        let positions = vec![
            position("o1", PositionStatus::Active, 0.25, USDC_MINT),
            position("o1", PositionStatus::Repaid, 99.0, USDC_MINT),
            position("o1", PositionStatus::Liquidated, 99.0, USDC_MINT),
            position("other", PositionStatus::Active, 99.0, USDC_MINT),
            position("o1", PositionStatus::Active, 0.5, NATIVE_MINT),
        ];

        let total = pending_interest(&positions, &owned, USDC_MINT).unwrap();
        assert_eq!(total, BigDecimal::try_from(0.25).unwrap());
    }

    #[test]
    fn utilization_handles_unfunded_offers() {
        let mut o = offer("o1", USDC_MINT);
        assert_eq!(offer_utilization(&o), 0.4);

        o.max_exposure = 0.0;
        assert_eq!(offer_utilization(&o), 0.0);
    }

    #[test]
    fn summary_layers_derived_amounts_over_the_snapshot() {
        let offers = vec![offer("o1", USDC_MINT)];
        let positions = vec![position("o1", PositionStatus::Active, 0.75, USDC_MINT)];
        let liquidations = vec![liquidation("o1", "2000000", USDC_MINT, None)];
        let balance = PoolBalance {
            total: 100.0,
            available: 60.0,
            deployed: 40.0,
        };

        let summary =
            portfolio_summary(&balance, &offers, &positions, &liquidations, USDC_MINT).unwrap();
        assert_eq!(summary.total, BigDecimal::from(100));
        assert_eq!(summary.available, BigDecimal::from(60));
        assert_eq!(summary.deployed, BigDecimal::from(40));
        assert_eq!(summary.liquidated, BigDecimal::from(2));
        assert_eq!(summary.pending_interest, BigDecimal::try_from(0.75).unwrap());
    }

    #[test]
    fn empty_snapshot_derives_an_all_zero_summary() {
        let summary =
            portfolio_summary(&PoolBalance::default(), &[], &[], &[], USDC_MINT).unwrap();
        assert_eq!(summary, PortfolioSummary::default());
    }
}
