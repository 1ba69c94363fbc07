use serde::Serialize;

use crate::types::Position;

/// High when LTV is above 0.8 or the price buffer is under 20 %, medium
/// when LTV is above 0.6 or the buffer is under 40 %. Either signal
/// alone escalates; there is no weighting.
const HIGH_LTV: f64 = 0.8;
const MEDIUM_LTV: f64 = 0.6;
const HIGH_BUFFER_PERCENT: f64 = 20.0;
const MEDIUM_BUFFER_PERCENT: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Percentage gap between the current price and the liquidation price.
pub fn price_buffer_percent(current_price: f64, liquidation_price: f64) -> f64 {
    if current_price <= 0.0 {
        return 0.0;
    }
    (current_price - liquidation_price) / current_price * 100.0
}

pub fn risk_level(ltv: f64, buffer_percent: f64) -> RiskLevel {
    if ltv > HIGH_LTV || buffer_percent < HIGH_BUFFER_PERCENT {
        RiskLevel::High
    } else if ltv > MEDIUM_LTV || buffer_percent < MEDIUM_BUFFER_PERCENT {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Risk only applies while the position is open.
pub fn position_risk(position: &Position) -> Option<RiskLevel> {
    if !position.status.is_active() {
        return None;
    }

    let buffer = price_buffer_percent(position.current_price, position.liquidation_price);
    Some(risk_level(position.current_ltv, buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PositionStatus, TokenRef};

    fn position(status: PositionStatus, ltv: f64, current: f64, liquidation: f64) -> Position {
        Position {
            address: "pos".to_owned(),
            status,
            collateral_token: TokenRef::Address("mintA".to_owned()),
            quote_token: TokenRef::Address("mintB".to_owned()),
            initial_borrow_quantity: 1.0,
            interest_accrued: 0.0,
            current_ltv: ltv,
            current_price: current,
            liquidation_price: liquidation,
            opened_at: None,
            closed_at: None,
            offer: "o1".to_owned(),
            trader: "trader".to_owned(),
        }
    }

    #[test]
    fn ltv_boundary_is_exclusive() {
        // exactly 0.8 with a comfortable buffer stays medium
        assert_eq!(risk_level(0.8, 45.0), RiskLevel::Medium);
        assert_eq!(risk_level(0.800001, 45.0), RiskLevel::High);
        assert_eq!(risk_level(0.6, 45.0), RiskLevel::Low);
        assert_eq!(risk_level(0.600001, 45.0), RiskLevel::Medium);
    }

    #[test]
    fn buffer_boundary_is_exclusive() {
        // exactly 20 % with low LTV stays medium
        assert_eq!(risk_level(0.1, 20.0), RiskLevel::Medium);
        assert_eq!(risk_level(0.1, 19.999), RiskLevel::High);
        assert_eq!(risk_level(0.1, 40.0), RiskLevel::Low);
        assert_eq!(risk_level(0.1, 39.999), RiskLevel::Medium);
    }

    #[test]
    fn either_signal_alone_escalates() {
        // high solely via LTV, buffer is healthy
        assert_eq!(risk_level(0.85, 25.0), RiskLevel::High);
        // high solely via buffer, LTV is healthy
        assert_eq!(risk_level(0.5, 15.0), RiskLevel::High);
    }

    #[test]
    fn buffer_percent_from_prices() {
        assert_eq!(price_buffer_percent(100.0, 80.0), 20.0);
        assert_eq!(price_buffer_percent(100.0, 60.0), 40.0);
        assert_eq!(price_buffer_percent(0.0, 60.0), 0.0);
    }

    #[test]
    fn closed_positions_carry_no_risk() {
        assert_eq!(
            position_risk(&position(PositionStatus::Active, 0.9, 100.0, 50.0)),
            Some(RiskLevel::High)
        );
        assert_eq!(
            position_risk(&position(PositionStatus::Repaid, 0.9, 100.0, 50.0)),
            None
        );
        assert_eq!(
            position_risk(&position(PositionStatus::SoldByTakeProfit, 0.9, 100.0, 50.0)),
            None
        );
    }
}
