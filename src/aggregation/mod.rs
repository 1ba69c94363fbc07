pub use self::{
    claim::{claim_status, ClaimStatus, CLAIM_COOLDOWN_DAYS},
    portfolio::{
        liquidated_unsettled_amount, offer_utilization, owned_offer_addresses, pending_interest,
        portfolio_summary,
    },
    risk::{position_risk, price_buffer_percent, risk_level, RiskLevel},
};

mod claim;
mod portfolio;
mod risk;
