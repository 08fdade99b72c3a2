use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use signal_market_data::AssetQuote;

use super::positions_model::{EntryKind, NewPosition, PositionEntry};
use crate::errors::{Error, Result};

pub const INVALID_POSITION_MESSAGE: &str =
    "Please enter valid positive numbers for shares/amount and average cost.";

pub const VALUE_OVERFLOW_MESSAGE: &str = "Position values are too large to compute.";

const PERCENT_PRECISION: u32 = 4;

/// Watchlist entry for a quote: every holding figure is zero.
pub fn watchlist_entry(quote: &AssetQuote) -> PositionEntry {
    PositionEntry {
        ticker: quote.symbol().to_string(),
        company_name: quote.display_name().to_string(),
        market_type: quote.asset_class(),
        shares: Decimal::ZERO,
        avg_cost: Decimal::ZERO,
        current_price: quote.price(),
        market_value: Decimal::ZERO,
        change_percent: Decimal::ZERO,
        is_watchlist: true,
    }
}

/// Held position valued at the quote price.
///
/// Both `shares` and `avg_cost` must be strictly positive.
pub fn portfolio_position(
    quote: &AssetQuote,
    shares: Decimal,
    avg_cost: Decimal,
) -> Result<PositionEntry> {
    if shares <= Decimal::ZERO || avg_cost <= Decimal::ZERO {
        return Err(Error::invalid_input(INVALID_POSITION_MESSAGE));
    }

    let price = quote.price();
    let market_value = shares.checked_mul(price).ok_or_else(value_overflow)?;
    let change_percent = price
        .checked_sub(avg_cost)
        .and_then(|gain| gain.checked_div(avg_cost))
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .ok_or_else(value_overflow)?
        .round_dp(PERCENT_PRECISION);

    debug!(
        "Valued {} {} @ {}: market value {}",
        shares,
        quote.symbol(),
        price,
        market_value
    );

    Ok(PositionEntry {
        ticker: quote.symbol().to_string(),
        company_name: quote.display_name().to_string(),
        market_type: quote.asset_class(),
        shares,
        avg_cost,
        current_price: price,
        market_value,
        change_percent,
        is_watchlist: false,
    })
}

/// Build the entry requested by `input` for a resolved quote.
pub fn build_position(quote: &AssetQuote, input: &NewPosition) -> Result<PositionEntry> {
    match input.kind {
        EntryKind::Watchlist => Ok(watchlist_entry(quote)),
        EntryKind::Portfolio => match (input.shares, input.avg_cost) {
            (Some(shares), Some(avg_cost)) => portfolio_position(quote, shares, avg_cost),
            _ => Err(Error::invalid_input(INVALID_POSITION_MESSAGE)),
        },
    }
}

/// Sum of market values; watchlist entries contribute zero.
pub fn total_market_value(entries: &[PositionEntry]) -> Result<Decimal> {
    entries
        .iter()
        .try_fold(Decimal::ZERO, |total, entry| total.checked_add(entry.market_value))
        .ok_or_else(value_overflow)
}

fn value_overflow() -> Error {
    Error::invalid_input(VALUE_OVERFLOW_MESSAGE)
}
