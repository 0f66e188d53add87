//! Balance value type and display formatting

/// Native-currency balance of one address on one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    /// Amount in the smallest denomination (wei for 18-decimal chains)
    pub amount: u128,
    /// Display symbol of the native currency
    pub symbol: String,
}

impl Balance {
    pub fn new(amount: u128, symbol: impl Into<String>) -> Self {
        Self {
            amount,
            symbol: symbol.into(),
        }
    }
}

/// Render a smallest-denomination amount as a decimal string.
///
/// `format_amount(1_500_000_000_000_000_000, 18)` is `"1.5"`; whole amounts
/// drop the fractional part entirely.
pub fn format_amount(amount: u128, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let scale = 10u128.pow(u32::from(decimals));
    let whole = amount / scale;
    let frac = amount % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0>width$}", frac, width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
