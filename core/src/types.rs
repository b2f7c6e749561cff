//! Shared primitive types used across the desk.

/// Catalog key for a service. Serialized as the `serviceType` field.
pub type ServiceId = u8;

/// Unique customer token. Timestamp-like (milliseconds since the epoch)
/// but guaranteed strictly increasing by `CustomerIdSequence`.
pub type CustomerId = u64;

/// Dollar amounts. Catalog prices are whole dollars, so sums stay exact.
pub type Amount = f64;

/// Render an amount the way the queue list shows prices:
/// whole dollars without decimals, anything else with two.
pub fn format_price(amount: Amount) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}
