//! Human-readable sequence numbers for deliveries and invoices.
//!
//! Numbers look like `DEL-000042`: a fixed prefix, a dash, and a counter
//! zero-padded to six digits. The next number is derived from the most
//! recently issued one; issuance is not reserved ahead of time, so two
//! concurrent creations can derive the same value. The unique index on the
//! number column is the backstop, and the losing insert surfaces as a
//! conflict the client can retry.

/// Width of the zero-padded counter segment.
pub const SEQUENCE_WIDTH: usize = 6;

/// Prefix for delivery numbers.
pub const DELIVERY_PREFIX: &str = "DEL";

/// Prefix for invoice numbers.
pub const INVOICE_PREFIX: &str = "INV";

/// Derives the next number in a prefixed sequence.
///
/// `last` is the most recently issued number, if any. When it is absent or
/// does not parse as `<PREFIX>-<digits>`, the sequence restarts at 1.
pub fn next_in_sequence(prefix: &str, last: Option<&str>) -> String {
    let next = last
        .and_then(|value| value.strip_prefix(prefix))
        .and_then(|rest| rest.strip_prefix('-'))
        .and_then(|digits| digits.parse::<u64>().ok())
        .map(|n| n + 1)
        .unwrap_or(1);

    format!("{}-{:0width$}", prefix, next, width = SEQUENCE_WIDTH)
}
