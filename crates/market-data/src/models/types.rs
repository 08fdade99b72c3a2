use std::borrow::Cow;

/// Currency code (ISO 4217 or crypto ticker) - mostly static
pub type Currency = Cow<'static, str>;

/// Quote currency assumed when the user names a single currency.
pub const DEFAULT_QUOTE_CURRENCY: &str = "USD";
