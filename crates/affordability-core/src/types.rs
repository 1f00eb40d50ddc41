use rust_decimal::Decimal;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Ratios expressed on the 0-100 scale (52.5 = 52.5%). Never as decimals.
pub type Percentage = Decimal;
