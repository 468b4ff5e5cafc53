/// Decimal precision for displayed amounts
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for category percentages
pub const PERCENT_DECIMAL_PRECISION: u32 = 1;

/// Number of purchases shown in the recent-purchases panel
pub const RECENT_PURCHASES_LIMIT: usize = 5;

/// Month labels for the monthly spending series, fixed calendar order
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
