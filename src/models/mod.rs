mod daily_change;
mod display_mode;
mod display_range;
mod price_point;

pub use daily_change::DailyChange;
pub use display_mode::DisplayMode;
pub use display_range::{DisplayRange, RangeWindow};
pub use price_point::{ChartPoint, PricePoint};

/// Price history for a single symbol, ascending by date, no duplicate dates
pub type Series = Vec<PricePoint>;
