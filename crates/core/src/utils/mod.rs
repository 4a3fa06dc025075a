pub mod money;
pub mod time_utils;
pub mod validation;

pub use money::{cents_to_dollars, dollars_to_cents};
pub use time_utils::{month_key, month_window, parse_date, parse_month};
pub use validation::{required, validate_id, validate_note, validate_title};
