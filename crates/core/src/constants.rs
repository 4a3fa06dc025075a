/// Default page size for expense listings
pub const DEFAULT_EXPENSE_PAGE_SIZE: i64 = 50;

/// Hard cap on expense listing page size
pub const MAX_EXPENSE_PAGE_SIZE: i64 = 200;

/// Maximum length of an expense or subscription title
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of a free-text note
pub const MAX_NOTE_LENGTH: usize = 2000;

/// Calendar date wire format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Year-month key format used by budgets and the dashboard
pub const MONTH_FORMAT: &str = "%Y-%m";

/// Budget usage above this share of the limit (in tenths) is flagged as a warning
pub const BUDGET_WARNING_TENTHS: i64 = 9;
