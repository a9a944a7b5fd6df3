//! Configuration and constants for the pipeline.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Columns every input table must carry (case-sensitive names)
pub const REQUIRED_COLUMNS: &[&str] = &[
    "customer_no",
    "campaign_year",
    "campaign_series",
    "plan_close_dt",
    "order_dt",
    "previous_step_at_closure",
    "days_to_plan_close",
];

// Lifecycle-stage labels and the ordinal contact count each one carries.
// Exact-match lookup; any label not listed here counts as zero touches.
pub const CONTACT_STAGES: &[(&str, u8)] = &[
    ("TKT - To start", 0),
    ("TKT - 1st contact complete", 1),
    ("TKT - 2nd contact complete", 2),
    ("TKT - 3rd contact complete", 3),
    ("TKT - 4th contact complete", 4),
    ("TKT - 5th contact complete", 5),
];

/// Highest contact count the stage table can produce
pub const MAX_CONTACT_COUNT: u8 = 5;

// Accepted timestamp layouts for close/order dates, tried in order
// (different export tools emit different formats).
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Accepted date-only layouts, tried after the timestamp layouts
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

// Reference year for the calendar-alignment overlay. 2020 is a leap year,
// so every month/day combination (including Feb 29) projects onto a valid
// date.
pub const ALIGNMENT_YEAR: i32 = 2020;
