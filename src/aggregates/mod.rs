//! Pure aggregation over rows fetched per request.

pub mod export;
pub mod history;
pub mod ledger;
pub mod recent;
pub mod seats;

pub use export::{format_cents, ledger_to_csv};
pub use history::{history_item, history_page, history_stats, paid_history};
pub use ledger::{merge_entries, monthly_buckets, period_totals, year_range};
pub use recent::top_recent;
pub use seats::{UNLIMITED_SEATS, next_waitlist_position, occupied_seats, seat_availability};
