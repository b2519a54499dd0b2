//! # uptime-report
//!
//! Renders validator scores for humans and spreadsheets.
//!
//! ```text
//! Vec<ValidatorScore> ──┬──→ write_table  (stdout, fixed-width)
//!                       └──→ write_csv    (result.csv)
//! ```
//!
//! Both outputs share column order and number formatting: counts and
//! integer points as plain integers, uptime and total points with six
//! fractional digits. A validator with no operator address is listed by
//! its consensus address suffixed with ` (Hex Address)`.

pub mod csv_export;
pub mod error;
pub mod row;
pub mod table;

pub use csv_export::{write_csv, DEFAULT_CSV_PATH};
pub use error::{ReportError, ReportResult};
pub use row::{row_cells, CSV_HEADER, TABLE_HEADER};
pub use table::write_table;
