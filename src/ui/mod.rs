//! User interface module - terminal summaries.
//!
//! - `formatter` - Pure line formatting and the printing functions built on it
//! - This module - Re-exports used by the binary

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_product_line_matrix, display_profile, display_record_warning,
    display_stats, display_status, display_success, display_timeline_summary,
};
