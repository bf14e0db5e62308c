//! Utility modules
//!
//! Pure helpers layered on top of the client; none of them touch the transport.

pub mod batch;
pub mod units;
pub mod validation;

pub use batch::{BatchFailure, BatchReport, process_in_chunks, run_sequential};
pub use units::{Measurement, Unit, inches_to_mm, mm_to_inches, to_points};
pub use validation::{
    is_valid_identifier, is_valid_measurement, is_valid_quantity, validate_product_dimensions,
    validate_stock,
};
