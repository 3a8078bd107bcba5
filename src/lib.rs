//! # cubesym
//!
//! Patches KiCad symbol libraries from STM32CubeMX pinout reports.
//!
//! The pipeline parses the bracketed s-expression library text into an
//! owned tree, locates the symbol record matching the reported MCU model,
//! rewrites the display name of every assigned pin in place, and
//! re-serializes the patched record as a standalone library:
//!
//! ```text
//! report text  --> report::PinoutReport      (model + pin assignments)
//! library text --> sexpr::parse             (tree under a `start` root)
//!              --> patch::symbol_by_prefix  (locate the record)
//!              --> patch::rewrite_pins      (mutate name fields in place)
//!              --> patch::build_library     (wrap version/generator/record)
//!              --> sexpr::serialize         (bracketed output text)
//! ```

pub mod digest;
pub mod patch;
pub mod report;
pub mod sexpr;
