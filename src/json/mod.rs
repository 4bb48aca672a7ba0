//! Purpose: JSON decoding boundary for HTTP response bodies.
//! Exports: `parse` module with the typed decode routine.
//! Role: Single seam for parser details so callsites avoid ad hoc decode logic.
//! Invariants: Response decoding goes through this module.

pub mod parse;
