//! Progress reporting module
//!
//! Shows the state of the inventory walk and the export on stderr.

mod reporter;

pub use reporter::*;
