//! Equipment availability accounting
//!
//! Everything in this module is a pure function of the equipment catalog and
//! job list it is handed. Nothing here performs I/O, holds state between
//! calls, or reports errors: unknown ids degrade to zero availability or a
//! no-op edit.

pub mod calculator;
pub mod gear;

pub use calculator::{Availability, Calculator, GearLine};
pub use gear::{
    add_reservation, normalize_gear, packing_summary, remove_reservation, set_quantity,
    toggle_packed, PackingStatus, PackingSummary,
};
