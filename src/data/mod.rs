//! Distribution dataset types.
//!
//! | Type                | Source                                  |
//! |---------------------|-----------------------------------------|
//! | [`DistroRecord`]    | `api/linux_distros_full.json` entries   |
//! | [`BundledSnapshot`] | `js/distro-data.js` written at build    |

mod snapshot;
mod types;

pub use snapshot::BundledSnapshot;
pub use types::{Benchmarks, DistroId, DistroRecord, HardwareRequirements, HardwareSpec};
