//! Canonical controller report model.
//!
//! Every vendor parser produces a [`CanonicalReport`]: a button bitmask in
//! the vendor-neutral [`Button`] namespace plus four signed stick axes in the
//! range `[-AXIS_MAX, AXIS_MAX]`. The remapper turns it into a
//! [`TargetReport`], the same shape in the [`TargetButton`] namespace of the
//! emulated controller. Both are [`Report`] instantiations, so a source report
//! can never be handed to the target encoder by mistake.
//!
//! Positive Y means "stick pushed up" in both namespaces.

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod axis;
pub mod buttons;
pub mod identity;
pub mod report;
pub mod status;

pub use axis::{AXIS_MAX, Axis, CANON_RANGE, StickDirection, clamp_axis, rescale, rescale_bits};
pub use buttons::{Button, ButtonId, DPAD_RELEASED, TargetButton, hat_buttons};
pub use identity::{BdAddr, DeviceKind, Family, ParseBdAddrError};
pub use report::{CanonicalReport, Report, TargetReport};
pub use status::{BATTERY_LEVEL_MAX, rescale_battery};
