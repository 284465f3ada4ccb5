// Our Real scalar type:
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance used across the crate.
/// Defaults to `1e-9`, but can be overridden:
///  1) **Build-time**: set env var `GEODOME_TOLERANCE` (e.g. `GEODOME_TOLERANCE=1e-12 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    1e-9
}

/// Components smaller than this are snapped to exactly zero after
/// construction and re-projection, so axis-aligned anchor vertices compare
/// exactly.
pub const SNAP_TO_ZERO: Real = 1e-15;

/// Returns the current tolerance value.
/// If not set yet, it tries `GEODOME_TOLERANCE` (parsed as `Real`) and
/// falls back to the default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided, inherited by dependencies
        if let Some(environment_variable) = option_env!("GEODOME_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `geodome::float_types::set_tolerance(1e-12);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;

/// π/5, the half angle between neighbouring vertices of an icosahedron ring
pub const FRAC_PI_5: Real = PI / 5.0;

/// The full circle constant (τ)
pub const TAU: Real = core::f64::consts::TAU;

/// Snap a coordinate to zero if its magnitude is below [`SNAP_TO_ZERO`].
#[inline]
pub fn snap(value: Real) -> Real {
    if value.abs() < SNAP_TO_ZERO { 0.0 } else { value }
}
