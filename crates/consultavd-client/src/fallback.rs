//! Failure policy for cascade lookups.

use std::fmt::Display;

use consultavd_core::Slot;

/// Replaces a failed lookup with the slot's empty value.
///
/// A failing carrier or circuit lookup leaves the upstream selection in
/// place and shows an empty list; the failure is only logged. Errors never
/// cross from one slot to another.
pub fn degrade_to_empty<T, E>(slot: Slot, result: Result<T, E>) -> T
where
    T: Default,
    E: Display,
{
    result.unwrap_or_else(|error| {
        tracing::warn!(slot = %slot, error = %error, "lookup failed; showing empty result");
        T::default()
    })
}
