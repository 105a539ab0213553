use crate::modules::matching::domain::value_objects::AnchorDate;

/// Absolute number of whole calendar days between two dates.
///
/// Symmetric, and zero for equal dates. Saturates at `u32::MAX`, which is
/// beyond any distance chrono can represent anyway.
pub fn day_difference(a: AnchorDate, b: AnchorDate) -> u32 {
    let days = a
        .as_naive()
        .signed_duration_since(b.as_naive())
        .num_days()
        .unsigned_abs();
    u32::try_from(days).unwrap_or(u32::MAX)
}
