//! Identity fast path shared by every capability's `transcode`.

use std::any::{Any, TypeId};

/// Returns a copy of `source` as `T` when both are the same concrete type.
///
/// `None` means the caller must fall back to the target's "build from other"
/// constructor. The check is an explicit `TypeId` comparison; it only saves a
/// reconstruction and never changes the resulting value.
pub fn same_type<S, T>(source: &S) -> Option<T>
where
    S: Any,
    T: Any + Clone,
{
    if TypeId::of::<S>() != TypeId::of::<T>() {
        return None;
    }
    (source as &dyn Any).downcast_ref::<T>().cloned()
}
