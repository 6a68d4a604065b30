//! Type-safe, efficient handles for catalogue entities.
//!
//! All handles are plain `u32` indices into the owning arena. They stay
//! valid for the lifetime of the store that issued them and are the only
//! way other components refer to stops and buses; no map is ever keyed by
//! address or by name internally.

use std::fmt;

macro_rules! impl_handle {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            pub(crate) fn new(index: usize) -> Self {
                Self(index as u32)
            }

            pub(crate) fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

impl_handle!(StopId);
impl_handle!(BusId);
