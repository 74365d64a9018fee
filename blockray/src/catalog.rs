//! Geometry of particular block types, as data for the generic [models](crate::model).
//!
//! Each function here builds the model for one block type and state. Quad tables are
//! built the first time any model that needs them is requested, and are then shared by
//! every model built from them.

use core::fmt;

mod cross;
pub use cross::*;
mod fire;
pub use fire::*;
mod slab;
pub use slab::*;
mod torch;
pub use torch::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        type OnceCell<T> = std::sync::OnceLock<T>;
    } else {
        // OnceBox has extra boxing, so only use it if necessary
        type OnceCell<T> = once_cell::race::OnceBox<T>;
    }
}

/// A value computed on first use and kept for the rest of the process, for geometry
/// tables that would be wasteful to build more than once.
///
/// Without the `std` feature, two threads racing on first use may both build the value;
/// only one result is kept.
pub(crate) struct LazyTable<T> {
    name: &'static str,
    build: fn() -> T,
    cell: OnceCell<T>,
}

impl<T> LazyTable<T> {
    pub(crate) const fn new(name: &'static str, build: fn() -> T) -> Self {
        Self {
            name,
            build,
            cell: OnceCell::new(),
        }
    }

    pub(crate) fn get(&self) -> &T {
        let build = || {
            log::debug!("building {} geometry", self.name);
            (self.build)()
        };
        cfg_if::cfg_if! {
            if #[cfg(feature = "std")] {
                self.cell.get_or_init(build)
            } else {
                self.cell.get_or_init(|| alloc::boxed::Box::new(build()))
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LazyTable<T> {
    #[mutants::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyTable")
            .field("name", &self.name)
            .field("value", &self.cell.get())
            .finish()
    }
}

/// Logs a rejected block state before it is returned as an error.
fn reject<E: fmt::Display>(block: &'static str, error: E) -> E {
    log::warn!("cannot build {block} model: {error}");
    error
}
