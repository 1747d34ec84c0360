//! Chart Slot Module
//! Holds the one chart instance mounted in the viewer. A new instance is only
//! built after the previous one has been disposed.

use super::config::{ChartConfig, DisplayMode};
use crate::data::Observation;
use std::cell::Cell;
use std::rc::Rc;

/// Registers an instance as mounted for as long as it lives.
#[derive(Debug)]
struct MountGuard {
    mounted: Rc<Cell<usize>>,
}

impl MountGuard {
    fn acquire(mounted: &Rc<Cell<usize>>) -> Self {
        mounted.set(mounted.get() + 1);
        Self {
            mounted: Rc::clone(mounted),
        }
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        self.mounted.set(self.mounted.get().saturating_sub(1));
    }
}

/// A rendered chart. Dropping it unmounts it.
#[derive(Debug)]
pub struct ChartInstance {
    pub config: ChartConfig,
    generation: u64,
    _guard: MountGuard,
}

impl ChartInstance {
    /// Render counter, also used to give each instance a fresh plot id.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn mode(&self) -> DisplayMode {
        self.config.mode
    }

    /// Release the instance explicitly.
    pub fn dispose(self) {
        tracing::trace!(generation = self.generation, "chart disposed");
    }
}

#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<ChartInstance>,
    mounted: Rc<Cell<usize>>,
    generation: u64,
}

impl ChartSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the mounted chart with one built from `mode` and `records`.
    pub fn render(&mut self, mode: DisplayMode, records: &[Observation]) -> &ChartInstance {
        if let Some(previous) = self.current.take() {
            previous.dispose();
        }
        debug_assert_eq!(self.mounted.get(), 0, "previous chart still mounted");

        self.generation += 1;
        let config = ChartConfig::build(mode, records);
        tracing::debug!(
            mode = %mode,
            points = config.dataset.values.len(),
            generation = self.generation,
            "chart rendered"
        );

        self.current.insert(ChartInstance {
            config,
            generation: self.generation,
            _guard: MountGuard::acquire(&self.mounted),
        })
    }

    pub fn current(&self) -> Option<&ChartInstance> {
        self.current.as_ref()
    }

    /// Number of live instances created by this slot (0 or 1).
    pub fn mounted_count(&self) -> usize {
        self.mounted.get()
    }

    pub fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            previous.dispose();
        }
    }
}
