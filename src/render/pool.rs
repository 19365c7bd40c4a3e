use glam::DVec2;

/// Reusable point buffers for frame building.
///
/// Buffers handed out by [`ScratchPool::acquire`] come back through
/// [`ScratchPool::release`] and are reused by later frames, so steady-state
/// rendering does not allocate.
#[derive(Debug, Default)]
pub struct ScratchPool {
    free: Vec<Vec<DVec2>>,
    outstanding: usize,
    allocations: usize,
}

impl ScratchPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a zeroed buffer of exactly `len` points.
    pub fn acquire(&mut self, len: usize) -> Vec<DVec2> {
        let mut buffer = self.free.pop().unwrap_or_else(|| {
            self.allocations += 1;
            Vec::with_capacity(len)
        });
        buffer.clear();
        buffer.resize(len, DVec2::ZERO);
        self.outstanding += 1;
        buffer
    }

    pub fn release(&mut self, buffer: Vec<DVec2>) {
        self.outstanding = self.outstanding.saturating_sub(1);
        self.free.push(buffer);
    }

    /// Buffers acquired and not yet released.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Buffers waiting for reuse.
    #[must_use]
    pub fn pooled(&self) -> usize {
        self.free.len()
    }

    /// Fresh buffers created over the pool's lifetime.
    #[must_use]
    pub fn allocations(&self) -> usize {
        self.allocations
    }
}

#[cfg(test)]
mod tests {
    use super::ScratchPool;

    #[test]
    fn released_buffers_are_reused() {
        let mut pool = ScratchPool::new();
        let first = pool.acquire(8);
        assert_eq!(first.len(), 8);
        assert_eq!(pool.outstanding(), 1);
        pool.release(first);

        let second = pool.acquire(3);
        assert_eq!(second.len(), 3);
        assert_eq!(pool.allocations(), 1);
        pool.release(second);
        assert_eq!(pool.outstanding(), 0);
        assert_eq!(pool.pooled(), 1);
    }
}
