//! Spawn Area Allocation
//!
//! Index bookkeeping over a fixed list of spawn areas. Every index is in
//! exactly one of `available` or `occupied`.

use rand::Rng;

/// Tracks which spawn areas are free to receive a collectible.
#[derive(Debug, Clone)]
pub struct SpawnAllocator {
    area_count: usize,
    available: Vec<usize>,
    occupied: Vec<usize>,
    last_spawned: Option<usize>,
}

impl SpawnAllocator {
    /// New allocator with every area available.
    pub fn new(area_count: usize) -> Self {
        let mut allocator = Self {
            area_count,
            available: Vec::with_capacity(area_count),
            occupied: Vec::with_capacity(area_count),
            last_spawned: None,
        };
        allocator.initialize();
        allocator
    }

    /// Mark every area available again.
    pub fn initialize(&mut self) {
        self.available.clear();
        self.occupied.clear();
        self.available.extend(0..self.area_count);
        log::info!("Initialized {} available areas", self.available.len());
        log::debug!("{}", self.status());
    }

    #[inline]
    pub fn area_count(&self) -> usize {
        self.area_count
    }

    pub fn available(&self) -> &[usize] {
        &self.available
    }

    pub fn occupied(&self) -> &[usize] {
        &self.occupied
    }

    pub fn last_spawned(&self) -> Option<usize> {
        self.last_spawned
    }

    pub fn is_available(&self, index: usize) -> bool {
        self.available.contains(&index)
    }

    /// Draw a random available index.
    ///
    /// Returns `None` when nothing is available, or when the draw repeats
    /// the last spawned area while other candidates exist. Callers treat a
    /// rejected draw as a spent attempt.
    pub fn candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.available.is_empty() {
            return None;
        }
        let index = self.available[rng.gen_range(0..self.available.len())];
        if Some(index) == self.last_spawned && self.available.len() > 1 {
            return None;
        }
        Some(index)
    }

    /// Move an area from available to occupied and remember it as the
    /// latest spawn.
    pub fn occupy(&mut self, index: usize) {
        let Some(slot) = self.available.iter().position(|&i| i == index) else {
            log::warn!("Area {index} is not available");
            return;
        };
        self.available.remove(slot);
        self.occupied.push(index);
        self.last_spawned = Some(index);
    }

    /// Return an area to the available set.
    pub fn release(&mut self, index: usize) {
        if index >= self.area_count {
            log::warn!("Area {index} out of range ({} areas)", self.area_count);
            return;
        }
        if !self.available.contains(&index) {
            self.available.push(index);
            log::debug!("Area {index} added back to available areas");
        }
        if let Some(slot) = self.occupied.iter().position(|&i| i == index) {
            self.occupied.remove(slot);
            log::debug!("Area {index} removed from occupied areas");
        }
    }

    /// One-line summary for logs.
    pub fn status(&self) -> String {
        let join = |v: &[usize]| {
            v.iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "Available areas: {}, Occupied areas: {}, Total: {}",
            join(&self.available),
            join(&self.occupied),
            self.area_count
        )
    }
}
