//! Collectible Spawning
//!
//! Keeps a fixed number of collectibles alive inside a fixed set of spawn
//! areas, never placing two in a row in the same area.
//!
//! - [`area`] - Spawn area volumes
//! - [`allocator`] - Available/occupied area bookkeeping
//! - [`spawner`] - Placement onto the ground and the pickup cycle

pub mod allocator;
pub mod area;
pub mod spawner;

pub use allocator::SpawnAllocator;
pub use area::SpawnArea;
pub use spawner::{CollectibleSpawner, SpawnOutcome, SpawnerSettings};
