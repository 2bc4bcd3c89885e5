pub mod cycle;
pub mod random;

pub use cycle::CycleGenerator;
pub use random::RandomGenerator;

use burrow_core::ShortCode;

/// Trait for generating candidate short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// A candidate may collide with an existing code; the registry retries
/// until it finds an unused one.
pub trait Generator: Send + Sync + 'static {
    /// Produces the next candidate short code.
    fn generate(&self) -> ShortCode;
}
