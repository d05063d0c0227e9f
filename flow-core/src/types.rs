/// Identifier for a slot in a [`crate::field::ParticleField`] pool.
///
/// This is an index into `ParticleField::particles`. Slots are stable for
/// the lifetime of the pool; respawning a particle reuses its slot rather
/// than removing it.
pub type ParticleId = usize;
