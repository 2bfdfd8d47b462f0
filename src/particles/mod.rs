pub mod field;
pub mod particle;

pub use field::ParticleField;
