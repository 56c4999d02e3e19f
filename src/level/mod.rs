mod level_envelope;
mod level_meters;

pub use level_envelope::LevelEnvelope;
pub use level_meters::LevelMeters;
