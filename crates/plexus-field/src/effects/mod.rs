mod burst;
mod trail;

pub use burst::{BURST_PALETTE, Burst, Bursts, DEFAULT_SPARKS, Spark};
pub use trail::{CursorTrail, MAX_TRAIL, TrailPoint};
