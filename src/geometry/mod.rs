pub mod hit_testing;

pub use hit_testing::{HitTolerance, hit_test};
