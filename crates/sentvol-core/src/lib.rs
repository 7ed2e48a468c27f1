pub mod context;
pub mod kernel;
pub mod likelihood;
pub mod noise;
pub mod params;
pub mod sentiment;
pub mod simulate;
pub mod stats;

pub use params::JointParams;
pub use noise::{NoiseGenerator, NormalSource, ReplaySource};
pub use simulate::simulate_joint_process;
pub use context::{DegeneracyPolicy, SimContext};
pub use likelihood::simulated_neg_log_likelihood;
pub use sentiment::interpolate_sentiment;
