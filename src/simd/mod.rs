pub mod kernels;
pub mod lane;
pub mod platform;
pub mod traits;

pub use kernels::{LaneKernels, LaneOp, ScalarKernel};
pub use lane::{flatten, pad_count, partition, Lane, LaneWidth, MAX_LANE_WIDTH};
pub use platform::Isa;
pub use traits::Element;
