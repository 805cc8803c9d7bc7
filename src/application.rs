//! Application layer - pipeline orchestration and caller-facing contracts

pub mod live_details;

pub use live_details::{LiveDetailError, LiveDetailRequest, LiveDetailResponse, LiveDetailService};
