pub mod events;
pub mod metrics;

pub use metrics::init_prometheus;
