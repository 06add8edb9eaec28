//! Background job scheduler and job implementations.

mod audit_retention;
mod pool_metrics;
mod scheduler;

pub use audit_retention::AuditRetentionJob;
pub use pool_metrics::PoolMetricsJob;
pub use scheduler::JobScheduler;
