//! Domain services for the platform-config backend.
//!
//! Services contain business logic that operates on domain models.

pub mod audit;
pub mod events;
pub mod versioning;

pub use events::{EventPublisher, MockEventPublisher, PlatformEvent, TracingEventPublisher};

pub use versioning::compute_settings_version;
