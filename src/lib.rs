pub mod config;
pub mod endpoint;
pub mod error;
pub mod logging;
pub mod notifications;
pub mod preference;
pub mod reconcile;
pub mod service;
pub mod system;

pub use config::Config;
pub use reconcile::ReconcileOutcome;
pub use service::ReconcilerService;
