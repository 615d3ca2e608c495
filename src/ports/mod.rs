//! Ports (trait boundaries) for external dependencies.
//!
//! These traits define the interfaces between the decision-making core and
//! its collaborators. Following hexagonal architecture, the traits are
//! owned by the domain and implemented by adapters in the infrastructure
//! layer.

pub mod agent;
pub mod observer;
pub mod repository;
pub mod trainer;

pub use agent::Agent;
pub use observer::Observer;
pub use repository::PolicyRepository;
pub use trainer::Trainer;
