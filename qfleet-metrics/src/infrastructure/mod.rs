//! Data generators

pub mod connectivity;
pub mod random;
pub mod synthetic;

pub use connectivity::ConnectivityGenerator;
pub use synthetic::SyntheticFleetGenerator;
