pub mod error;
pub use error::GuardianError;

pub mod store;
pub use store::{DEFAULT_USER_ID, Guardian, GuardianStore};

pub mod file;
pub use file::FileGuardianStore;

pub mod memory;
pub use memory::MemoryGuardianStore;
