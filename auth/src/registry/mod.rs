pub mod errors;
pub mod models;
pub mod store;

pub use errors::RegistryError;
pub use models::User;
pub use store::UserRegistry;
