pub mod errors;
pub mod platform;

pub use errors::PlayerError;
pub use platform::Platform;
