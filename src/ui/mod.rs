pub mod pages;

pub use pages::player::{PlayerHandle, PlayerInput, PlayerOutput, PlayerView, mount};
