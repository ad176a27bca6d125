pub mod components;
pub mod spawn;
pub mod systems;
