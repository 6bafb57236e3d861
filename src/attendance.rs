pub mod core;
pub mod execute_effect;
pub mod main;
pub mod render;
