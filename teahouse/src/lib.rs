pub mod animation;
pub mod character;
pub mod commands;
pub mod demo;
pub mod director;
pub mod draggable;
pub mod drop_zone;
pub mod dwell;
pub mod music;
pub mod script;
pub mod serde_secs;
pub mod services;
pub mod settings;
pub mod spoon_stir;
pub mod stage;
pub mod state;
