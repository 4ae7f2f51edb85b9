pub mod commands;
pub mod roster;
pub mod state;
