pub mod database;
pub mod editor;
pub mod mojang;
pub mod rcon;
pub mod review;
pub mod sync;
