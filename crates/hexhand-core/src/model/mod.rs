pub mod harbor;
pub mod piece;
pub mod production;
pub mod resource;
pub mod vector;
