//! Core utilities shared by the generator modules

pub mod clock;
