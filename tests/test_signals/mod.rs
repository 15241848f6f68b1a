#![allow(dead_code)]

pub mod generate;

pub use generate::{DC_ALL_ZERO, decimate_words, deinterleave, random_words, steady_state_level};
