//! Tests for the Secret Hitler XL game engine, organized by the part of the game they cover.

#![cfg(test)]
#![allow(clippy::bool_assert_comparison)]

pub mod board;
pub mod executive_powers;
pub mod game_state;
pub mod legislative;
