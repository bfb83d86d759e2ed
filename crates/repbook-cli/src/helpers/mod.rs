//! Shared helpers for command handlers.

pub mod parsing;

pub use parsing::{
    parse_date, parse_number, parse_position, parse_result_pairs, parse_when, today,
};
