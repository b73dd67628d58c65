//! Main module for dustpan library functionality

pub mod ast;
pub mod columns;
pub mod dates;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
