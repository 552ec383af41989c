//! Lexical scanner for Lox source text.
//!
//! `scan` turns a whole source string into a `Vec<Token>` ending in a single
//! `EndOfFile` token. Lexical errors never stop the scan: each one goes to the
//! caller's `Reporter` and scanning resumes at the next character.

pub mod error;
pub mod scanner;
pub mod token;

pub use crate::{
    error::{Diagnostics, Error, ErrorKind, Reporter, Result},
    scanner::{scan, Scanner},
    token::{Literal, Token, TokenKind},
};
