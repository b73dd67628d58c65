//! # dustpan
//!
//! Reads plain-text notes made of `@name:` sections, interprets selected
//! sections as numbers, dates, deadlines or dated logs, and orders the notes
//! by any combination of those columns.
//!
//! The grammar lives in [`dustpan::parsing`], the typed interpretation and
//! ordering in [`dustpan::columns`], and a configured end-to-end run in
//! [`dustpan::pipeline`].

pub mod dustpan;
