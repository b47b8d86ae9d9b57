//! HTTP route handlers, one module per entity family.
//!
//! Each handler follows the same shape: parse and validate parameters
//! (masks, cursor, page size), call the repository port with an explicit
//! office scope, and serialize the page. Legacy parameter aliases
//! (`cursor` for `page`; `pageSize`/`pagesize` for `page-size`) are
//! accepted here at the parsing boundary and nowhere else.

pub mod clobs;
pub mod levels;
pub mod locations;
pub mod offices;
pub mod ratings;
pub mod timeseries;
