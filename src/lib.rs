#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod character_sets;
mod checkers;
mod error;
mod helpers;
mod ipv4;
mod ipv6;
mod parser;
mod scheme;
mod unicode;
mod url;
mod url_record;
mod url_search_params;

// Legacy Node.js url-module helpers (std only: platform paths)
#[cfg(feature = "std")]
pub mod node_compat;

// Public API
pub use error::{ParseError, Result};
pub use scheme::SchemeType;
pub use url::{SearchParamsMut, Url};
pub use url_search_params::UrlSearchParams;
