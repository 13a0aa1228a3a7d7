//! # Binding Module
//!
//! URL-template handling for HTTP-annotated RPC methods. A template such as
//! `/v1/user/{userid}/home` is parsed once into a [`PathIndex`] (placeholder
//! name → segment position). The index drives two things:
//!
//! - **Extraction**: reading placeholder values out of a concrete request path
//!   ([`extract`], [`extract_all`]).
//! - **Routing**: computing the static leading segment run of a template
//!   ([`base_path`]) so a transport can register one fixed route per binding and
//!   recover the dynamic tail at request time.
//!
//! The module is public because generated transport code calls these
//! functions when decoding requests.
//!
//! ## Example
//!
//! ```rust
//! use svcgen::binding::{base_path, extract, extract_all};
//!
//! let params = extract_all("/v1/sum/3/4", "/v1/sum/{a}/{b}").unwrap();
//! assert_eq!(params["a"], "3");
//! assert_eq!(params["b"], "4");
//! assert_eq!(extract("/1234", "/{a}", "a").unwrap(), "1234");
//! assert_eq!(base_path("/v1/sum/{a}/{b}"), "/v1/sum");
//! ```
//!
//! ## Limitations
//!
//! Only single-segment `{field}` placeholders are understood. Wildcards,
//! `{field=sub/*}` captures and `**` catch-alls are not. Repeated query
//! parameters are flattened to their first value (see [`query_params`]).

mod extract;
mod path_index;
mod query;

pub use extract::{base_path, extract, extract_all};
pub use path_index::PathIndex;
pub use query::{parse_query, query_params};
