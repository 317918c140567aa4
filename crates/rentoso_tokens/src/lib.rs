//! # rentoso_tokens
//!
//! Placeholder rendering for Rentoso contract templates.
//!
//! Templates reference context values with `{{path.to.value}}` tokens.
//! Rendering substitutes each token in one left-to-right pass; tokens whose
//! path cannot be resolved are left as `[[path]]` markers so callers can warn
//! before a document is exported or sent.
//!
//! ## Example
//!
//! ```rust
//! use rentoso_tokens::{has_unresolved, render, scan_tokens, Context};
//! use serde_json::json;
//!
//! let template = "Hola {{prospecto.nombre}}, tu arriendo es {{propiedad.moneda}} {{propiedad.canon_mensual}}";
//! assert_eq!(scan_tokens(template).len(), 3);
//!
//! let ctx = Context::new()
//!     .with("prospecto", json!({ "nombre": "Juan" }))
//!     .with("propiedad", json!({}));
//!
//! let rendered = render(template, &ctx);
//! assert_eq!(
//!     rendered,
//!     "Hola Juan, tu arriendo es [[propiedad.moneda]] [[propiedad.canon_mensual]]"
//! );
//! assert!(has_unresolved(&rendered));
//! ```

pub mod checker;
pub mod context;
pub mod contract;
pub mod error;
pub mod renderer;
pub mod token;

pub use checker::{has_unresolved, highlight_unresolved, unresolved_paths, DEFAULT_HIGHLIGHT_CLASS};
pub use context::{resolve_path, stringify, Context};
pub use contract::{long_date_es, ContractContext, Propiedad, Prospecto, DEFAULT_COMPANY};
pub use error::{TokenError, TokenResult};
pub use renderer::{apply_overrides, parse_override, render, RenderReport, TokenRenderer};
pub use token::{scan_tokens, Token};
