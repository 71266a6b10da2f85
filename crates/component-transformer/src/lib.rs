//! Reference translators for html components.
//!
//! - [`TemplateTranslator`] turns component markup into an ES module that
//!   builds the component's DOM.
//! - [`StrictModeTranslator`] is the final step: it adds a strict-mode
//!   prologue and normalizes whitespace.
//!
//! Both place mappings at JavaScript token starts, so their maps compose
//! without losing positions.
//!
//! # Example
//!
//! ```
//! use component_pipeline::{CompileOutcome, CompilePipeline};
//! use component_transformer::{StrictModeTranslator, TemplateTranslator};
//!
//! let pipeline = CompilePipeline::new(TemplateTranslator::new(), StrictModeTranslator::new());
//! let outcome = pipeline
//!     .compile("<p>{greeting}</p>", "ui/Hello.html", "Hello.html")
//!     .unwrap();
//!
//! if let CompileOutcome::Component { code, map } = outcome {
//!     assert!(code.starts_with("\"use strict\";\nexport default function Hello("));
//!     assert!(!map.is_empty());
//! }
//! ```

mod emitter;
mod strict;
mod template;
mod tokens;

pub use strict::{StrictModeTranslator, DEFAULT_BANNER};
pub use template::TemplateTranslator;
