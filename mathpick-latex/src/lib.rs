//! Rendering for the LaTeX produced by the math builder.
//!
//! [`split_mixed_content`] splits free text with inline `$...$` math into fragments, and
//! [`render_mixed`] turns such text into markup, rendering each LaTeX fragment as a MathML
//! `<math>` element. The [`parser`] understands the common subset of LaTeX math: groups, scripts,
//! fractions, roots, delimiters, fonts, spacing, and the usual symbol commands.
//!
//! Rendering never panics on malformed input. Parse errors carry spans and render as [`ariadne`]
//! reports through [`mathpick_error::Error`].

pub mod ast;
pub mod commands;
pub mod mathml;
pub mod mixed;
pub mod parser;
pub mod render;
pub mod tokenizer;

pub use mixed::{split_mixed_content, Fragment, FragmentKind};
pub use render::{render_latex, render_mixed, MathDisplay, Rendered, RenderOptions, RenderOptionsBuilder};
