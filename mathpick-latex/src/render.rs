//! Rendering LaTeX and mixed content to MathML markup.

use crate::{
    mathml::{Escaped, MathMl},
    mixed::{split_mixed_content, FragmentKind},
    parser::parse,
};
use log::warn;
use mathpick_error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether math is set inline with text or as a separate block.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub enum MathDisplay {
    /// Math that flows with the surrounding text. Limits of large operators are set as scripts.
    ///
    /// This is the default option.
    #[default]
    Inline,

    /// Math on its own line. Limits of operators like `\sum` are set above and below them.
    Block,
}

impl MathDisplay {
    /// The value of the `display` attribute of the `<math>` element.
    pub fn attribute(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Block => "block",
        }
    }
}

/// Options to configure rendering. To create a [`RenderOptions`], use the [`Default`]
/// implementation or [`RenderOptionsBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct RenderOptions {
    /// How math elements are displayed.
    ///
    /// The default value is [`MathDisplay::Inline`].
    pub display: MathDisplay,

    /// Whether the text fragments of mixed content are XML-escaped. Disable this for hosts that
    /// treat mixed content as trusted markup.
    ///
    /// The default value is `true`.
    pub escape_text: bool,

    /// Whether each `<math>` element carries its LaTeX source as an
    /// `<annotation encoding="application/x-tex">`.
    ///
    /// The default value is `false`.
    pub annotate: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            display: MathDisplay::Inline,
            escape_text: true,
            annotate: false,
        }
    }
}

impl RenderOptions {
    /// Wraps the given [`RenderOptions`] into a builder for further customization.
    pub fn into_builder(self) -> RenderOptionsBuilder {
        RenderOptionsBuilder(self)
    }
}

/// Helper struct to build a [`RenderOptions`] struct.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptionsBuilder(RenderOptions);

impl RenderOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display mode. See [`MathDisplay`] for more information.
    pub fn display(mut self, display: MathDisplay) -> Self {
        self.0.display = display;
        self
    }

    /// Sets whether text fragments are XML-escaped.
    pub fn escape_text(mut self, escape_text: bool) -> Self {
        self.0.escape_text = escape_text;
        self
    }

    /// Sets whether `<math>` elements carry their LaTeX source.
    pub fn annotate(mut self, annotate: bool) -> Self {
        self.0.annotate = annotate;
        self
    }

    /// Builds the [`RenderOptions`] struct.
    pub fn build(self) -> RenderOptions {
        self.0
    }
}

/// Renders LaTeX math source into a `<math>` element.
///
/// ```
/// use mathpick_latex::{render_latex, RenderOptions};
///
/// let html = render_latex("x^2", &RenderOptions::default()).unwrap();
/// assert_eq!(html, "<math display=\"inline\"><msup><mi>x</mi><mn>2</mn></msup></math>");
/// ```
pub fn render_latex(source: &str, options: &RenderOptions) -> Result<String, Error> {
    let node = parse(source)?;
    let body = node.as_mathml(options.display);
    let display = options.display.attribute();

    Ok(if options.annotate {
        format!(
            "<math display=\"{}\"><semantics>{}<annotation encoding=\"application/x-tex\">{}</annotation></semantics></math>",
            display,
            body,
            Escaped(source),
        )
    } else {
        format!("<math display=\"{}\">{}</math>", display, body)
    })
}

/// The output of [`render_mixed`].
#[derive(Debug)]
pub struct Rendered {
    /// The rendered markup.
    pub html: String,

    /// The errors of LaTeX fragments that could not be rendered, in order. Their spans are byte
    /// ranges into the whole mixed-content string.
    pub failures: Vec<Error>,
}

impl Rendered {
    /// Returns true if every LaTeX fragment was rendered.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Renders free text with inline `$...$` LaTeX.
///
/// Text fragments are copied (escaped, unless disabled in `options`), and LaTeX fragments are
/// rendered with [`render_latex`]. A LaTeX fragment that fails to render is shown as its original
/// `$...$` text instead, and its error is recorded in [`Rendered::failures`]. This never fails.
pub fn render_mixed(text: &str, options: &RenderOptions) -> Rendered {
    let mut html = String::with_capacity(text.len());
    let mut failures = Vec::new();

    for fragment in split_mixed_content(text) {
        let literal = match fragment.kind {
            FragmentKind::Text => fragment.content,
            FragmentKind::Latex => match render_latex(fragment.content, options) {
                Ok(math) => {
                    html.push_str(&math);
                    continue;
                },
                Err(err) => {
                    warn!("showing LaTeX fragment at {:?} as text: it could not be rendered", fragment.span);
                    failures.push(err.offset(fragment.span.start + 1));
                    &text[fragment.span]
                },
            },
        };

        if options.escape_text {
            html.push_str(&Escaped(literal).to_string());
        } else {
            html.push_str(literal);
        }
    }

    Rendered { html, failures }
}
