//! The quick-insert symbol palette of the picker.

use std::{fmt, str::FromStr};

/// The group a symbol is listed under in the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolCategory {
    Greek,
    Operators,
    Relations,
    Arrows,
    Misc,
}

impl SymbolCategory {
    /// Every category, in palette order.
    pub const ALL: [SymbolCategory; 5] = [
        SymbolCategory::Greek,
        SymbolCategory::Operators,
        SymbolCategory::Relations,
        SymbolCategory::Arrows,
        SymbolCategory::Misc,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Greek => "greek",
            Self::Operators => "operators",
            Self::Relations => "relations",
            Self::Arrows => "arrows",
            Self::Misc => "misc",
        }
    }
}

impl fmt::Display for SymbolCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SymbolCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// A symbol that can be inserted with a single click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    /// Short name used to look the symbol up, e.g. `pi`.
    pub name: &'static str,

    /// The LaTeX source inserted for the symbol, e.g. `\pi`.
    pub latex: &'static str,

    pub category: SymbolCategory,
}

const fn symbol(name: &'static str, latex: &'static str, category: SymbolCategory) -> Symbol {
    Symbol { name, latex, category }
}

use SymbolCategory::*;

/// The palette, grouped by category.
pub const PALETTE: &[Symbol] = &[
    symbol("alpha", "\\alpha", Greek),
    symbol("beta", "\\beta", Greek),
    symbol("gamma", "\\gamma", Greek),
    symbol("delta", "\\delta", Greek),
    symbol("epsilon", "\\epsilon", Greek),
    symbol("theta", "\\theta", Greek),
    symbol("lambda", "\\lambda", Greek),
    symbol("mu", "\\mu", Greek),
    symbol("pi", "\\pi", Greek),
    symbol("sigma", "\\sigma", Greek),
    symbol("phi", "\\phi", Greek),
    symbol("omega", "\\omega", Greek),
    symbol("Delta", "\\Delta", Greek),
    symbol("Sigma", "\\Sigma", Greek),
    symbol("Omega", "\\Omega", Greek),
    symbol("plus", "+", Operators),
    symbol("minus", "-", Operators),
    symbol("pm", "\\pm", Operators),
    symbol("times", "\\times", Operators),
    symbol("div", "\\div", Operators),
    symbol("cdot", "\\cdot", Operators),
    symbol("eq", "=", Relations),
    symbol("neq", "\\neq", Relations),
    symbol("lt", "<", Relations),
    symbol("gt", ">", Relations),
    symbol("le", "\\le", Relations),
    symbol("ge", "\\ge", Relations),
    symbol("approx", "\\approx", Relations),
    symbol("equiv", "\\equiv", Relations),
    symbol("to", "\\to", Arrows),
    symbol("leftarrow", "\\leftarrow", Arrows),
    symbol("Rightarrow", "\\Rightarrow", Arrows),
    symbol("Leftrightarrow", "\\Leftrightarrow", Arrows),
    symbol("infty", "\\infty", Misc),
    symbol("partial", "\\partial", Misc),
    symbol("nabla", "\\nabla", Misc),
    symbol("degree", "^{\\circ}", Misc),
    symbol("int", "\\int", Misc),
];

/// Finds a symbol by its exact name. Names are case-sensitive, since `delta` and `Delta` are
/// different symbols.
pub fn lookup(name: &str) -> Option<&'static Symbol> {
    PALETTE.iter().find(|symbol| symbol.name == name)
}

/// Returns the symbols of one category, in palette order.
pub fn in_category(category: SymbolCategory) -> impl Iterator<Item = &'static Symbol> {
    PALETTE.iter().filter(move |symbol| symbol.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(lookup("delta").map(|s| s.latex), Some("\\delta"));
        assert_eq!(lookup("Delta").map(|s| s.latex), Some("\\Delta"));
        assert_eq!(lookup("aleph"), None);
    }

    #[test]
    fn categories_cover_palette() {
        let total = SymbolCategory::ALL.into_iter().map(|c| in_category(c).count()).sum::<usize>();
        assert_eq!(total, PALETTE.len());
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in PALETTE.iter().enumerate() {
            assert!(PALETTE[i + 1..].iter().all(|b| b.name != a.name), "duplicate `{}`", a.name);
        }
    }
}
