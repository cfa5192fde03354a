//! Lookup tables for the control words the parser understands.

use crate::ast::{FracStyle, Variant};
use phf::{phf_map, phf_set};

/// What a control word does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// An italic identifier, like lowercase Greek letters.
    Ident(&'static str),

    /// An upright identifier, like uppercase Greek letters and function names.
    Upright(&'static str),

    Operator(&'static str),

    LargeOperator {
        symbol: &'static str,
        limits: bool,
    },

    /// Horizontal space of the given width.
    Space(&'static str),

    Frac(FracStyle),
    Binom,
    Sqrt,

    /// Upright text, taken verbatim from the following group.
    Text,

    Style(Variant),
    Accent(&'static str),
    Left,
    Right,
}

static COMMANDS: phf::Map<&'static str, Command> = phf_map! {
    // lowercase Greek
    "alpha" => Command::Ident("α"),
    "beta" => Command::Ident("β"),
    "gamma" => Command::Ident("γ"),
    "delta" => Command::Ident("δ"),
    "epsilon" => Command::Ident("ϵ"),
    "varepsilon" => Command::Ident("ε"),
    "zeta" => Command::Ident("ζ"),
    "eta" => Command::Ident("η"),
    "theta" => Command::Ident("θ"),
    "vartheta" => Command::Ident("ϑ"),
    "iota" => Command::Ident("ι"),
    "kappa" => Command::Ident("κ"),
    "lambda" => Command::Ident("λ"),
    "mu" => Command::Ident("μ"),
    "nu" => Command::Ident("ν"),
    "xi" => Command::Ident("ξ"),
    "pi" => Command::Ident("π"),
    "varpi" => Command::Ident("ϖ"),
    "rho" => Command::Ident("ρ"),
    "varrho" => Command::Ident("ϱ"),
    "sigma" => Command::Ident("σ"),
    "varsigma" => Command::Ident("ς"),
    "tau" => Command::Ident("τ"),
    "upsilon" => Command::Ident("υ"),
    "phi" => Command::Ident("ϕ"),
    "varphi" => Command::Ident("φ"),
    "chi" => Command::Ident("χ"),
    "psi" => Command::Ident("ψ"),
    "omega" => Command::Ident("ω"),

    // uppercase Greek
    "Gamma" => Command::Upright("Γ"),
    "Delta" => Command::Upright("Δ"),
    "Theta" => Command::Upright("Θ"),
    "Lambda" => Command::Upright("Λ"),
    "Xi" => Command::Upright("Ξ"),
    "Pi" => Command::Upright("Π"),
    "Sigma" => Command::Upright("Σ"),
    "Upsilon" => Command::Upright("Υ"),
    "Phi" => Command::Upright("Φ"),
    "Psi" => Command::Upright("Ψ"),
    "Omega" => Command::Upright("Ω"),

    // other letter-like symbols
    "infty" => Command::Ident("∞"),
    "partial" => Command::Ident("∂"),
    "nabla" => Command::Upright("∇"),
    "emptyset" => Command::Upright("∅"),
    "hbar" => Command::Ident("ℏ"),
    "ell" => Command::Ident("ℓ"),
    "aleph" => Command::Upright("ℵ"),
    "Re" => Command::Upright("ℜ"),
    "Im" => Command::Upright("ℑ"),

    // binary operators
    "pm" => Command::Operator("±"),
    "mp" => Command::Operator("∓"),
    "times" => Command::Operator("×"),
    "div" => Command::Operator("÷"),
    "cdot" => Command::Operator("⋅"),
    "ast" => Command::Operator("∗"),
    "star" => Command::Operator("⋆"),
    "circ" => Command::Operator("∘"),
    "bullet" => Command::Operator("∙"),
    "cap" => Command::Operator("∩"),
    "cup" => Command::Operator("∪"),
    "setminus" => Command::Operator("∖"),
    "oplus" => Command::Operator("⊕"),
    "otimes" => Command::Operator("⊗"),
    "wedge" => Command::Operator("∧"),
    "land" => Command::Operator("∧"),
    "vee" => Command::Operator("∨"),
    "lor" => Command::Operator("∨"),
    "neg" => Command::Operator("¬"),
    "lnot" => Command::Operator("¬"),
    "forall" => Command::Operator("∀"),
    "exists" => Command::Operator("∃"),
    "angle" => Command::Operator("∠"),
    "prime" => Command::Operator("′"),
    "ldots" => Command::Operator("…"),
    "cdots" => Command::Operator("⋯"),
    "vdots" => Command::Operator("⋮"),
    "ddots" => Command::Operator("⋱"),

    // relations
    "le" => Command::Operator("≤"),
    "leq" => Command::Operator("≤"),
    "ge" => Command::Operator("≥"),
    "geq" => Command::Operator("≥"),
    "ne" => Command::Operator("≠"),
    "neq" => Command::Operator("≠"),
    "approx" => Command::Operator("≈"),
    "equiv" => Command::Operator("≡"),
    "sim" => Command::Operator("∼"),
    "simeq" => Command::Operator("≃"),
    "cong" => Command::Operator("≅"),
    "propto" => Command::Operator("∝"),
    "ll" => Command::Operator("≪"),
    "gg" => Command::Operator("≫"),
    "in" => Command::Operator("∈"),
    "notin" => Command::Operator("∉"),
    "ni" => Command::Operator("∋"),
    "subset" => Command::Operator("⊂"),
    "supset" => Command::Operator("⊃"),
    "subseteq" => Command::Operator("⊆"),
    "supseteq" => Command::Operator("⊇"),
    "mid" => Command::Operator("∣"),
    "parallel" => Command::Operator("∥"),
    "perp" => Command::Operator("⊥"),

    // arrows
    "to" => Command::Operator("→"),
    "rightarrow" => Command::Operator("→"),
    "leftarrow" => Command::Operator("←"),
    "gets" => Command::Operator("←"),
    "leftrightarrow" => Command::Operator("↔"),
    "Rightarrow" => Command::Operator("⇒"),
    "Leftarrow" => Command::Operator("⇐"),
    "Leftrightarrow" => Command::Operator("⇔"),
    "implies" => Command::Operator("⟹"),
    "iff" => Command::Operator("⟺"),
    "mapsto" => Command::Operator("↦"),
    "uparrow" => Command::Operator("↑"),
    "downarrow" => Command::Operator("↓"),

    // delimiters
    "langle" => Command::Operator("⟨"),
    "rangle" => Command::Operator("⟩"),
    "lbrace" => Command::Operator("{"),
    "rbrace" => Command::Operator("}"),
    "vert" => Command::Operator("|"),
    "lvert" => Command::Operator("|"),
    "rvert" => Command::Operator("|"),
    "Vert" => Command::Operator("‖"),
    "lVert" => Command::Operator("‖"),
    "rVert" => Command::Operator("‖"),
    "lfloor" => Command::Operator("⌊"),
    "rfloor" => Command::Operator("⌋"),
    "lceil" => Command::Operator("⌈"),
    "rceil" => Command::Operator("⌉"),

    // function names
    "sin" => Command::Upright("sin"),
    "cos" => Command::Upright("cos"),
    "tan" => Command::Upright("tan"),
    "cot" => Command::Upright("cot"),
    "sec" => Command::Upright("sec"),
    "csc" => Command::Upright("csc"),
    "arcsin" => Command::Upright("arcsin"),
    "arccos" => Command::Upright("arccos"),
    "arctan" => Command::Upright("arctan"),
    "sinh" => Command::Upright("sinh"),
    "cosh" => Command::Upright("cosh"),
    "tanh" => Command::Upright("tanh"),
    "log" => Command::Upright("log"),
    "ln" => Command::Upright("ln"),
    "lg" => Command::Upright("lg"),
    "exp" => Command::Upright("exp"),
    "det" => Command::Upright("det"),
    "dim" => Command::Upright("dim"),
    "ker" => Command::Upright("ker"),
    "deg" => Command::Upright("deg"),
    "arg" => Command::Upright("arg"),
    "gcd" => Command::Upright("gcd"),
    "Pr" => Command::Upright("Pr"),

    // large operators
    "sum" => Command::LargeOperator { symbol: "∑", limits: true },
    "prod" => Command::LargeOperator { symbol: "∏", limits: true },
    "coprod" => Command::LargeOperator { symbol: "∐", limits: true },
    "bigcup" => Command::LargeOperator { symbol: "⋃", limits: true },
    "bigcap" => Command::LargeOperator { symbol: "⋂", limits: true },
    "bigoplus" => Command::LargeOperator { symbol: "⨁", limits: true },
    "bigotimes" => Command::LargeOperator { symbol: "⨂", limits: true },
    "int" => Command::LargeOperator { symbol: "∫", limits: false },
    "iint" => Command::LargeOperator { symbol: "∬", limits: false },
    "iiint" => Command::LargeOperator { symbol: "∭", limits: false },
    "oint" => Command::LargeOperator { symbol: "∮", limits: false },
    "lim" => Command::LargeOperator { symbol: "lim", limits: true },
    "max" => Command::LargeOperator { symbol: "max", limits: true },
    "min" => Command::LargeOperator { symbol: "min", limits: true },
    "sup" => Command::LargeOperator { symbol: "sup", limits: true },
    "inf" => Command::LargeOperator { symbol: "inf", limits: true },

    // spacing
    "quad" => Command::Space("1em"),
    "qquad" => Command::Space("2em"),
    "enspace" => Command::Space("0.5em"),
    "thinspace" => Command::Space("0.1667em"),

    // structures
    "frac" => Command::Frac(FracStyle::Inherit),
    "dfrac" => Command::Frac(FracStyle::Display),
    "tfrac" => Command::Frac(FracStyle::Text),
    "binom" => Command::Binom,
    "sqrt" => Command::Sqrt,
    "text" => Command::Text,
    "textrm" => Command::Text,
    "mbox" => Command::Text,
    "mathrm" => Command::Style(Variant::Normal),
    "mathbf" => Command::Style(Variant::Bold),
    "mathit" => Command::Style(Variant::Italic),
    "mathbb" => Command::Style(Variant::DoubleStruck),
    "mathcal" => Command::Style(Variant::Script),
    "mathsf" => Command::Style(Variant::SansSerif),
    "mathtt" => Command::Style(Variant::Monospace),
    "hat" => Command::Accent("^"),
    "bar" => Command::Accent("¯"),
    "overline" => Command::Accent("‾"),
    "vec" => Command::Accent("→"),
    "dot" => Command::Accent("˙"),
    "ddot" => Command::Accent("¨"),
    "tilde" => Command::Accent("˜"),
    "left" => Command::Left,
    "right" => Command::Right,
};

/// Symbols that may follow `\left` or `\right`, after translation to their Unicode form. The
/// empty string is the invisible `.` delimiter.
static DELIMITERS: phf::Set<&'static str> = phf_set! {
    "", "(", ")", "[", "]", "{", "}", "|", "‖", "/", "⟨", "⟩", "⌊", "⌋", "⌈", "⌉",
};

/// Looks up a control word by its name, without the leading backslash.
pub fn lookup(name: &str) -> Option<Command> {
    COMMANDS.get(name).copied()
}

/// Returns true if `symbol` can be used as a stretchy delimiter.
pub fn is_delimiter(symbol: &str) -> bool {
    DELIMITERS.contains(symbol)
}

/// Translates a control symbol (a backslash followed by one non-letter character) into the node
/// it stands for. Returns [`None`] for control symbols with no meaning in math mode.
pub fn control_symbol(c: char) -> Option<ControlSymbol> {
    let symbol = match c {
        ',' => ControlSymbol::Space("0.1667em"),
        ':' | '>' => ControlSymbol::Space("0.2222em"),
        ';' => ControlSymbol::Space("0.2778em"),
        '!' => ControlSymbol::Space("-0.1667em"),
        ' ' => ControlSymbol::Space("0.25em"),
        '{' => ControlSymbol::Operator("{"),
        '}' => ControlSymbol::Operator("}"),
        '|' => ControlSymbol::Operator("‖"),
        '#' => ControlSymbol::Operator("#"),
        '$' => ControlSymbol::Operator("$"),
        '%' => ControlSymbol::Operator("%"),
        '&' => ControlSymbol::Operator("&"),
        '_' => ControlSymbol::Operator("_"),
        '\\' => ControlSymbol::LineBreak,
        _ => return None,
    };
    Some(symbol)
}

/// What a control symbol such as `\,` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSymbol {
    Space(&'static str),
    Operator(&'static str),

    /// `\\`, which has no effect inside inline math.
    LineBreak,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_commands() {
        assert_eq!(lookup("alpha"), Some(Command::Ident("α")));
        assert_eq!(lookup("Delta"), Some(Command::Upright("Δ")));
        assert_eq!(lookup("int"), Some(Command::LargeOperator { symbol: "∫", limits: false }));
        assert_eq!(lookup("dfrac"), Some(Command::Frac(FracStyle::Display)));
        assert_eq!(lookup("frak"), None);
    }

    #[test]
    fn delimiter_commands_are_delimiters() {
        for name in ["langle", "rangle", "lfloor", "rceil", "lVert", "lbrace"] {
            match lookup(name) {
                Some(Command::Operator(symbol)) => assert!(is_delimiter(symbol), "{}", name),
                other => panic!("`{}` resolved to {:?}", name, other),
            }
        }
        assert!(!is_delimiter("≤"));
    }
}
