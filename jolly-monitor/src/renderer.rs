//! Integer rendering
//!
//! Every number the monitor shows goes through the active [`Radix`].

use std::fmt;

/// Default prefix for hexadecimal output
pub const HEX_PREFIX: &str = "0x";

/// Integer display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Radix {
    /// Lower-case hex digits, zero-padded, `0x` prefix by default
    #[default]
    Hexadecimal,
    /// Plain base-10 digits; padding and prefix are ignored
    Decimal,
}

impl Radix {
    /// Render `value`
    ///
    /// `padding` counts digits, not the prefix. `prefix` of `None` selects the
    /// mode's default.
    pub fn render(self, value: u64, padding: usize, prefix: Option<&str>) -> String {
        match self {
            Radix::Hexadecimal => format!(
                "{}{:0width$x}",
                prefix.unwrap_or(HEX_PREFIX),
                value,
                width = padding
            ),
            Radix::Decimal => value.to_string(),
        }
    }

    /// Render with the default prefix
    pub fn render_padded(self, value: u64, padding: usize) -> String {
        self.render(value, padding, None)
    }

    pub fn name(self) -> &'static str {
        match self {
            Radix::Hexadecimal => "hexadecimal",
            Radix::Decimal => "decimal",
        }
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
