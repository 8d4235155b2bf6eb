//! Indentation configuration for printed Jsonnet.

/// Indentation style for printed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 2-space indentation, the Jsonnet community default.
    pub const JSONNET: Self = Self::Spaces(2);

    /// Append one indentation level to `buf`, `levels` times.
    pub fn write_to(&self, buf: &mut String, levels: usize) {
        match self {
            Self::Spaces(width) => {
                let count = usize::from(*width) * levels;
                buf.extend(std::iter::repeat_n(' ', count));
            }
            Self::Tab => buf.extend(std::iter::repeat_n('\t', levels)),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::JSONNET
    }
}
