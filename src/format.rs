//! Number formatting for data and variance labels

use std::str::FromStr;

/// Unit the value is divided by before printing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayScale {
    /// Print the raw value
    None,
    Thousands,
    Millions,
    Billions,
    /// Pick the largest unit not exceeding the value's magnitude
    #[default]
    Auto,
}

impl DisplayScale {
    fn divisor_and_suffix(&self, value: f64) -> (f64, &'static str) {
        match self {
            DisplayScale::None => (1.0, ""),
            DisplayScale::Thousands => (1e3, "K"),
            DisplayScale::Millions => (1e6, "M"),
            DisplayScale::Billions => (1e9, "B"),
            DisplayScale::Auto => {
                let magnitude = value.abs();
                if magnitude >= 1e9 {
                    (1e9, "B")
                } else if magnitude >= 1e6 {
                    (1e6, "M")
                } else if magnitude >= 1e3 {
                    (1e3, "K")
                } else {
                    (1.0, "")
                }
            }
        }
    }
}

impl FromStr for DisplayScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(DisplayScale::None),
            "thousands" | "k" => Ok(DisplayScale::Thousands),
            "millions" | "m" => Ok(DisplayScale::Millions),
            "billions" | "b" => Ok(DisplayScale::Billions),
            "auto" => Ok(DisplayScale::Auto),
            _ => Err(format!("unknown display scale '{s}'")),
        }
    }
}

/// How negative numbers are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NegativeFormat {
    /// `-1.5K`
    #[default]
    Minus,
    /// `(1.5K)`
    Parentheses,
}

impl FromStr for NegativeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minus" => Ok(NegativeFormat::Minus),
            "parentheses" | "parens" => Ok(NegativeFormat::Parentheses),
            _ => Err(format!("unknown negative format '{s}'")),
        }
    }
}

/// Options for [`format_number`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub scale: DisplayScale,
    pub decimals: usize,
    pub negative_format: NegativeFormat,
    /// Prefix positive values with `+` (variance labels)
    pub show_sign: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            scale: DisplayScale::Auto,
            decimals: 1,
            negative_format: NegativeFormat::Minus,
            show_sign: false,
        }
    }
}

impl NumberFormat {
    /// The same format with an explicit sign on positive values
    pub fn signed(mut self) -> Self {
        self.show_sign = true;
        self
    }
}

/// Format a value with scaling suffix, fixed decimals and sign handling
pub fn format_number(value: f64, format: &NumberFormat) -> String {
    let (divisor, suffix) = format.scale.divisor_and_suffix(value);
    let body = format!("{:.*}{}", format.decimals, (value / divisor).abs(), suffix);
    apply_sign(value, body, format)
}

/// Format a percentage; the scale setting is ignored
pub fn format_percent(value: f64, format: &NumberFormat) -> String {
    let body = format!("{:.*}%", format.decimals, value.abs());
    apply_sign(value, body, format)
}

fn apply_sign(value: f64, body: String, format: &NumberFormat) -> String {
    // A value that rounds to zero prints unsigned
    let rounds_to_zero = body
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .all(|c| c == '0' || c == '.');
    if rounds_to_zero || value == 0.0 {
        return body;
    }

    if value < 0.0 {
        match format.negative_format {
            NegativeFormat::Minus => format!("-{body}"),
            NegativeFormat::Parentheses => format!("({body})"),
        }
    } else if format.show_sign {
        format!("+{body}")
    } else {
        body
    }
}
