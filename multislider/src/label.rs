//! Text for per-thumb value labels.
//!
//! The slider does not draw labels. It hands label collaborators the text for
//! each thumb: a caller-supplied callback gets the first say, and
//! [`NumberFormat`] covers whatever the callback leaves as `None`.

use crate::callback::CallbackWith;

/// Caller hook mapping `(thumb index, label value)` to label text.
pub type LabelTextFn = CallbackWith<(usize, f32), Option<String>>;

/// Largest fraction digit count [`NumberFormat`] honours.
const MAX_SUPPORTED_FRACTION_DIGITS: u8 = 9;

/// Plain decimal formatting with half-to-even rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub max_fraction_digits: u8,
    pub min_integer_digits: u8,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            max_fraction_digits: 2,
            min_integer_digits: 1,
        }
    }
}

impl NumberFormat {
    /// Formats `value`, rounding ties to the even last digit and trimming
    /// trailing zeros.
    pub fn format(&self, value: f32) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let digits = self.max_fraction_digits.min(MAX_SUPPORTED_FRACTION_DIGITS) as u32;
        let scale = 10_u64.pow(digits);
        let scaled = (f64::from(value).abs() * scale as f64).round_ties_even();
        let sign = if value.is_sign_negative() && scaled > 0.0 {
            "-"
        } else {
            ""
        };
        let width = usize::from(self.min_integer_digits);

        if scaled >= u64::MAX as f64 {
            // No f32 this large has a fractional part.
            let integer = value.abs().to_string();
            return format!("{sign}{integer:0>width$}");
        }

        let scaled = scaled as u64;
        let integer = scaled / scale;
        let fraction = scaled % scale;
        let mut text = format!("{sign}{integer:0width$}");
        if fraction > 0 {
            let fraction = format!("{fraction:0width$}", width = digits as usize);
            text.push('.');
            text.push_str(fraction.trim_end_matches('0'));
        }
        text
    }
}

/// Whether labels show each value or the distance from the previous thumb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelMode {
    Absolute,
    /// Thumb 0 is measured from `minimum`.
    Relative { minimum: f32 },
}

/// Label text strategy: optional callback, then the number format.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueLabels {
    pub format: NumberFormat,
    pub text_for_thumb: Option<LabelTextFn>,
}

impl ValueLabels {
    pub fn with_format(format: NumberFormat) -> Self {
        Self {
            format,
            text_for_thumb: None,
        }
    }

    pub fn text_for_thumb<F>(mut self, text_for_thumb: F) -> Self
    where
        F: Fn((usize, f32)) -> Option<String> + Send + Sync + 'static,
    {
        self.text_for_thumb = Some(CallbackWith::new(text_for_thumb));
        self
    }

    /// The number a label for thumb `index` displays.
    pub fn label_value(values: &[f32], index: usize, mode: LabelMode) -> Option<f32> {
        let value = *values.get(index)?;
        Some(match mode {
            LabelMode::Absolute => value,
            LabelMode::Relative { minimum } => match index.checked_sub(1) {
                Some(previous) => value - values[previous],
                None => value - minimum,
            },
        })
    }

    /// Label text for thumb `index`, or `None` past the end of `values`.
    pub fn text(&self, values: &[f32], index: usize, mode: LabelMode) -> Option<String> {
        let value = Self::label_value(values, index, mode)?;
        let custom = self
            .text_for_thumb
            .as_ref()
            .and_then(|text_for_thumb| text_for_thumb.call((index, value)));
        Some(custom.unwrap_or_else(|| self.format.format(value)))
    }

    pub fn texts(&self, values: &[f32], mode: LabelMode) -> Vec<String> {
        (0..values.len())
            .filter_map(|index| self.text(values, index, mode))
            .collect()
    }
}
