use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

pub mod submission;

/// Default state of the thickness fields on form load
pub mod defaults {
    use super::Unit;

    pub const THICKNESS_VALUE: &str = "30";
    pub const UNIT: Unit = Unit::Millimeter;
}

/// Multipart field names shared by the markup and the outbound request
pub mod fields {
    pub const IMAGE: &str = "image";
    pub const THICKNESS: &str = "thickness";
    pub const UNIT: &str = "unit";
    pub const NOTES: &str = "notes";
    pub const TERMS: &str = "terms";
}

const MM_PER_INCH: f64 = 25.4;

// Floating-point number as accepted by a number input: sign, digits, exponent
static THICKNESS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+-])?(\d*)(?:\.(\d+))?(?:[eE]([+-]?\d+))?$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Unit {
    #[serde(rename = "mm")]
    Millimeter,
    #[serde(rename = "inch")]
    Inch,
}

impl Unit {
    pub const ALL: [Unit; 2] = [Unit::Millimeter, Unit::Inch];

    /// Value carried by the `unit` form field
    pub fn as_form_value(self) -> &'static str {
        match self {
            Unit::Millimeter => "mm",
            Unit::Inch => "inch",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Unit::Millimeter => "Millimeters (mm)",
            Unit::Inch => "Inches (in)",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_form_value())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitParseError(pub String);

impl fmt::Display for UnitParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown unit '{}' (expected mm or inch)", self.0)
    }
}

impl std::error::Error for UnitParseError {}

impl FromStr for Unit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mm" => Ok(Unit::Millimeter),
            "inch" => Ok(Unit::Inch),
            other => Err(UnitParseError(other.to_string())),
        }
    }
}

/// A common stone thickness offered as a shortcut to manual entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct ThicknessPreset {
    pub label: &'static str,
    pub millimeters: u32,
}

/// The fixed presets, in display order.
pub const PRESETS: [ThicknessPreset; 3] = [
    ThicknessPreset {
        label: "30 mm (1 1/4\")",
        millimeters: 30,
    },
    ThicknessPreset {
        label: "20 mm (3/4\")",
        millimeters: 20,
    },
    ThicknessPreset {
        label: "40 mm (1 1/2\")",
        millimeters: 40,
    },
];

impl ThicknessPreset {
    /// Value carried by the preset `<option>`
    pub fn form_value(&self) -> String {
        self.millimeters.to_string()
    }
}

/// What the preset selector currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetChoice {
    /// The empty "-- choose --" option
    None,
    Preset(ThicknessPreset),
}

impl PresetChoice {
    /// Map a `<select>` value onto a choice. The empty string is the
    /// sentinel; values outside the preset table are treated the same way.
    pub fn from_form_value(value: &str) -> Self {
        if value.is_empty() {
            return PresetChoice::None;
        }
        match PRESETS.iter().find(|p| p.form_value() == value) {
            Some(preset) => PresetChoice::Preset(*preset),
            None => {
                warn!("Ignoring unknown thickness preset '{}'", value);
                PresetChoice::None
            }
        }
    }

    pub fn form_value(&self) -> String {
        match self {
            PresetChoice::None => String::new(),
            PresetChoice::Preset(p) => p.form_value(),
        }
    }
}

/// Where the current thickness/unit pair came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetTag {
    /// Untouched since form load
    Unset,
    Chosen(ThicknessPreset),
    /// Edited by hand
    Custom,
}

/// Mutable form state of the thickness fields.
///
/// `value` is the raw text of the numeric input; it is only parsed when the
/// form is validated for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThicknessSelection {
    pub value: String,
    pub unit: Unit,
    pub tag: PresetTag,
}

impl Default for ThicknessSelection {
    fn default() -> Self {
        Self {
            value: defaults::THICKNESS_VALUE.to_string(),
            unit: defaults::UNIT,
            tag: PresetTag::Unset,
        }
    }
}

impl ThicknessSelection {
    /// Manual edit of the numeric field. Accepted as typed.
    pub fn with_value(self, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            tag: PresetTag::Custom,
            ..self
        }
    }

    /// Manual change of the unit selector.
    pub fn with_unit(self, unit: Unit) -> Self {
        Self {
            unit,
            tag: PresetTag::Custom,
            ..self
        }
    }

    /// The preset the values were last copied from, if they have not been
    /// edited since.
    pub fn active_preset(&self) -> Option<ThicknessPreset> {
        match self.tag {
            PresetTag::Chosen(p) => Some(p),
            PresetTag::Unset | PresetTag::Custom => None,
        }
    }
}

/// Copy a preset into the selection, forcing millimeters.
///
/// The sentinel choice leaves the selection exactly as it was.
pub fn apply_preset(selection: ThicknessSelection, choice: PresetChoice) -> ThicknessSelection {
    match choice {
        PresetChoice::None => selection,
        PresetChoice::Preset(preset) => {
            debug!("Applying thickness preset {}", preset.label);
            ThicknessSelection {
                value: preset.millimeters.to_string(),
                unit: Unit::Millimeter,
                tag: PresetTag::Chosen(preset),
            }
        }
    }
}

/// A positive thickness with 0.1 granularity, stored in tenths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Thickness {
    tenths: u32,
}

impl Thickness {
    pub fn from_tenths(tenths: u32) -> Option<Self> {
        (tenths > 0).then_some(Self { tenths })
    }

    pub fn tenths(&self) -> u32 {
        self.tenths
    }

    pub fn as_f64(&self) -> f64 {
        self.tenths as f64 / 10.0
    }

    /// Physical thickness in millimeters for a value expressed in `unit`.
    pub fn millimeters(&self, unit: Unit) -> f64 {
        match unit {
            Unit::Millimeter => self.as_f64(),
            Unit::Inch => self.as_f64() * MM_PER_INCH,
        }
    }
}

impl fmt::Display for Thickness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.tenths / 10;
        let frac = self.tenths % 10;
        if frac == 0 {
            write!(f, "{}", whole)
        } else {
            write!(f, "{}.{}", whole, frac)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThicknessError {
    Empty,
    NotANumber,
    NotPositive,
    StepMismatch,
    TooLarge,
}

impl fmt::Display for ThicknessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThicknessError::Empty => write!(f, "Thickness cannot be empty"),
            ThicknessError::NotANumber => write!(f, "Thickness must be a valid number"),
            ThicknessError::NotPositive => write!(f, "Thickness must be greater than 0"),
            ThicknessError::StepMismatch => {
                write!(f, "Thickness must be a multiple of 0.1")
            }
            ThicknessError::TooLarge => write!(f, "Thickness is too large"),
        }
    }
}

impl std::error::Error for ThicknessError {}

/// Parse the numeric thickness field.
///
/// Mirrors the constraints of `<input type="number" step="0.1" min="0.1">`:
/// - `"25"`, `"25.5"`, `"2.50"` and `"1e1"` are accepted
/// - `"2.55"` fails the step, `"0"` and `"-1"` are not positive
///
/// The value is computed from its digits, so no float rounding is involved.
pub fn parse_thickness(input: &str) -> Result<Thickness, ThicknessError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ThicknessError::Empty);
    }

    let captures = THICKNESS_REGEX
        .captures(trimmed)
        .ok_or(ThicknessError::NotANumber)?;
    let whole = captures.get(2).map_or("", |m| m.as_str());
    let frac = captures.get(3).map_or("", |m| m.as_str());
    if whole.is_empty() && frac.is_empty() {
        return Err(ThicknessError::NotANumber);
    }
    let exponent: i64 = match captures.get(4) {
        Some(m) => m.as_str().parse().map_err(|_| ThicknessError::TooLarge)?,
        None => 0,
    };

    let all_digits = format!("{}{}", whole, frac);
    let digits = all_digits.trim_start_matches('0');
    if digits.is_empty() || captures.get(1).map(|m| m.as_str()) == Some("-") {
        return Err(ThicknessError::NotPositive);
    }

    // value = digits * 10^(exponent - frac.len()); one more power for tenths
    let shift = exponent.saturating_sub(frac.len() as i64).saturating_add(1);
    let (kept, dropped) = if shift >= 0 {
        (digits, "")
    } else {
        let cut = digits.len() as i64 + shift;
        if cut <= 0 {
            ("", digits)
        } else {
            digits.split_at(cut as usize)
        }
    };
    if kept.is_empty() || dropped.bytes().any(|b| b != b'0') {
        return Err(ThicknessError::StepMismatch);
    }

    let base: u32 = kept.parse().map_err(|_| ThicknessError::TooLarge)?;
    let scale = u32::try_from(shift.max(0))
        .ok()
        .and_then(|s| 10u32.checked_pow(s))
        .ok_or(ThicknessError::TooLarge)?;
    let tenths = base.checked_mul(scale).ok_or(ThicknessError::TooLarge)?;
    Thickness::from_tenths(tenths).ok_or(ThicknessError::NotPositive)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset(mm: u32) -> ThicknessPreset {
        *PRESETS.iter().find(|p| p.millimeters == mm).unwrap()
    }

    #[test]
    fn presets_are_fixed_in_display_order() {
        let mm: Vec<u32> = PRESETS.iter().map(|p| p.millimeters).collect();
        assert_eq!(mm, vec![30, 20, 40]);
        assert!(PRESETS.iter().all(|p| p.label.contains('"')));
    }

    #[test]
    fn default_selection_is_thirty_millimeters() {
        let s = ThicknessSelection::default();
        assert_eq!(s.value, "30");
        assert_eq!(s.unit, Unit::Millimeter);
        assert_eq!(s.tag, PresetTag::Unset);
    }

    #[test]
    fn every_preset_overwrites_any_prior_state() {
        let priors = [
            ThicknessSelection::default(),
            ThicknessSelection::default().with_value("12.5").with_unit(Unit::Inch),
            ThicknessSelection::default().with_value(""),
            ThicknessSelection::default().with_value("abc"),
        ];
        for prior in priors {
            for p in PRESETS {
                let s = apply_preset(prior.clone(), PresetChoice::Preset(p));
                assert_eq!(s.value, p.millimeters.to_string());
                assert_eq!(s.unit, Unit::Millimeter);
                assert_eq!(s.tag, PresetTag::Chosen(p));
            }
        }
    }

    #[test]
    fn empty_choice_is_a_no_op() {
        let prior = ThicknessSelection::default().with_value("7.5").with_unit(Unit::Inch);
        let s = apply_preset(prior.clone(), PresetChoice::None);
        assert_eq!(s, prior);

        let chosen = apply_preset(ThicknessSelection::default(), PresetChoice::Preset(preset(40)));
        assert_eq!(apply_preset(chosen.clone(), PresetChoice::None), chosen);
        assert_eq!(
            apply_preset(ThicknessSelection::default(), PresetChoice::None),
            ThicknessSelection::default()
        );
    }

    #[test]
    fn manual_unit_change_after_preset_wins() {
        let s = apply_preset(ThicknessSelection::default(), PresetChoice::Preset(preset(30)))
            .with_unit(Unit::Inch);
        assert_eq!(s.value, "30");
        assert_eq!(s.unit, Unit::Inch);
        assert_eq!(s.tag, PresetTag::Custom);
        assert_eq!(s.active_preset(), None);
    }

    #[test]
    fn last_preset_wins() {
        let s = apply_preset(ThicknessSelection::default(), PresetChoice::Preset(preset(30)));
        let s = apply_preset(s, PresetChoice::Preset(preset(20)));
        assert_eq!(s.value, "20");
        assert_eq!(s.unit, Unit::Millimeter);
        assert_eq!(s.active_preset(), Some(preset(20)));
    }

    #[test]
    fn manual_value_edit_marks_custom() {
        let s = apply_preset(ThicknessSelection::default(), PresetChoice::Preset(preset(20)))
            .with_value("22");
        assert_eq!(s.tag, PresetTag::Custom);
        assert_eq!(s.unit, Unit::Millimeter);
    }

    #[test]
    fn preset_choice_from_form_value() {
        assert_eq!(PresetChoice::from_form_value(""), PresetChoice::None);
        assert_eq!(PresetChoice::from_form_value("40"), PresetChoice::Preset(preset(40)));
        assert_eq!(PresetChoice::from_form_value("35"), PresetChoice::None);
        assert_eq!(PresetChoice::Preset(preset(20)).form_value(), "20");
    }

    #[test]
    fn unit_form_values() {
        for unit in Unit::ALL {
            assert_eq!(unit.as_form_value().parse::<Unit>(), Ok(unit));
        }
        assert_eq!("cm".parse::<Unit>(), Err(UnitParseError("cm".to_string())));
        assert_eq!(serde_json::to_string(&Unit::Inch).unwrap(), "\"inch\"");
    }

    #[test]
    fn parse_accepts_step_aligned_positive_values() {
        assert_eq!(parse_thickness("25").unwrap().to_string(), "25");
        assert_eq!(parse_thickness("25.5").unwrap().tenths(), 255);
        assert_eq!(parse_thickness(" 3 ").unwrap().tenths(), 30);
        assert_eq!(parse_thickness("0.1").unwrap().to_string(), "0.1");
        assert_eq!(parse_thickness("+4").unwrap().tenths(), 40);
        assert_eq!(parse_thickness("12.0").unwrap().to_string(), "12");
        assert_eq!(parse_thickness(".5").unwrap().tenths(), 5);
        assert_eq!(parse_thickness("2.50").map(|t| t.tenths()), Ok(25));
        assert_eq!(parse_thickness("1e1").map(|t| t.tenths()), Ok(100));
        assert_eq!(parse_thickness("1.5E1").map(|t| t.tenths()), Ok(150));
        assert_eq!(parse_thickness("25e-1").map(|t| t.tenths()), Ok(25));
    }

    #[test]
    fn parse_rejects_malformed_values() {
        assert_eq!(parse_thickness(""), Err(ThicknessError::Empty));
        assert_eq!(parse_thickness("   "), Err(ThicknessError::Empty));
        assert_eq!(parse_thickness("abc"), Err(ThicknessError::NotANumber));
        assert_eq!(parse_thickness("3cm"), Err(ThicknessError::NotANumber));
        assert_eq!(parse_thickness("5."), Err(ThicknessError::NotANumber));
        assert_eq!(parse_thickness("0"), Err(ThicknessError::NotPositive));
        assert_eq!(parse_thickness("0.0"), Err(ThicknessError::NotPositive));
        assert_eq!(parse_thickness("-1"), Err(ThicknessError::NotPositive));
        assert_eq!(parse_thickness("2.55"), Err(ThicknessError::StepMismatch));
        assert_eq!(parse_thickness("2.5e-1"), Err(ThicknessError::StepMismatch));
        assert_eq!(parse_thickness("0.05"), Err(ThicknessError::StepMismatch));
        assert_eq!(parse_thickness("."), Err(ThicknessError::NotANumber));
        assert_eq!(parse_thickness("e5"), Err(ThicknessError::NotANumber));
        assert_eq!(parse_thickness("1e12"), Err(ThicknessError::TooLarge));
        assert_eq!(parse_thickness("99999999999"), Err(ThicknessError::TooLarge));
    }

    #[test]
    fn thickness_converts_to_millimeters() {
        let t = parse_thickness("2").unwrap();
        assert_eq!(t.millimeters(Unit::Millimeter), 2.0);
        assert!((t.millimeters(Unit::Inch) - 50.8).abs() < 1e-9);
    }
}
