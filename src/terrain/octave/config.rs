//! Octave configuration: an octave kind plus a typed parameter bag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::OctaveKind;

/// A single octave parameter value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Flag(bool),
    Number(f64),
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Flag(value)
    }
}

/// One terrain layer of a biome recipe.
///
/// Lookups never fail: a missing, mistyped or out-of-domain parameter yields
/// the default the octave documents for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OctaveConfiguration {
    kind: OctaveKind,
    #[serde(default)]
    params: BTreeMap<String, ParamValue>,
}

impl OctaveConfiguration {
    pub fn new(kind: OctaveKind) -> Self {
        Self {
            kind,
            params: BTreeMap::new(),
        }
    }

    /// Builder-style parameter setter.
    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    pub fn kind(&self) -> OctaveKind {
        self.kind
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.params.get(name).copied()
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, ParamValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Any finite number.
    pub fn number(&self, name: &str, default: f64) -> f64 {
        match self.get(name) {
            Some(ParamValue::Number(v)) if v.is_finite() => v,
            _ => default,
        }
    }

    pub fn flag(&self, name: &str, default: bool) -> bool {
        match self.get(name) {
            Some(ParamValue::Flag(v)) => v,
            _ => default,
        }
    }

    /// Strictly positive number (frequencies, widths, exponents).
    pub fn positive(&self, name: &str, default: f64) -> f64 {
        let v = self.number(name, default);
        if v > 0.0 { v } else { default }
    }

    /// Zero or positive number (heights, depths, amplitudes).
    pub fn non_negative(&self, name: &str, default: f64) -> f64 {
        let v = self.number(name, default);
        if v >= 0.0 { v } else { default }
    }

    /// Number inside `[min, max]`.
    pub fn bounded(&self, name: &str, default: f64, min: f64, max: f64) -> f64 {
        let v = self.number(name, default);
        if (min..=max).contains(&v) { v } else { default }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_parameter_returns_default() {
        let cfg = OctaveConfiguration::new(OctaveKind::Detail);
        assert_eq!(cfg.number("amplitude", 1.5), 1.5);
        assert!(!cfg.flag("crystalline", false));
    }

    #[test]
    fn test_mistyped_parameter_returns_default() {
        let cfg = OctaveConfiguration::new(OctaveKind::Detail)
            .with("amplitude", true)
            .with("crystalline", 2.0);
        assert_eq!(cfg.number("amplitude", 1.5), 1.5);
        assert!(!cfg.flag("crystalline", false));
    }

    #[test]
    fn test_domain_checks_fall_back() {
        let cfg = OctaveConfiguration::new(OctaveKind::Canyon)
            .with("width", -0.3)
            .with("depth", -4.0)
            .with("frequency", 0.0)
            .with("steepness", f64::NAN)
            .with("threshold", 3.0);

        assert_eq!(cfg.positive("width", 0.15), 0.15);
        assert_eq!(cfg.non_negative("depth", 24.0), 24.0);
        assert_eq!(cfg.positive("frequency", 0.01), 0.01);
        assert_eq!(cfg.positive("steepness", 1.5), 1.5);
        assert_eq!(cfg.bounded("threshold", 0.2, -1.0, 1.0), 0.2);
    }

    #[test]
    fn test_set_values_are_returned() {
        let cfg = OctaveConfiguration::new(OctaveKind::Foundation)
            .with("base", 70.0)
            .with("amplitude", 0.0);
        assert_eq!(cfg.kind(), OctaveKind::Foundation);
        assert_eq!(cfg.number("base", 64.0), 70.0);
        assert_eq!(cfg.non_negative("amplitude", 12.0), 0.0);
        assert_eq!(cfg.params().count(), 2);
    }
}
