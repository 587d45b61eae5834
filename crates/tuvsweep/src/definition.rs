//! Sweep definitions
//!
//! A sweep definition names the archive label, the constant overrides applied
//! on top of the simulator defaults, and the iterated parameters.
//!
//! ```yaml
//! label: seasonal-toc
//! constants:
//!   iday: 1
//!   tstart: 12.0
//!   tstop: 12.01
//!   nwint: -156
//! iterate:
//!   - name: imonth
//!     range: { start: 1, stop: 12, step: 1 }
//!   - name: lat
//!     values: [-84.5, -79.5, .nan, -69.5]
//! paired:
//!   name: o3col
//!   values: [...]   # one value per (imonth, lat) point, imonth fastest
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tuvsweep_core::{
    InputDeck, ParamValue, SweepAxis, SweepPlan, default_inputs, kind_of, parse_value,
};

use crate::error::{SettingsError, SweepError};

/// Inclusive, evenly spaced values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeSpec {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

/// One iterated parameter, given either as explicit values or as a range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeSpec>,
}

impl AxisSpec {
    pub fn values(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values: Some(values),
            range: None,
        }
    }

    pub fn range(name: impl Into<String>, start: f64, stop: f64, step: f64) -> Self {
        Self {
            name: name.into(),
            values: None,
            range: Some(RangeSpec { start, stop, step }),
        }
    }

    pub fn to_axis(&self) -> Result<SweepAxis, SweepError> {
        match (&self.values, &self.range) {
            (Some(values), None) => Ok(SweepAxis::new(&self.name, values.clone())),
            (None, Some(r)) => Ok(SweepAxis::range(&self.name, r.start, r.stop, r.step)?),
            _ => Err(SweepError::AxisValues(self.name.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepDefinition {
    /// Archive directory name under the output root
    pub label: String,

    /// Parameters held fixed for every run, on top of the simulator defaults
    #[serde(default)]
    pub constants: BTreeMap<String, ParamValue>,

    /// Up to three parameters swept jointly
    pub iterate: Vec<AxisSpec>,

    /// Parameter with one value per mesh point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired: Option<AxisSpec>,
}

impl SweepDefinition {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The simulator defaults with this sweep's constants applied
    pub fn base_deck(&self) -> Result<InputDeck, SweepError> {
        let mut deck = default_inputs();
        deck.merge(self.constants.iter().map(|(k, v)| (k.as_str(), v)))?;
        Ok(deck)
    }

    /// Build the mesh and check every iterated name against the catalog
    pub fn to_plan(&self) -> Result<SweepPlan, SweepError> {
        let axes = self
            .iterate
            .iter()
            .map(AxisSpec::to_axis)
            .collect::<Result<Vec<_>, _>>()?;
        let paired = self.paired.as_ref().map(AxisSpec::to_axis).transpose()?;

        let plan = SweepPlan::new(axes, paired)?;
        plan.validate_against_catalog()?;
        Ok(plan)
    }

    /// Month-of-year sweep at local noon over 205-420 nm with aerosols off
    pub fn monthly_example(label: impl Into<String>) -> Self {
        let constants: BTreeMap<String, ParamValue> = [
            ("iday", ParamValue::Int(1)),
            ("tstart", ParamValue::Float(12.0)),
            ("tstop", ParamValue::Float(12.01)),
            ("nt", ParamValue::Int(1)),
            // 205 nm is the shortest start wavelength TUV accepts
            ("wstart", ParamValue::Float(205.0)),
            ("wstop", ParamValue::Float(420.0)),
            ("nwint", ParamValue::Int(-156)),
            ("tauaer", ParamValue::Int(0)),
            ("ssaaer", ParamValue::Int(0)),
            ("alpha", ParamValue::Int(0)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self {
            label: label.into(),
            constants,
            iterate: vec![AxisSpec::range("imonth", 1.0, 12.0, 1.0)],
            paired: None,
        }
    }
}

/// Parse a `name=value` override, typing the value by the parameter's kind
pub fn parse_override(arg: &str) -> Result<(String, ParamValue), String> {
    let (name, text) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{arg}`"))?;
    let name = name.trim();
    let kind = kind_of(name).map_err(|e| e.to_string())?;
    let value = parse_value(kind, text).map_err(|e| e.to_string())?;
    Ok((name.to_string(), value))
}
