//! Sweep mesh construction
//!
//! A sweep varies up to three parameters jointly over the outer product of
//! their value arrays. Points are visited in flattened `meshgrid` order: the
//! first axis varies fastest, then the second, then the third.
//!
//! A sweep may also carry one *paired* axis whose values are already laid out
//! in that flattened order (one value per mesh point), e.g. an ozone column
//! table indexed by latitude and month.

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::deck::InputDeck;
use crate::error::{CatalogError, MeshError};
use crate::value::ParamValue;

/// Most mesh axes a sweep can have
pub const MAX_AXES: usize = 3;

/// Most values a range axis can expand to
pub const MAX_AXIS_POINTS: usize = 1 << 20;

/// Values for one iterated parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepAxis {
    pub name: String,
    pub values: Vec<f64>,
}

impl SweepAxis {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Evenly spaced values from `start` to `stop` inclusive
    pub fn range(name: impl Into<String>, start: f64, stop: f64, step: f64) -> Result<Self, MeshError> {
        let name = name.into();
        let span = (stop - start) / step;
        if step == 0.0 || !span.is_finite() || span < 0.0 {
            return Err(MeshError::InvalidRange {
                name,
                start,
                stop,
                step,
            });
        }

        // Tolerate accumulated rounding so `stop` itself is included
        let steps = (span + 1e-9).floor();
        if steps >= MAX_AXIS_POINTS as f64 {
            return Err(MeshError::InvalidRange {
                name,
                start,
                stop,
                step,
            });
        }
        let count = steps as usize + 1;
        let values = (0..count).map(|n| start + step * n as f64).collect();
        Ok(Self { name, values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Stride of each axis in flattened order; the first axis is contiguous
fn compute_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = Vec::with_capacity(shape.len());
    let mut stride = 1;
    for &size in shape {
        strides.push(stride);
        stride *= size;
    }
    strides
}

/// A validated set of sweep axes
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPlan {
    axes: Vec<SweepAxis>,
    paired: Option<SweepAxis>,
    strides: Vec<usize>,
    total: usize,
}

impl SweepPlan {
    pub fn new(axes: Vec<SweepAxis>, paired: Option<SweepAxis>) -> Result<Self, MeshError> {
        if axes.is_empty() {
            return Err(MeshError::NoAxes);
        }
        if axes.len() > MAX_AXES {
            return Err(MeshError::TooManyAxes(axes.len()));
        }

        let mut seen: Vec<&str> = Vec::new();
        for name in axes.iter().chain(paired.iter()).map(|a| a.name.as_str()) {
            if seen.contains(&name) {
                return Err(MeshError::DuplicateAxis(name.to_string()));
            }
            seen.push(name);
        }

        let shape: Vec<usize> = axes.iter().map(SweepAxis::len).collect();
        let total = shape.iter().product();

        if let Some(p) = &paired {
            if p.len() != total {
                return Err(MeshError::PairedLengthMismatch {
                    name: p.name.clone(),
                    expected: total,
                    actual: p.len(),
                });
            }
        }

        Ok(Self {
            axes,
            paired,
            strides: compute_strides(&shape),
            total,
        })
    }

    pub fn axes(&self) -> &[SweepAxis] {
        &self.axes
    }

    pub fn paired(&self) -> Option<&SweepAxis> {
        self.paired.as_ref()
    }

    /// Every iterated parameter name, mesh axes first
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.axes
            .iter()
            .chain(self.paired.iter())
            .map(|a| a.name.as_str())
    }

    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(SweepAxis::len).collect()
    }

    /// Number of mesh points
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Fail on the first iterated name the simulator does not know
    pub fn validate_against_catalog(&self) -> Result<(), MeshError> {
        for name in self.names() {
            catalog::kind_of(name)?;
        }
        Ok(())
    }

    /// The point at a flattened position
    pub fn point(&self, ordinal: usize) -> Option<SweepPoint<'_>> {
        if ordinal >= self.total {
            return None;
        }

        let indices: Vec<usize> = self
            .axes
            .iter()
            .zip(&self.strides)
            .map(|(axis, &stride)| (ordinal / stride) % axis.len())
            .collect();

        let mut assignments: Vec<(&str, f64)> = self
            .axes
            .iter()
            .zip(&indices)
            .map(|(axis, &i)| (axis.name.as_str(), axis.values[i]))
            .collect();
        if let Some(p) = &self.paired {
            assignments.push((p.name.as_str(), p.values[ordinal]));
        }

        Some(SweepPoint {
            ordinal,
            indices,
            assignments,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = SweepPoint<'_>> {
        (0..self.total).filter_map(|ordinal| self.point(ordinal))
    }
}

/// One combination of coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint<'a> {
    /// Zero-based position in visiting order
    pub ordinal: usize,
    /// Index into each mesh axis
    pub indices: Vec<usize>,
    /// Coordinate per iterated parameter, mesh axes first then the paired one
    pub assignments: Vec<(&'a str, f64)>,
}

impl<'a> SweepPoint<'a> {
    /// Axis indices joined by `-`, used to name archived files
    pub fn label(&self) -> String {
        self.indices
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// First coordinate that is NaN, if any
    pub fn nan_assignment(&self) -> Option<(&'a str, f64)> {
        self.assignments.iter().copied().find(|(_, v)| v.is_nan())
    }

    /// Write this point's coordinates into a working deck
    pub fn assign_into(&self, deck: &mut InputDeck) -> Result<(), CatalogError> {
        for &(name, value) in &self.assignments {
            deck.set(name, ParamValue::Float(value))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months() -> SweepAxis {
        SweepAxis::range("imonth", 1.0, 12.0, 1.0).unwrap()
    }

    #[test]
    fn test_range_is_inclusive() {
        assert_eq!(months().values, (1..=12).map(f64::from).collect::<Vec<_>>());

        let lat = SweepAxis::range("lat", -89.5, 89.5, 5.0).unwrap();
        assert_eq!(lat.len(), 36);
        assert_eq!(lat.values[0], -89.5);
        assert_eq!(lat.values[35], 85.5);

        let down = SweepAxis::range("lat", 10.0, 0.0, -2.5).unwrap();
        assert_eq!(down.values, vec![10.0, 7.5, 5.0, 2.5, 0.0]);
    }

    #[test]
    fn test_range_rejects_bad_step() {
        assert!(SweepAxis::range("nt", 1.0, 10.0, 0.0).is_err());
        assert!(SweepAxis::range("nt", 1.0, 10.0, -1.0).is_err());
        assert!(SweepAxis::range("nt", 1.0, 10.0, f64::NAN).is_err());
    }

    #[test]
    fn test_range_rejects_huge_span() {
        assert!(matches!(
            SweepAxis::range("nt", 0.0, 1e20, 1.0),
            Err(MeshError::InvalidRange { .. })
        ));

        let widest = SweepAxis::range("nt", 0.0, (MAX_AXIS_POINTS - 1) as f64, 1.0).unwrap();
        assert_eq!(widest.len(), MAX_AXIS_POINTS);
    }

    #[test]
    fn test_single_axis_visits_in_order() {
        let plan = SweepPlan::new(vec![months()], None).unwrap();
        assert_eq!(plan.len(), 12);

        let points: Vec<SweepPoint> = plan.iter().collect();
        assert_eq!(points.len(), 12);
        for (n, point) in points.iter().enumerate() {
            assert_eq!(point.ordinal, n);
            assert_eq!(point.assignments, vec![("imonth", (n + 1) as f64)]);
            assert_eq!(point.label(), n.to_string());
        }
    }

    #[test]
    fn test_two_axes_cover_every_pair_once() {
        let i = SweepAxis::new("imonth", vec![1.0, 2.0, 3.0]);
        let j = SweepAxis::new("lat", vec![-45.0, 0.0, 45.0, 60.0]);
        let plan = SweepPlan::new(vec![i, j], None).unwrap();
        assert_eq!(plan.len(), 12);
        assert_eq!(plan.shape(), vec![3, 4]);

        let mut pairs: Vec<(usize, usize)> = plan
            .iter()
            .map(|p| (p.indices[0], p.indices[1]))
            .collect();

        // First axis varies fastest
        assert_eq!(&pairs[..4], &[(0, 0), (1, 0), (2, 0), (0, 1)]);

        pairs.sort_unstable();
        pairs.dedup();
        assert_eq!(pairs.len(), 12);

        let p = plan.point(5).unwrap();
        assert_eq!(p.label(), "2-1");
        assert_eq!(p.assignments, vec![("imonth", 3.0), ("lat", 0.0)]);
    }

    #[test]
    fn test_three_axes() {
        let plan = SweepPlan::new(
            vec![
                SweepAxis::new("imonth", vec![1.0, 2.0]),
                SweepAxis::new("lat", vec![0.0, 10.0, 20.0]),
                SweepAxis::new("o3col", vec![250.0, 300.0]),
            ],
            None,
        )
        .unwrap();
        assert_eq!(plan.len(), 12);

        let last = plan.point(11).unwrap();
        assert_eq!(last.label(), "1-2-1");
        assert_eq!(plan.point(6).unwrap().indices, vec![0, 0, 1]);
        assert!(plan.point(12).is_none());
    }

    #[test]
    fn test_paired_axis_follows_ordinal() {
        let plan = SweepPlan::new(
            vec![
                SweepAxis::new("imonth", vec![1.0, 2.0]),
                SweepAxis::new("lat", vec![0.0, 10.0]),
            ],
            Some(SweepAxis::new("o3col", vec![300.0, 301.0, 302.0, 303.0])),
        )
        .unwrap();

        let p = plan.point(2).unwrap();
        assert_eq!(p.label(), "0-1");
        assert_eq!(
            p.assignments,
            vec![("imonth", 1.0), ("lat", 10.0), ("o3col", 302.0)]
        );
    }

    #[test]
    fn test_plan_errors() {
        assert_eq!(SweepPlan::new(vec![], None), Err(MeshError::NoAxes));

        let four = (0..4)
            .map(|n| SweepAxis::new(format!("a{n}"), vec![0.0]))
            .collect();
        assert_eq!(SweepPlan::new(four, None), Err(MeshError::TooManyAxes(4)));

        let dup = SweepPlan::new(vec![months()], Some(months()));
        assert_eq!(dup, Err(MeshError::DuplicateAxis("imonth".into())));

        let short = SweepPlan::new(vec![months()], Some(SweepAxis::new("o3col", vec![300.0])));
        assert!(matches!(
            short,
            Err(MeshError::PairedLengthMismatch {
                expected: 12,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_empty_axis_yields_no_points() {
        let plan = SweepPlan::new(vec![SweepAxis::new("nt", vec![])], None).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.iter().count(), 0);
    }

    #[test]
    fn test_validate_against_catalog() {
        let plan = SweepPlan::new(vec![SweepAxis::new("month", vec![1.0])], None).unwrap();
        assert_eq!(
            plan.validate_against_catalog(),
            Err(MeshError::Catalog(CatalogError::UnknownParameter(
                "month".into()
            )))
        );
    }

    #[test]
    fn test_nan_assignment() {
        let plan = SweepPlan::new(
            vec![SweepAxis::new("o3col", vec![300.0, f64::NAN, 310.0])],
            None,
        )
        .unwrap();
        assert!(plan.point(0).unwrap().nan_assignment().is_none());
        let (name, value) = plan.point(1).unwrap().nan_assignment().unwrap();
        assert_eq!(name, "o3col");
        assert!(value.is_nan());
    }

    #[test]
    fn test_nan_name_outlives_point() {
        let plan = SweepPlan::new(vec![SweepAxis::new("lat", vec![f64::NAN])], None).unwrap();
        let name = plan.point(0).and_then(|p| p.nan_assignment().map(|(n, _)| n));
        assert_eq!(name, Some("lat"));
    }
}
