//! Sampled curves for the chart panels.
//!
//! Every relation in the model is linear, so a [`Curve`] stores the relation
//! and its sampling grid and evaluates points on demand. Iterating twice
//! yields the same sequence.

use serde::ser::{Serialize, Serializer};

use crate::error::{IslmError, Result};
use crate::model::ModelParameters;

/// Inclusive sampling interval on one axis.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SampleRange {
    pub min: f64,
    pub max: f64,
}

impl SampleRange {
    /// Create a range, rejecting inverted or non-finite bounds.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(IslmError::sample_range(format!(
                "bounds must be finite, got [{}, {}]",
                min, max
            )));
        }
        if min > max {
            return Err(IslmError::sample_range(format!(
                "min {} is greater than max {}",
                min, max
            )));
        }
        if !(max - min).is_finite() {
            return Err(IslmError::sample_range(format!(
                "span of [{}, {}] overflows",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Width of the interval.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// `count` linearly spaced points over a range, endpoints included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linspace {
    range: SampleRange,
    count: usize,
}

impl Linspace {
    pub fn new(range: SampleRange, count: usize) -> Result<Self> {
        if count < 2 {
            return Err(IslmError::sample_range(format!(
                "sample count must be at least 2, got {}",
                count
            )));
        }
        Ok(Self { range, count })
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn range(&self) -> SampleRange {
        self.range
    }

    /// The i-th sample; the last one is exactly `max`.
    pub fn at(&self, i: usize) -> f64 {
        if i + 1 >= self.count {
            return self.range.max;
        }
        let step = self.range.span() / (self.count - 1) as f64;
        self.range.min + step * i as f64
    }
}

/// A linear relation `y = f(x)` between two chart axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Relation {
    /// IS: `r = (A − (1−c)·Y) / b`
    Is { autonomous: f64, leakage: f64, b: f64 },
    /// LM: `r = (k·Y − M) / h`
    Lm { k: f64, money: f64, h: f64 },
    /// Planned expenditure: `E = a + c·(Y − T) + (I0 − b·r) + G`
    Expenditure {
        a: f64,
        c: f64,
        t: f64,
        investment: f64,
        g: f64,
    },
    /// Money demand over the money axis: `r = (k·Y − M) / h`
    MoneyDemand { demand: f64, h: f64 },
    /// 45° reference line `y = x`
    Identity,
}

impl Relation {
    /// Evaluate the relation at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        match *self {
            Relation::Is { autonomous, leakage, b } => (autonomous - leakage * x) / b,
            Relation::Lm { k, money, h } => (k * x - money) / h,
            Relation::Expenditure {
                a,
                c,
                t,
                investment,
                g,
            } => a + c * (x - t) + investment + g,
            Relation::MoneyDemand { demand, h } => (demand - x) / h,
            Relation::Identity => x,
        }
    }
}

/// A lazily sampled relation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    relation: Relation,
    grid: Linspace,
}

impl Curve {
    pub fn new(relation: Relation, range: SampleRange, sample_count: usize) -> Result<Self> {
        Ok(Self {
            relation,
            grid: Linspace::new(range, sample_count)?,
        })
    }

    /// Iterate over the (x, y) samples. Each call starts from the first point.
    pub fn points(&self) -> CurvePoints {
        CurvePoints {
            curve: *self,
            next: 0,
        }
    }

    pub fn domain(&self) -> SampleRange {
        self.grid.range()
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Evaluate the relation at an arbitrary abscissa.
    pub fn value_at(&self, x: f64) -> f64 {
        self.relation.eval(x)
    }

    /// Collect all samples.
    pub fn to_vec(&self) -> Vec<(f64, f64)> {
        self.points().collect()
    }
}

impl<'a> IntoIterator for &'a Curve {
    type Item = (f64, f64);
    type IntoIter = CurvePoints;

    fn into_iter(self) -> CurvePoints {
        self.points()
    }
}

impl Serialize for Curve {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.points().map(|(x, y)| [x, y]))
    }
}

/// Iterator over the samples of a [`Curve`].
#[derive(Debug, Clone)]
pub struct CurvePoints {
    curve: Curve,
    next: usize,
}

impl Iterator for CurvePoints {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<(f64, f64)> {
        if self.next >= self.curve.grid.len() {
            return None;
        }
        let x = self.curve.grid.at(self.next);
        self.next += 1;
        Some((x, self.curve.relation.eval(x)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.curve.grid.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CurvePoints {}

/// IS curve for government spending `g` over the output axis.
pub fn generate_is_curve(
    params: &ModelParameters,
    g: f64,
    y_range: SampleRange,
    sample_count: usize,
) -> Result<Curve> {
    let b = params.checked_b()?;
    let relation = Relation::Is {
        autonomous: params.autonomous_demand(g),
        leakage: params.leakage(),
        b,
    };
    Curve::new(relation, y_range, sample_count)
}

/// LM curve for real money supply `m` over the output axis.
pub fn generate_lm_curve(
    params: &ModelParameters,
    m: f64,
    y_range: SampleRange,
    sample_count: usize,
) -> Result<Curve> {
    let h = params.checked_h()?;
    let relation = Relation::Lm {
        k: params.k,
        money: m,
        h,
    };
    Curve::new(relation, y_range, sample_count)
}

/// Planned expenditure line for the Keynesian cross, with `r` held fixed.
pub fn generate_expenditure_curve(
    params: &ModelParameters,
    g: f64,
    r: f64,
    y_range: SampleRange,
    sample_count: usize,
) -> Result<Curve> {
    let relation = Relation::Expenditure {
        a: params.a,
        c: params.c,
        t: params.t,
        investment: params.i0 - params.b * r,
        g,
    };
    Curve::new(relation, y_range, sample_count)
}

/// Money demand at income `y`, sampled over the money axis.
pub fn generate_money_demand_curve(
    params: &ModelParameters,
    y: f64,
    m_range: SampleRange,
    sample_count: usize,
) -> Result<Curve> {
    let h = params.checked_h()?;
    let relation = Relation::MoneyDemand {
        demand: params.k * y,
        h,
    };
    Curve::new(relation, m_range, sample_count)
}

/// The 45° line `E = Y` of the Keynesian cross.
pub fn generate_reference_line(range: SampleRange, sample_count: usize) -> Result<Curve> {
    Curve::new(Relation::Identity, range, sample_count)
}
