use std::ops::Range;
use serde::{Deserialize, Serialize};
use crate::engine::source::TimedPoint;
/// The closed set of filters a bank can run. Serialized by their series names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    Raw,
    Exponential,
    #[serde(rename = "cheby2-8")]
    Cheby2,
    NlMeans,
    RunningAverage,
}
impl FilterKind {
    /// Every filter, in default registration order.
    pub const ALL: [FilterKind; 5] = [
        FilterKind::Raw,
        FilterKind::Exponential,
        FilterKind::Cheby2,
        FilterKind::NlMeans,
        FilterKind::RunningAverage,
    ];
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Raw => "raw",
            FilterKind::Exponential => "exponential",
            FilterKind::Cheby2 => "cheby2-8",
            FilterKind::NlMeans => "nl-means",
            FilterKind::RunningAverage => "running-average",
        }
    }
    /// Produce at most one output point for `incoming`.
    ///
    /// `raw` is the history up to and including `incoming`; `output` is this
    /// filter's own previous output. An empty `raw` yields nothing.
    pub fn step(
        self,
        incoming: TimedPoint,
        raw: &[TimedPoint],
        output: &[TimedPoint],
    ) -> Option<TimedPoint> {
        if raw.is_empty() {
            return None;
        }
        match self {
            FilterKind::Raw => Some(incoming),
            FilterKind::Exponential => Some(exponential(incoming, output)),
            FilterKind::Cheby2 => Some(cheby2(incoming, raw, output)),
            FilterKind::NlMeans => nl_means(raw),
            FilterKind::RunningAverage => Some(running_average(incoming, raw)),
        }
    }
}
// https://www.megunolink.com/articles/3-methods-filter-noisy-arduino-measurements/
const EXP_WEIGHT: f64 = 0.45;
fn exponential(incoming: TimedPoint, output: &[TimedPoint]) -> TimedPoint {
    match output.last() {
        None => incoming,
        Some(prev) => TimedPoint::new(
            incoming.timestamp_ms,
            incoming.value * EXP_WEIGHT + prev.value * (1.0 - EXP_WEIGHT),
        ),
    }
}
const RUNNING_AVERAGE_LEN: usize = 4;
fn running_average(incoming: TimedPoint, raw: &[TimedPoint]) -> TimedPoint {
    let window = &raw[raw.len().saturating_sub(RUNNING_AVERAGE_LEN)..];
    let sum: f64 = window.iter().map(|p| p.value).sum();
    TimedPoint::new(incoming.timestamp_ms, sum / window.len() as f64)
}
// Chebyshev type II, order 8.
const CHEBY2_ORDER: usize = 8;
const CHEBY2_A: [f64; CHEBY2_ORDER + 1] = [
    1.0,
    -5.64737797273014,
    14.2191712744666,
    -20.7845222563753,
    19.2510054679411,
    -11.5511646917874,
    4.37940372345248,
    -0.958208975534196,
    0.0925573026794671,
];
const CHEBY2_B: [f64; CHEBY2_ORDER + 1] = [
    0.000383459377501092,
    -0.000727179462469762,
    0.00119864571559651,
    -0.00100393780101283,
    0.00116189645333627,
    -0.00100393780101283,
    0.00119864571559651,
    -0.000727179462469763,
    0.000383459377501093,
];
fn cheby2(incoming: TimedPoint, raw: &[TimedPoint], output: &[TimedPoint]) -> TimedPoint {
    let newest = raw.len() - 1;
    let mut y = raw[newest].value * CHEBY2_B[0];
    for k in 1..=CHEBY2_ORDER {
        if let Some(x) = newest.checked_sub(k).map(|i| raw[i].value) {
            y += CHEBY2_B[k] * x;
        }
        if let Some(prev) = output.len().checked_sub(k).map(|i| output[i].value) {
            y -= CHEBY2_A[k] * prev;
        }
    }
    y /= CHEBY2_A[0];
    TimedPoint::new(incoming.timestamp_ms, y)
}
const NL_WINDOW: usize = 21;
const NL_TEMPLATE: usize = 7;
const NL_H: f64 = 0.005;
const NL_H2_INV_NEG: f64 = -1.0 / (NL_H * NL_H);
const NL_MIN_HISTORY: usize = NL_WINDOW + NL_TEMPLATE - 1;
const NL_CENTER_OFFSET: usize = (NL_WINDOW + NL_TEMPLATE) / 2;
const NL_TEMPLATE_HALF: usize = (NL_TEMPLATE - 1) / 2;
// Both midpoints must land on whole samples.
const _: () = assert!((NL_WINDOW + NL_TEMPLATE) % 2 == 0 && NL_TEMPLATE % 2 == 1);
/// Mean of the template patch centred on `center`.
fn patch_mean(raw: &[TimedPoint], center: usize) -> f64 {
    let mut sum = 0.0;
    for wi in 0..NL_TEMPLATE {
        sum += raw[center + wi - NL_TEMPLATE_HALF].value;
    }
    sum / NL_TEMPLATE as f64
}
/// Non-local means over the trailing window; emits the point `NL_CENTER_OFFSET`
/// samples behind the newest one.
fn nl_means(raw: &[TimedPoint]) -> Option<TimedPoint> {
    if raw.len() < NL_MIN_HISTORY {
        return None;
    }
    let center = raw.len() - NL_CENTER_OFFSET;
    let center_mean = patch_mean(raw, center);
    let mut total_weights = 0.0;
    let mut total_weighted = 0.0;
    for i in 0..NL_WINDOW {
        let sample_index = raw.len() - 1 - i - NL_TEMPLATE_HALF;
        let diff = patch_mean(raw, sample_index) - center_mean;
        let weight = (NL_H2_INV_NEG * diff * diff).exp();
        total_weights += weight;
        total_weighted += weight * raw[sample_index].value;
    }
    Some(TimedPoint::new(
        raw[center].timestamp_ms,
        total_weighted / total_weights,
    ))
}
/// One registered filter and everything it has produced since the last restart.
#[derive(Clone, Debug)]
pub struct Filter {
    kind: FilterKind,
    output: Vec<TimedPoint>,
}
impl Filter {
    pub fn new(kind: FilterKind) -> Self {
        Self {
            kind,
            output: Vec::new(),
        }
    }
    pub fn kind(&self) -> FilterKind {
        self.kind
    }
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
    pub fn output(&self) -> &[TimedPoint] {
        &self.output
    }
    fn step(&mut self, incoming: TimedPoint, raw: &[TimedPoint]) {
        if let Some(point) = self.kind.step(incoming, raw, &self.output) {
            self.output.push(point);
        }
    }
}
/// Ordered, independent filters fed from the shared raw history.
#[derive(Clone, Debug, Default)]
pub struct FilterBank {
    filters: Vec<Filter>,
}
impl FilterBank {
    pub fn new(kinds: &[FilterKind]) -> Self {
        Self {
            filters: kinds.iter().copied().map(Filter::new).collect(),
        }
    }
    /// Feed the points at `new` (indices into `history`) to every filter.
    ///
    /// `history` must already contain the batch. Each point is stepped against the
    /// history prefix that ends at that point, so no filter ever sees a later sample.
    pub fn ingest(&mut self, history: &[TimedPoint], new: Range<usize>) {
        for index in new {
            let Some(&incoming) = history.get(index) else {
                break;
            };
            let view = &history[..=index];
            for filter in &mut self.filters {
                filter.step(incoming, view);
            }
        }
    }
    pub fn reset(&mut self) {
        for filter in &mut self.filters {
            filter.output.clear();
        }
    }
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }
}
