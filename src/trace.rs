use enum_dispatch::enum_dispatch;
use ndarray::Array2;

/// How a visited `(action, tile)` pair refreshes its eligibility.
#[enum_dispatch]
pub trait EligibilityTrace {
    fn mark(&self, traces: &mut Array2<f64>, action: usize, tiles: &[usize]);
}

/// `z = 1` on every visit, so a trace never exceeds one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplacingTrace;

/// `z += 1` on every visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccumulatingTrace;

impl EligibilityTrace for ReplacingTrace {
    fn mark(&self, traces: &mut Array2<f64>, action: usize, tiles: &[usize]) {
        for &tile in tiles {
            traces[[action, tile]] = 1.0;
        }
    }
}

impl EligibilityTrace for AccumulatingTrace {
    fn mark(&self, traces: &mut Array2<f64>, action: usize, tiles: &[usize]) {
        for &tile in tiles {
            traces[[action, tile]] += 1.0;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[enum_dispatch(EligibilityTrace)]
pub enum TraceMode {
    Replacing(ReplacingTrace),
    Accumulating(AccumulatingTrace),
}

impl Default for TraceMode {
    fn default() -> Self {
        TraceMode::Replacing(ReplacingTrace)
    }
}

impl std::str::FromStr for TraceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "replacing" => Ok(ReplacingTrace.into()),
            "accumulating" => Ok(AccumulatingTrace.into()),
            other => Err(format!("unknown trace mode {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacing_caps_at_one() {
        let mut z = Array2::zeros((2, 4));
        let mode = TraceMode::default();
        mode.mark(&mut z, 1, &[0, 3]);
        mode.mark(&mut z, 1, &[3]);
        assert_eq!(z[[1, 0]], 1.0);
        assert_eq!(z[[1, 3]], 1.0);
        assert_eq!(z.row(0).sum(), 0.0);
    }

    #[test]
    fn accumulating_adds() {
        let mut z = Array2::zeros((1, 2));
        let mode: TraceMode = "accumulating".parse().unwrap();
        mode.mark(&mut z, 0, &[1]);
        mode.mark(&mut z, 0, &[1]);
        assert_eq!(z[[0, 1]], 2.0);
    }
}
