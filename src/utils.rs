use plotters::prelude::*;

use crate::error::{Error, Result};

/// Index of the first maximum. Ties go to the lowest index.
pub fn argmax<'a>(values: impl IntoIterator<Item = &'a f64>) -> usize {
    let mut iter = values.into_iter().enumerate();
    let (mut result, mut max) = match iter.next() {
        Some((i, v)) => (i, *v),
        None => return 0,
    };
    for (i, v) in iter {
        if *v > max {
            max = *v;
            result = i;
        }
    }
    result
}

pub fn moving_average(window: usize, vector: &[f64]) -> Vec<f64> {
    let window = window.max(1);
    let mut aux: usize = 0;
    let mut result: Vec<f64> = vec![];
    while aux < vector.len() {
        let end: usize = if aux + window < vector.len() {
            aux + window
        } else {
            vector.len()
        };
        let slice: &[f64] = &vector[aux..end];
        let r: f64 = slice.iter().sum();
        result.push(r / slice.len() as f64);
        aux = end;
    }
    result
}

/// Draws one line per series into `<title>.png`.
pub fn plot_moving_average(
    values: &[Vec<f64>],
    colors: &[&RGBColor],
    legends: &[&str],
    title: &str,
) -> Result<()> {
    let path = format!("{}.png", title.replace(' ', "_").to_lowercase());
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| Error::Plot(e.to_string()))?;

    let max_len = values.iter().map(|v| v.len()).max().unwrap_or(0).max(1);
    let (min_y, max_y) = values
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    let (min_y, max_y) = if min_y.is_finite() && max_y > min_y {
        (min_y, max_y)
    } else {
        (min_y.min(0.0) - 1.0, max_y.max(0.0) + 1.0)
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..max_len, min_y..max_y)
        .map_err(|e| Error::Plot(e.to_string()))?;

    chart
        .configure_mesh()
        .draw()
        .map_err(|e| Error::Plot(e.to_string()))?;

    for ((series, color), legend) in values.iter().zip(colors).zip(legends) {
        let color: RGBColor = **color;
        chart
            .draw_series(LineSeries::new(
                series.iter().enumerate().map(|(i, v)| (i, *v)),
                &color,
            ))
            .map_err(|e| Error::Plot(e.to_string()))?
            .label(*legend)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| Error::Plot(e.to_string()))?;

    root.present().map_err(|e| Error::Plot(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_prefers_first() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), 1);
        assert_eq!(argmax(&[0.0, 0.0]), 0);
        assert_eq!(argmax(&[-1.0, -0.5]), 1);
    }

    #[test]
    fn moving_average_windows() {
        let values = vec![1.0, 3.0, 2.0, 4.0, 10.0];
        assert_eq!(moving_average(2, &values), vec![2.0, 3.0, 10.0]);
    }
}
