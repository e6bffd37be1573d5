use std::iter;

use crate::prelude::{Real, INF};

/// ASCII plot of a sequence of non-negative values.
///
/// Draw each point as a column filled with '*'s scaled to the series peak.
pub fn plot_series(label: &str, values: &[Real], height: usize) {
    if values.is_empty() || height == 0 {
        return;
    }
    let peak = values.iter().cloned().fold(-INF, Real::max);
    if peak <= 0.0 {
        return;
    }
    let step = peak / height as Real;

    println!("{} (peak {:.0})", label, peak);
    for i in 0..height {
        let threshold = (height - i) as Real * step;
        let mut line = String::with_capacity(values.len());
        for &x in values {
            line.push(if x >= threshold { '*' } else { ' ' });
        }
        println!("{}", line);
    }
    println!("{}", iter::repeat('-').take(values.len()).collect::<String>());
}
