use crate::threshold::BoxplotSummary;

/// Narrowest plot that still fits every marker
const MIN_WIDTH: usize = 10;

/// Render a one-line box-and-whisker plot followed by an axis legend
///
/// Markers: `o` outlier, `|` whisker end, `-` whisker, `[` `]` box edges,
/// `=` box body, `M` median. The axis spans the pooled minimum and maximum.
pub fn render_boxplot(summary: &BoxplotSummary, width: usize) -> String {
    let width = width.max(MIN_WIDTH);
    let span = summary.max - summary.min;
    let column = |value: f64| -> usize {
        if span <= 0.0 {
            return width / 2;
        }
        let position = (value - summary.min) / span * (width - 1) as f64;
        (position.round() as usize).min(width - 1)
    };

    let mut line = vec![' '; width];

    let (low, high) = (column(summary.whisker_low), column(summary.whisker_high));
    let (q1, q3) = (column(summary.q1), column(summary.q3));
    for cell in line.iter_mut().take(high + 1).skip(low) {
        *cell = '-';
    }
    for cell in line.iter_mut().take(q3 + 1).skip(q1) {
        *cell = '=';
    }
    line[low] = '|';
    line[high] = '|';
    line[q1] = '[';
    line[q3] = ']';
    line[column(summary.median)] = 'M';
    for &outlier in &summary.outliers {
        line[column(outlier)] = 'o';
    }

    let plot: String = line.into_iter().collect();
    format!(
        "{}\n{:<half$}{:>rest$}\n",
        plot.trim_end(),
        format!("{:.3}", summary.min),
        format!("{:.3}", summary.max),
        half = width / 2,
        rest = width - width / 2
    )
}
