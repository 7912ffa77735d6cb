use foilsolve::core::result::OperatingPointResult;
use std::fmt::Write;

const HEADER: [&str; 9] = [
    "alpha", "CL", "CD", "CDp", "CM", "xtr_top", "xtr_bot", "Re", "conv",
];

fn cell(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}

fn reynolds_cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.3e}"))
}

/// Renders results as a right-aligned, whitespace-separated table.
pub fn format_results(results: &[OperatingPointResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>8} {:>8} {:>9} {:>9} {:>8} {:>8} {:>8} {:>10} {:>5}",
        HEADER[0], HEADER[1], HEADER[2], HEADER[3], HEADER[4], HEADER[5], HEADER[6], HEADER[7],
        HEADER[8]
    );

    for result in results {
        let row = result.to_row();
        let _ = writeln!(
            out,
            "{:>8.3} {:>8} {:>9} {:>9} {:>8} {:>8} {:>8} {:>10} {:>5}",
            row.alpha,
            cell(row.cl, 4),
            cell(row.cd, 5),
            cell(row.cdp, 5),
            cell(row.cm, 4),
            cell(row.xtr_top, 3),
            cell(row.xtr_bottom, 3),
            reynolds_cell(row.reynolds),
            if row.converged { "yes" } else { "no" }
        );
    }
    out
}
