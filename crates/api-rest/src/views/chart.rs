//! SVG density chart.

use super::escape_html;
use leaderboard_application::ScoreDistribution;
use std::fmt::Write;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 240.0;
const MARGIN_LEFT: f64 = 48.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 12.0;
const MARGIN_BOTTOM: f64 = 36.0;
const X_TICKS: usize = 5;

/// Render the density curve as an inline SVG.
///
/// An empty distribution renders a short explanatory paragraph instead.
pub fn render_density_svg(distribution: &ScoreDistribution) -> String {
    let (first, last) = match (distribution.points.first(), distribution.points.last()) {
        (Some(first), Some(last)) if distribution.points.len() >= 2 => (first, last),
        _ => {
            return "<p class=\"muted\">At least two different scores are needed to plot a distribution.</p>"
                .to_string()
        }
    };

    let x_min = first.score;
    let x_span = (last.score - x_min).max(f64::EPSILON);
    let peak = distribution.peak().max(f64::EPSILON);
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_h;

    let sx = |score: f64| MARGIN_LEFT + (score - x_min) / x_span * plot_w;
    let sy = |density: f64| baseline - density / peak * plot_h;

    let mut path = String::new();
    for (i, p) in distribution.points.iter().enumerate() {
        let _ = write!(
            path,
            "{}{:.2},{:.2}",
            if i == 0 { "M" } else { " L" },
            sx(p.score),
            sy(p.density)
        );
    }
    let area = format!(
        "{path} L{:.2},{baseline:.2} L{:.2},{baseline:.2} Z",
        sx(last.score),
        sx(first.score)
    );

    let mut svg = String::with_capacity(distribution.points.len() * 16 + 1024);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {WIDTH} {HEIGHT}\" width=\"100%\" role=\"img\" aria-label=\"{}\">",
        escape_html("Distribution of scores")
    );
    let _ = write!(svg, "<path d=\"{area}\" fill=\"#4c72b0\" fill-opacity=\"0.2\"/>");
    let _ = write!(svg, "<path d=\"{path}\" fill=\"none\" stroke=\"#4c72b0\" stroke-width=\"2\"/>");

    let _ = write!(
        svg,
        "<line x1=\"{MARGIN_LEFT}\" y1=\"{baseline}\" x2=\"{}\" y2=\"{baseline}\" stroke=\"#333\"/>",
        WIDTH - MARGIN_RIGHT
    );
    let _ = write!(
        svg,
        "<line x1=\"{MARGIN_LEFT}\" y1=\"{MARGIN_TOP}\" x2=\"{MARGIN_LEFT}\" y2=\"{baseline}\" stroke=\"#333\"/>"
    );

    for i in 0..X_TICKS {
        let score = x_min + x_span * i as f64 / (X_TICKS - 1) as f64;
        let x = sx(score);
        let _ = write!(
            svg,
            "<line x1=\"{x:.2}\" y1=\"{baseline}\" x2=\"{x:.2}\" y2=\"{}\" stroke=\"#333\"/>\
<text x=\"{x:.2}\" y=\"{}\" font-size=\"11\" text-anchor=\"middle\">{score:.3}</text>",
            baseline + 4.0,
            baseline + 16.0
        );
    }

    let _ = write!(
        svg,
        "<text x=\"{}\" y=\"{}\" font-size=\"12\" text-anchor=\"middle\">Score</text>\
<text x=\"12\" y=\"{}\" font-size=\"12\" text-anchor=\"middle\" transform=\"rotate(-90 12 {})\">Density</text>",
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 4.0,
        MARGIN_TOP + plot_h / 2.0,
        MARGIN_TOP + plot_h / 2.0
    );

    svg.push_str("</svg>");
    svg
}
