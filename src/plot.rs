use crate::config::RenderParams;
use crate::consts::*;
use crate::error::{BrResult, BrinleyError};
use crate::stats::PairedSummary;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::Serialize;
use std::error::Error;
use tracing::{debug, info};

type DrawResult = Result<(), Box<dyn Error>>;

/// A rendered modified Brinley plot and the numbers shown on it.
#[derive(Debug, Clone, Serialize)]
pub struct BrinleyChart {
    pub x_label: String,
    pub y_label: String,
    pub title: String,
    pub points: Vec<(f64, f64)>,
    pub summary: PairedSummary,
    pub means_text: Vec<String>,
    pub effect_text: Vec<String>,
    #[serde(skip)]
    pub svg: String,
}

impl BrinleyChart {
    /// File name for this chart, e.g. `brinley_baseline_vs_post_int.svg`.
    pub fn file_name(&self) -> String {
        format!("brinley_{}_vs_{}.svg", slug(&self.x_label), slug(&self.y_label))
    }
}

fn slug(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

pub fn chart_title(x_label: &str, y_label: &str) -> String {
    format!("Modified Brinley Plot: {} vs {}", x_label, y_label)
}

/// Renders one comparison with the default canvas.
pub fn generate_comparison_plot(
    x_values: &[f64],
    y_values: &[f64],
    x_label: &str,
    y_label: &str,
) -> BrResult<BrinleyChart> {
    generate_comparison_plot_with(x_values, y_values, x_label, y_label, &RenderParams::default())
}

pub fn generate_comparison_plot_with(
    x_values: &[f64],
    y_values: &[f64],
    x_label: &str,
    y_label: &str,
    params: &RenderParams,
) -> BrResult<BrinleyChart> {
    params.validate()?;
    let summary = PairedSummary::compute(x_values, y_values)?;

    let mut chart = BrinleyChart {
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        title: chart_title(x_label, y_label),
        points: x_values.iter().copied().zip(y_values.iter().copied()).collect(),
        means_text: summary.means_annotation(x_label, y_label),
        effect_text: summary.effect_annotation(),
        summary,
        svg: String::new(),
    };

    let mut svg = String::new();
    draw_chart(&mut svg, &chart, params).map_err(|e| BrinleyError::Render(e.to_string()))?;
    chart.svg = svg;

    info!(
        "Rendered '{}' ({} subjects, d = {:.2})",
        chart.title, chart.summary.n, chart.summary.cohens_d
    );
    Ok(chart)
}

fn text_style(size: f64) -> TextStyle<'static> {
    ("sans-serif", size).into_font().color(&BLACK)
}

fn draw_chart(svg: &mut String, chart: &BrinleyChart, params: &RenderParams) -> DrawResult {
    let size = params.size;
    let font = params.font_size as f64;

    let root = SVGBackend::with_string(svg, (size, size + TITLE_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    // Title strip on top, square body below.
    let (title_area, body) = root.split_vertically(TITLE_HEIGHT);
    title_area.draw(&Text::new(
        chart.title.clone(),
        ((size / 2) as i32, (TITLE_HEIGHT / 2) as i32),
        text_style(font + 4.0).pos(Pos::new(HPos::Center, VPos::Center)),
    ))?;

    let mut cc = ChartBuilder::on(&body)
        .margin(CHART_MARGIN)
        .x_label_area_size(LABEL_AREA)
        .y_label_area_size(LABEL_AREA)
        .build_cartesian_2d(0f64..AXIS_MAX, 0f64..AXIS_MAX)?;

    cc.configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .axis_desc_style(text_style(font))
        .label_style(text_style(font - 4.0))
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.0}", v))
        .bold_line_style(BLACK.mix(GRID_ALPHA))
        .light_line_style(BLACK.mix(GRID_ALPHA / 3.0))
        .draw()?;

    // No-change diagonal.
    cc.draw_series(DashedLineSeries::new(
        vec![(0.0, 0.0), (AXIS_MAX, AXIS_MAX)].into_iter(),
        10,
        6,
        BLACK.mix(REFERENCE_ALPHA).stroke_width(1),
    ))?;

    let reference = BLACK.mix(REFERENCE_ALPHA).stroke_width(REFERENCE_WIDTH);
    cc.draw_series(LineSeries::new(
        vec![(THRESHOLD, 0.0), (THRESHOLD, AXIS_MAX)],
        reference,
    ))?;
    cc.draw_series(LineSeries::new(
        vec![(0.0, THRESHOLD), (AXIS_MAX, THRESHOLD)],
        reference,
    ))?;

    cc.draw_series(
        chart
            .points
            .iter()
            .map(|&p| Circle::new(p, SUBJECT_RADIUS, BLACK.mix(SUBJECT_ALPHA).filled())),
    )?;

    let mean = (chart.summary.mean_x, chart.summary.mean_y);
    let mean_style = RED.stroke_width(MEAN_MARKER_WIDTH);
    cc.draw_series(std::iter::once(
        EmptyElement::at(mean)
            + PathElement::new(vec![(-MEAN_MARKER_ARM, 0), (MEAN_MARKER_ARM, 0)], mean_style)
            + PathElement::new(vec![(0, -MEAN_MARKER_ARM), (0, MEAN_MARKER_ARM)], mean_style),
    ))?;

    let annotation = text_style(font - 2.0);

    let means_anchor = cc.backend_coord(&(mean.0, mean.1 + MEANS_LABEL_OFFSET));
    draw_text_box(
        &root,
        &chart.means_text,
        means_anchor,
        (HPos::Center, VPos::Bottom),
        &annotation,
    )?;

    let (fx, fy) = EFFECT_BOX_FRACTION;
    let effect_anchor = cc.backend_coord(&(AXIS_MAX * fx, AXIS_MAX * fy));
    draw_text_box(
        &root,
        &chart.effect_text,
        effect_anchor,
        (HPos::Left, VPos::Top),
        &annotation,
    )?;

    root.present()?;
    debug!("SVG canvas {}x{} finished", size, size + TITLE_HEIGHT);
    Ok(())
}

/// Draws `lines` on a translucent white box hanging from `anchor` (pixels).
///
/// `hang` picks which edge of the box touches the anchor; lines are aligned
/// the same way horizontally.
fn draw_text_box(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    lines: &[String],
    anchor: (i32, i32),
    hang: (HPos, VPos),
    style: &TextStyle,
) -> DrawResult {
    let mut text_w = 0i32;
    let mut line_h = 0i32;
    for line in lines {
        let (w, h) = root.estimate_text_size(line, style)?;
        text_w = text_w.max(w as i32);
        line_h = line_h.max(h as i32);
    }
    let line_h = line_h.max(style.font.get_size().round() as i32);

    let box_w = text_w + 2 * ANNOTATION_PADDING;
    let box_h = line_h * lines.len() as i32 + 2 * ANNOTATION_PADDING;

    let left = match hang.0 {
        HPos::Left => anchor.0,
        HPos::Center => anchor.0 - box_w / 2,
        HPos::Right => anchor.0 - box_w,
    };
    let top = match hang.1 {
        VPos::Top => anchor.1,
        VPos::Center => anchor.1 - box_h / 2,
        VPos::Bottom => anchor.1 - box_h,
    };

    let corners = [(left, top), (left + box_w, top + box_h)];
    root.draw(&Rectangle::new(
        corners,
        WHITE.mix(ANNOTATION_BOX_ALPHA).filled(),
    ))?;
    root.draw(&Rectangle::new(corners, BLACK.stroke_width(1)))?;

    let text_x = match hang.0 {
        HPos::Left => left + ANNOTATION_PADDING,
        HPos::Center => left + box_w / 2,
        HPos::Right => left + box_w - ANNOTATION_PADDING,
    };
    let line_style = style.pos(Pos::new(hang.0, VPos::Top));
    for (i, line) in lines.iter().enumerate() {
        let y = top + ANNOTATION_PADDING + line_h * i as i32;
        root.draw(&Text::new(line.clone(), (text_x, y), line_style.clone()))?;
    }
    Ok(())
}
