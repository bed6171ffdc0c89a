use brinley::config::RenderParams;
use brinley::dataset::{Condition, ScoreTable};
use brinley::plot::{chart_title, generate_comparison_plot, generate_comparison_plot_with};
use regex::Regex;

type Polyline = Vec<(i32, i32)>;

/// Text nodes are written as `>\nLabel\n</text>`, so allow whitespace around the label.
fn has_text(svg: &str, text: &str) -> bool {
    Regex::new(&format!(r">\s*{}\s*</text>", regex::escape(text)))
        .unwrap()
        .is_match(svg)
}

/// Point lists of every `<polyline>` stroked with `color` at `opacity` and `width`.
fn polylines(svg: &str, opacity: &str, color: &str, width: u32) -> Vec<Polyline> {
    let re = Regex::new(&format!(
        r#"<polyline fill="none" opacity="{}" stroke="{}" stroke-width="{}" points="([^"]*)""#,
        regex::escape(opacity),
        regex::escape(color),
        width
    ))
    .unwrap();
    re.captures_iter(svg)
        .map(|caps| {
            caps[1]
                .split_whitespace()
                .map(|p| {
                    let (x, y) = p.split_once(',').unwrap();
                    (x.parse().unwrap(), y.parse().unwrap())
                })
                .collect()
        })
        .collect()
}

fn baseline_vs(y: Condition) -> brinley::BrinleyChart {
    let table = ScoreTable::embedded();
    generate_comparison_plot(
        &table.column(Condition::Baseline),
        &table.column(y),
        "Baseline",
        &y.to_string(),
    )
    .unwrap()
}

#[test]
fn test_title_and_axis_labels() {
    let chart = baseline_vs(Condition::Intervention);
    assert_eq!(chart.title, "Modified Brinley Plot: Baseline vs Intervention");
    assert_eq!(chart.title, chart_title("Baseline", "Intervention"));
    assert!(chart.svg.contains(&chart.title));
    assert!(has_text(&chart.svg, "Baseline"));
    assert!(has_text(&chart.svg, "Intervention"));
}

#[test]
fn test_annotations_are_drawn() {
    let chart = baseline_vs(Condition::Intervention);
    let ci = Regex::new(r"95% CI: \[-5\.18, 3\.96\]").unwrap();
    let diff = Regex::new(r"Mean diff: -1\.75").unwrap();
    let means = Regex::new(r"Intervention: 11\.5").unwrap();
    assert!(ci.is_match(&chart.svg), "CI text missing");
    assert!(diff.is_match(&chart.svg), "mean diff text missing");
    assert!(means.is_match(&chart.svg), "means text missing");
    assert!(has_text(&chart.svg, "Means:"));
    assert!(has_text(&chart.svg, "Baseline: 13.2") || has_text(&chart.svg, "Baseline: 13.3"));
}

#[test]
fn test_one_marker_per_subject() {
    let chart = baseline_vs(Condition::FollowUp);
    assert_eq!(
        chart.points,
        vec![(14.0, 14.0), (10.0, 4.0), (19.0, 10.0), (10.0, 2.0)]
    );
    let circles = Regex::new(r"<circle ").unwrap();
    assert_eq!(circles.find_iter(&chart.svg).count(), chart.points.len());
}

#[test]
fn test_threshold_lines_at_five() {
    let chart = baseline_vs(Condition::Intervention);
    let lines = polylines(&chart.svg, "0.5", "#000000", 2);
    assert_eq!(lines.len(), 2, "expected one vertical and one horizontal threshold");
    for line in &lines {
        assert_eq!(line.len(), 2);
        let [(x1, y1), (x2, y2)] = [line[0], line[1]];
        assert!(x1 == x2 || y1 == y2, "threshold line is not axis-aligned: {:?}", line);
    }
}

#[test]
fn test_equal_aspect_over_fixed_range() {
    let chart = baseline_vs(Condition::Intervention);
    let lines = polylines(&chart.svg, "0.5", "#000000", 2);
    let vertical = lines.iter().find(|l| l[0].0 == l[1].0).expect("vertical threshold");
    let horizontal = lines.iter().find(|l| l[0].1 == l[1].1).expect("horizontal threshold");

    // Each threshold spans the full 0..21 range of the other axis.
    let height = (vertical[0].1 - vertical[1].1).abs();
    let width = (horizontal[0].0 - horizontal[1].0).abs();
    assert!(width > 400, "plot area too small: {}", width);
    assert!((width - height).abs() <= 1, "{}x{} is not square", width, height);

    // x = 5 sits as far right of the left edge as y = 5 sits above the bottom edge.
    let left = horizontal[0].0.min(horizontal[1].0);
    let bottom = vertical[0].1.max(vertical[1].1);
    let x_offset = vertical[0].0 - left;
    let y_offset = bottom - horizontal[0].1;
    assert!((x_offset - y_offset).abs() <= 1);
    assert!((x_offset - width * 5 / 21).abs() <= 2);
}

#[test]
fn test_dashed_diagonal() {
    let chart = baseline_vs(Condition::Intervention);
    let dashes = polylines(&chart.svg, "0.5", "#000000", 1);
    assert!(dashes.len() > 10, "diagonal should be drawn as dashes, got {}", dashes.len());
    for dash in &dashes {
        let (x1, y1) = dash[0];
        let (x2, y2) = dash[dash.len() - 1];
        assert!(x2 > x1, "dash runs right to left: {:?}", dash);
        // Pixel y grows downwards, so the no-change line has dy == -dx.
        assert!(((x2 - x1) + (y2 - y1)).abs() <= 2, "dash is not at 45 degrees: {:?}", dash);
    }
}

#[test]
fn test_red_plus_at_the_means() {
    let chart = baseline_vs(Condition::FollowUp);
    let arms = polylines(&chart.svg, "1", "#FF0000", 2);
    assert_eq!(arms.len(), 2);
    let horizontal = arms.iter().find(|a| a[0].1 == a[1].1).expect("horizontal arm");
    let vertical = arms.iter().find(|a| a[0].0 == a[1].0).expect("vertical arm");
    let centre = (
        (horizontal[0].0 + horizontal[1].0) / 2,
        horizontal[0].1,
    );
    assert_eq!(vertical[0].0, centre.0);
    assert_eq!((vertical[0].1 + vertical[1].1) / 2, centre.1);
}

#[test]
fn test_fixed_axis_ticks_and_grid() {
    for y in [Condition::Intervention, Condition::FollowUp] {
        let chart = baseline_vs(y);
        assert!(has_text(&chart.svg, "0"));
        assert!(has_text(&chart.svg, "20"));

        let ticks = Regex::new(r">\s*(-?\d+(?:\.\d+)?)\s*</text>").unwrap();
        for caps in ticks.captures_iter(&chart.svg) {
            let v: f64 = caps[1].parse().unwrap();
            assert!((0.0..=21.0).contains(&v), "tick label {} outside 0..21", v);
        }

        let grid = Regex::new(r##"<line opacity="0\.3" stroke="#000000""##).unwrap();
        assert!(grid.find_iter(&chart.svg).count() >= 8, "grid lines missing");
    }
}

#[test]
fn test_same_input_same_chart() {
    let a = baseline_vs(Condition::PostInt);
    let b = baseline_vs(Condition::PostInt);
    assert_eq!(a.means_text, b.means_text);
    assert_eq!(a.effect_text, b.effect_text);
    assert_eq!(a.svg, b.svg);
}

#[test]
fn test_canvas_size_follows_params() {
    let table = ScoreTable::embedded();
    let params = RenderParams {
        size: 500,
        font_size: 14,
    };
    let chart = generate_comparison_plot_with(
        &table.column(Condition::Baseline),
        &table.column(Condition::PostInt),
        "Baseline",
        "Post-int",
        &params,
    )
    .unwrap();
    let header = Regex::new(r#"<svg width="(\d+)" height="(\d+)""#).unwrap();
    let caps = header.captures(&chart.svg).expect("svg header");
    assert_eq!(&caps[1], "500");
    assert!(caps[2].parse::<u32>().unwrap() > 500);
}

#[test]
fn test_inputs_are_not_modified() {
    let x = vec![3.0, 7.0, 9.0];
    let y = vec![4.0, 6.0, 12.0];
    let (x0, y0) = (x.clone(), y.clone());
    let _ = generate_comparison_plot(&x, &y, "Pre", "Post").unwrap();
    assert_eq!(x, x0);
    assert_eq!(y, y0);
}

#[test]
fn test_mismatched_lengths_rejected() {
    let err = generate_comparison_plot(&[1.0, 2.0, 3.0], &[1.0, 2.0], "Pre", "Post").unwrap_err();
    assert!(err.is_invalid_input());
    assert!(err.to_string().contains("length mismatch"));
}
