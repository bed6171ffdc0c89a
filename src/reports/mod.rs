use brinley::api::ComparisonSummary;
use brinley::dataset::SUBJECT_COLUMN;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

fn effect_color(d: f64) -> Color {
    // Conventional small / medium / large cut-offs.
    match d.abs() {
        x if x >= 0.8 => Color::Red,
        x if x >= 0.5 => Color::Yellow,
        _ => Color::Green,
    }
}

pub fn print_subject_table(s: &ComparisonSummary) {
    println!("\n{} vs {}", s.x_label, s.y_label);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    table.add_row(vec![
        Cell::new(SUBJECT_COLUMN).add_attribute(Attribute::Bold),
        Cell::new(s.x_label.to_string()),
        Cell::new(s.y_label.to_string()),
        Cell::new("Diff"),
    ]);

    for i in 1..=3 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for p in &s.subjects {
        let diff = Cell::new(format!("{:+.0}", p.difference));
        let diff = if p.difference < 0.0 {
            diff.fg(Color::Red)
        } else if p.difference > 0.0 {
            diff.fg(Color::Green)
        } else {
            diff
        };
        table.add_row(vec![
            Cell::new(&p.id).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.0}", p.x)),
            Cell::new(format!("{:.0}", p.y)),
            diff,
        ]);
    }
    println!("{}", table);
}

pub fn print_summary_report(results: &[ComparisonSummary]) {
    if results.is_empty() {
        return;
    }
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Comparison").add_attribute(Attribute::Bold),
        Cell::new("n"),
        Cell::new("Mean X"),
        Cell::new("Mean Y"),
        Cell::new("Diff"),
        Cell::new("SD"),
        Cell::new("d").fg(Color::Cyan),
        Cell::new("SE"),
        Cell::new("t.975"),
        Cell::new("95% CI"),
    ]);

    for i in 1..=9 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for r in results {
        let s = &r.summary;
        table.add_row(vec![
            Cell::new(format!("{} vs {}", r.x_label, r.y_label)).add_attribute(Attribute::Bold),
            Cell::new(s.n),
            Cell::new(format!("{:.1}", s.mean_x)),
            Cell::new(format!("{:.1}", s.mean_y)),
            Cell::new(format!("{:.2}", s.mean_diff)),
            Cell::new(format!("{:.3}", s.sd_diff)),
            Cell::new(format!("{:.2}", s.cohens_d)).fg(effect_color(s.cohens_d)),
            Cell::new(format!("{:.3}", s.std_error)),
            Cell::new(format!("{:.3}", s.t_critical)),
            Cell::new(format!("[{:.2}, {:.2}]", s.ci_lower(), s.ci_upper())),
        ]);
    }
    println!("\n{}", table);
}
