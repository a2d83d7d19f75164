use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::time::Duration;
use tourforge::instance::{DistanceModel, Instance};
use tourforge::optimizer::SearchOutcome;

pub struct RunSummary<'a> {
    pub instance: &'a Instance,
    pub outcome: &'a SearchOutcome,
    pub optimum: Option<f64>,
    pub elapsed: Duration,
}

pub fn print_summary(summary: &RunSummary) {
    let out = summary.outcome;
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Instance").add_attribute(Attribute::Bold),
        Cell::new("N"),
        Cell::new("Cost").fg(Color::Cyan),
        Cell::new("Optimum"),
        Cell::new("Gap %"),
        Cell::new("Time (s)"),
        Cell::new("Iterations"),
        Cell::new("Accepted %"),
        Cell::new("Improving"),
    ]);

    for i in 1..=8 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let (optimum_cell, gap_cell) = match summary.optimum {
        Some(opt) => {
            let gap = tourforge::optima::gap(out.obtained_cost(), opt);
            let color = if gap < 1.0 {
                Color::Green
            } else if gap < 5.0 {
                Color::Yellow
            } else {
                Color::Red
            };
            (
                Cell::new(format!("{:.0}", opt)),
                Cell::new(format!("{:.2}", gap)).fg(color),
            )
        }
        None => (Cell::new("-"), Cell::new("-")),
    };

    table.add_row(vec![
        Cell::new(&summary.instance.name).add_attribute(Attribute::Bold),
        Cell::new(summary.instance.dimension),
        Cell::new(format!("{:.2}", out.obtained_cost())).fg(Color::Cyan),
        optimum_cell,
        gap_cell,
        Cell::new(format!("{:.3}", summary.elapsed.as_secs_f64())),
        Cell::new(out.iterations),
        Cell::new(format!("{:.1}", out.acceptance_rate() * 100.0)),
        Cell::new(out.improving_moves),
    ]);
    println!("\n{}", table);

    if out.phases.len() > 1 {
        print_phases(out);
    }
}

fn print_phases(out: &SearchOutcome) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec!["Phase", "Start T", "Final T", "Steps", "Iterations", "Best"]);
    for (i, p) in out.phases.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format!("{:.2}", p.start_temperature)),
            Cell::new(format!("{:.4}", p.final_temperature)),
            Cell::new(p.temperature_steps),
            Cell::new(p.iterations),
            Cell::new(format!("{:.2}", p.best_cost)),
        ]);
    }
    println!("{}", table);
}

/// Tour as TSPLIB node ids, closed back to the start.
pub fn print_tour(instance: &Instance, tour: &[usize]) {
    let ids: Vec<String> = tour
        .iter()
        .chain(tour.first())
        .map(|&i| instance.nodes.get(i).map_or(i + 1, |n| n.id).to_string())
        .collect();
    println!("\nTour: {}", ids.join(" -> "));
}

pub fn print_instance(instance: &Instance) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let source = match &instance.model {
        DistanceModel::Explicit(_) => "explicit matrix".to_string(),
        DistanceModel::Formula(kind) => format!("formula ({})", kind),
    };

    let mut rows: Vec<(&str, String)> = vec![
        ("Name", instance.name.clone()),
        ("Comment", instance.comment.clone()),
        ("Type", instance.problem_type.to_string()),
        ("Dimension", instance.dimension.to_string()),
        ("Edge weight type", instance.edge_weight_type.to_string()),
        ("Edge weight format", instance.edge_weight_format.to_string()),
        ("Distances", source),
        ("Symmetric", instance.is_symmetric().to_string()),
        ("Rounding", format!("{:?}", instance.weight_rounding)),
    ];
    if let Some(capacity) = instance.capacity {
        rows.push(("Capacity", capacity.to_string()));
    }
    if !instance.demands.is_empty() {
        rows.push(("Demands", instance.demands.len().to_string()));
    }
    if !instance.depots.is_empty() {
        let ids: Vec<String> = instance.depots.iter().map(|d| d.to_string()).collect();
        rows.push(("Depots", ids.join(", ")));
    }
    if !instance.fixed_edges.is_empty() {
        rows.push(("Fixed edges", instance.fixed_edges.len().to_string()));
    }

    for (key, value) in rows {
        table.add_row(vec![Cell::new(key).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    println!("\n{}", table);
}

/// Top-left `size` x `size` corner of the distance matrix.
pub fn print_distance_sample(instance: &Instance, size: usize) {
    let k = size.min(instance.dimension);
    if k == 0 {
        return;
    }

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    let mut header = vec![Cell::new("")];
    header.extend((0..k).map(|j| Cell::new(j + 1).add_attribute(Attribute::Bold)));
    table.set_header(header);

    for i in 0..k {
        let mut row = vec![Cell::new(i + 1).add_attribute(Attribute::Bold)];
        for j in 0..k {
            row.push(match instance.distance(i, j) {
                Ok(d) => Cell::new(format!("{:.2}", d)),
                Err(_) => Cell::new("n/a").fg(Color::Red),
            });
        }
        table.add_row(row);
    }
    for i in 1..=k {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("\nDistance sample:\n{}", table);
}
