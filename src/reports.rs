use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use geneweave::Gene;

/// Renders one demo run: both parents and both offspring, with the
/// uniform-crossover left half and the MOC right half side by side.
pub fn print_run(seed: u64, split: usize, parents: [&[Gene]; 2], offspring: [&[Gene]; 2]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new(format!("seed {}", seed)),
            Cell::new("left (uniform)"),
            Cell::new("right (MOC)"),
        ]);

    let rows = [
        ("P0", parents[0]),
        ("P1", parents[1]),
        ("O0", offspring[0]),
        ("O1", offspring[1]),
    ];
    for (label, genes) in rows {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(fmt_genes(&genes[..split])).set_alignment(CellAlignment::Right),
            Cell::new(fmt_genes(&genes[split..])).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{table}");
}

fn fmt_genes(genes: &[Gene]) -> String {
    genes
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
