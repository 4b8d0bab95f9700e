use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use sim_analytics::exact::{percentile_of, quantile_at};

fn read_sorted_values(path: &Path) -> Result<Vec<f64>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading input file {}", path.display()))?;
    Ok(contents
        .lines()
        .filter_map(|line| line.trim().parse::<f64>().ok())
        .collect())
}

pub fn run(input: &Path, value1: f64, value2: f64, tol: f64, perc: bool) -> Result<()> {
    let values = read_sorted_values(input)?;
    let total = values.len();

    if total == 0 {
        println!("Nenhum intervalo disponivel.");
        return Ok(());
    }

    if perc {
        for p in [value1, value2] {
            if !(0.00001..=99.9999).contains(&p) {
                bail!("invalid percentile {p}, must be within [0.00001, 99.9999]");
            }
        }
        println!("Total de intervalos: {}", total);
        let q1 = quantile_at(&values, value1).unwrap();
        let q2 = quantile_at(&values, value2).unwrap();
        println!("Percentil {}% => valor: {}", value1, q1);
        println!("Percentil {}% => valor: {}", value2, q2);
        return Ok(());
    }

    println!("Total de intervalos: {}", total);
    let (p1, found1) = percentile_of(&values, value1, tol).unwrap();
    let (p2, found2) = percentile_of(&values, value2, tol).unwrap();
    println!(
        "Valor {} => {}: {:.4}%",
        value1,
        if found1 { "percentil" } else { "percentil aproximado" },
        p1
    );
    println!(
        "Valor {} => {}: {:.4}%",
        value2,
        if found2 { "percentil" } else { "percentil aproximado" },
        p2
    );
    Ok(())
}
