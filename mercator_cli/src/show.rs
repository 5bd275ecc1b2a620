use std::path::PathBuf;

use clap::Args;
use mercator_mat::artifact;

use crate::fetch::DEFAULT_OUTPUT;

#[derive(Args)]
pub struct ShowArgs {
    /// Artifact to read; a `.mat` suffix is tried when the exact path is absent
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    artifact: PathBuf,
}

pub fn run(args: ShowArgs) -> anyhow::Result<()> {
    let (matrix, num_places) = artifact::load_matrix(&args.artifact)?;

    println!("{num_places} places");

    let width = matrix
        .values()
        .iter()
        .max()
        .map_or(1, |max| max.to_string().len());
    for row in matrix.rows() {
        let cells: Vec<String> = row.iter().map(|value| format!("{value:>width$}")).collect();
        println!("{}", cells.join(" "));
    }

    Ok(())
}
