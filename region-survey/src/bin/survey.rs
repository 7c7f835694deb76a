use miette::{miette, Context, IntoDiagnostic};
use region_survey::{grid, trace};

#[tracing::instrument]
fn main() -> miette::Result<()> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| miette!("usage: survey <grid-file>"))?;
    let input = std::fs::read_to_string(&path)
        .into_diagnostic()
        .with_context(|| format!("reading {path}"))?;

    let board = grid::parse(&input).context("parsing grid")?;
    let survey = trace::survey(&board);

    println!("{survey}");
    println!("Perimeter cost: {}", survey.perimeter_cost());
    println!("Fence cost: {}", survey.fence_cost());
    Ok(())
}
