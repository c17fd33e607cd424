mod common;
use common::get_source;
use epidash::Dashboard;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = Dashboard::builder().source(get_source()).build()?;

    // Daily new counts with a 3-day rolling mean.
    let rows = dashboard.derived_metrics("France", None, 3).await?;

    println!("date        new_cases  avg_new_cases  new_deaths  avg_new_deaths");
    for r in rows {
        println!(
            "{}  {:>9}  {:>13.1}  {:>10}  {:>14.1}",
            r.date, r.new_cases, r.avg_new_cases, r.new_deaths, r.avg_new_deaths
        );
    }

    Ok(())
}
