mod common;
use common::get_source;
use epidash::{Dashboard, Metric};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build the dashboard over a data source.
    let dashboard = Dashboard::builder().source(get_source()).build()?;

    // 2. Ask for a chart-ready comparison frame; entities keep explicit gaps
    //    where they have no data.
    let report = dashboard
        .comparison_frame(&["France", "Italy"], Metric::Cases, None, None)
        .await?;

    for date in report.frame.dates() {
        let row: Vec<String> = report
            .frame
            .entities()
            .map(|e| match report.frame.value(e, *date) {
                Some(v) => format!("{e}: {v}"),
                None => format!("{e}: -"),
            })
            .collect();
        println!("{date}  {}", row.join("  "));
    }

    for failure in &report.failures {
        eprintln!("warning: {failure}");
    }

    Ok(())
}
