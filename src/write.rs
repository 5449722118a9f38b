use crate::compute::Summary;

/// Basic CSV exporter for a `Summary`: a `MONTH` column followed by one column per year.
pub fn write_summary<W: std::io::Write>(writer: W, summary: &Summary) -> Result<(), anyhow::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(
        std::iter::once("MONTH".to_string()).chain(summary.years().map(|year| year.to_string())),
    )?;
    for (month, counts) in summary.rows() {
        wtr.write_record(
            std::iter::once(month.to_string()).chain(counts.iter().map(ToString::to_string)),
        )?;
    }
    wtr.flush()?;
    Ok(())
}
