use super::{VertexRow, render};
use vertiscope_core::ExplorerHandle;

pub async fn run(handle: &ExplorerHandle, label: &str, limit: usize) -> anyhow::Result<()> {
    let records = handle.search_by_label(label, limit).await?;
    if records.is_empty() {
        println!("no vertices found with label {label}");
        return Ok(());
    }
    println!("{}", render(records.iter().map(VertexRow::from)));
    Ok(())
}
