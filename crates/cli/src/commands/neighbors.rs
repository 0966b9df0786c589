use super::{VertexRow, render};
use tabled::Tabled;
use vertiscope_api::VertexId;
use vertiscope_core::ExplorerHandle;

#[derive(Tabled)]
struct EdgeRow {
    edge: String,
    label: String,
    source: String,
    target: String,
}

#[derive(Tabled)]
struct CountRow {
    label: String,
    neighbors: u64,
}

pub async fn run(handle: &ExplorerHandle, id: &str, limit: usize) -> anyhow::Result<()> {
    let id = VertexId::from(id);
    let neighborhood = handle.expand_neighbors(&id, limit).await?;
    if neighborhood.is_empty() {
        println!("no neighbors found for {id}");
        return Ok(());
    }

    println!("{}", render(neighborhood.vertices.iter().map(VertexRow::from)));
    let rows = neighborhood.edges.iter().map(|e| EdgeRow {
        edge: e.id.to_string(),
        label: e.label.clone(),
        source: e.source.to_string(),
        target: e.target.to_string(),
    });
    println!("{}", render(rows));

    let stats = handle.cache_stats().await;
    println!(
        "cache now holds {} vertices and {} edges",
        stats.vertices, stats.edges
    );
    Ok(())
}

pub async fn counts(handle: &ExplorerHandle, id: &str) -> anyhow::Result<()> {
    let id = VertexId::from(id);
    let counts = handle.neighbor_counts(&id).await?;
    let rows = counts.counts.iter().map(|(label, &neighbors)| CountRow {
        label: label.clone(),
        neighbors,
    });
    println!("{}", render(rows));
    println!("total: {}", counts.total);
    Ok(())
}
