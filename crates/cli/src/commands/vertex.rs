use super::render;
use tabled::Tabled;
use vertiscope_api::{Resolution, VertexId};
use vertiscope_core::ExplorerHandle;

#[derive(Tabled)]
struct AttributeRow {
    attribute: String,
    value: String,
    kind: &'static str,
}

pub async fn run(handle: &ExplorerHandle, id: &str) -> anyhow::Result<()> {
    let id = VertexId::from(id);
    let Some(record) = handle.vertex_details(&id).await? else {
        println!("vertex {id} is not cached and could not be fetched");
        return Ok(());
    };
    if record.resolution == Resolution::Unresolved {
        println!("vertex {id} could not be resolved (left as an unresolved fragment)");
        return Ok(());
    }

    println!(
        "{} [{}]",
        record.id,
        record
            .types
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );
    let rows = record.attributes.iter().map(|(name, value)| AttributeRow {
        attribute: name.clone(),
        value: value.to_string(),
        kind: value.kind().as_str(),
    });
    println!("{}", render(rows));
    Ok(())
}
