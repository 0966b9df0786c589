use super::render;
use tabled::Tabled;
use vertiscope_api::{LabelSchema, Schema};
use vertiscope_core::ExplorerHandle;

#[derive(Tabled)]
struct LabelRow {
    label: String,
    count: u64,
    attributes: String,
}

#[derive(Tabled)]
struct ConnectionRow {
    source: String,
    edge: String,
    target: String,
}

fn label_rows<'a>(
    labels: impl Iterator<Item = (&'a String, &'a LabelSchema)>,
) -> Vec<LabelRow> {
    labels
        .map(|(label, schema)| LabelRow {
            label: label.clone(),
            count: schema.count,
            attributes: schema
                .attributes
                .iter()
                .map(|a| format!("{} ({})", a.name, a.value_kind.as_str()))
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect()
}

fn print_schema(schema: &Schema) {
    println!(
        "vertices: {} across {} labels",
        schema.vertex_total,
        schema.vertex_labels.len()
    );
    println!("{}", render(label_rows(schema.vertex_labels.iter())));
    println!(
        "\nedges: {} across {} labels",
        schema.edge_total,
        schema.edge_labels.len()
    );
    println!("{}", render(label_rows(schema.edge_labels.iter())));
    if !schema.connections.is_empty() {
        println!("\nobserved connections:");
        let rows = schema.connections.iter().map(|c| ConnectionRow {
            source: c.source.clone(),
            edge: c.edge.clone(),
            target: c.target.clone(),
        });
        println!("{}", render(rows));
    }
}

pub async fn run(handle: &ExplorerHandle, refresh: bool) -> anyhow::Result<()> {
    let schema = if refresh {
        handle.refresh_schema().await?
    } else {
        handle.schema().await?
    };
    print_schema(&schema);
    Ok(())
}
