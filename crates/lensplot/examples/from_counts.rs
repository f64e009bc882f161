//! Example: Creating a diagram from counts built in code
//!
//! This example builds the input programmatically instead of parsing JSON,
//! lays it out with both engines and prints what the planner produced.

use lensplot::{
    DiagramBuilder, Input, LayoutEngine,
    config::AppConfig,
    emphasis::Focus,
    model::{Role, SetHints},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building diagram from counts...\n");

    // A population with four segments inside it
    let input = Input::new()
        .with_count("All users", 12000.0)
        .with_count("Segment 1", 4200.0)
        .with_count("Segment 2", 3500.0)
        .with_count("Segment 3", 2900.0)
        .with_count("Segment 4", 1800.0)
        .with_count("Segment 1_AND_Segment 2", 900.0)
        .with_count("Segment 2_AND_Segment 3", 600.0)
        .with_hints("All users", SetHints::new().with_role(Role::Outer))
        .with_hints(
            "Segment 1",
            SetHints::new()
                .with_related_to(["Segment 3"])
                .with_intersects_with(["Segment 2"]),
        );

    for engine in [LayoutEngine::Heuristic, LayoutEngine::Refined] {
        let mut config = AppConfig::default();
        config.layout_mut().set_engine(engine);
        let builder = DiagramBuilder::new(config);

        let reconciled = builder.reconcile(&input);
        for diagnostic in reconciled.diagnostics() {
            println!("{diagnostic}");
        }

        let diagram = builder.layout(&reconciled);
        println!("Engine: {engine}");
        for circle in diagram.circles() {
            println!(
                "  {:<10} center=({:.1}, {:.1}) r={:.1}",
                circle.set_name(),
                circle.center().x(),
                circle.center().y(),
                circle.radius()
            );
        }
        println!(
            "  {} pairwise regions, {} triple regions\n",
            diagram.pairwise_regions().len(),
            diagram.triple_regions().len()
        );

        let emphasis = builder.emphasize(&reconciled, Some(Focus::Selected("Segment 1".into())));
        let svg = builder.render_svg(&diagram, &reconciled, &emphasis)?;
        println!("  SVG: {} bytes\n", svg.len());
    }

    Ok(())
}
