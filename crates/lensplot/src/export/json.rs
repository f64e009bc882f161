//! JSON export of the laid-out diagram.

use log::debug;

use lensplot_core::diagram::Diagram;

use crate::export::{self, Exporter};

/// Serializes a [`Diagram`] as pretty-printed JSON.
#[derive(Debug, Default)]
pub struct Json;

impl Exporter for Json {
    fn export_diagram(&mut self, diagram: &Diagram) -> Result<String, export::Error> {
        let json = serde_json::to_string_pretty(diagram)?;
        debug!(bytes = json.len(); "Diagram serialized to JSON");
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use lensplot_core::{
        circle::Circle,
        diagram::CircleLayout,
        geometry::{Point, Size},
    };

    use super::*;

    #[test]
    fn test_json_uses_camel_case_fields() {
        let diagram = Diagram::new(
            Size::new(100.0, 100.0),
            1.0,
            vec![CircleLayout::new("A", Circle::new(Point::new(50.0, 50.0), 10.0))],
            Vec::new(),
            Vec::new(),
        );

        let json = Json.export_diagram(&diagram).expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");

        assert_eq!(value["circles"][0]["setName"], "A");
        assert!(value["pairwiseRegions"].as_array().expect("array").is_empty());
    }
}
