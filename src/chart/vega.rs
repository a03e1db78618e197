//! Lowering of a [`ChartSpec`] to a Vega-Lite v5 layered document, for
//! renderers outside this crate.

use serde_json::{Map, Value, json};

use super::spec::*;

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

pub fn to_vega_lite(spec: &ChartSpec) -> Value {
    let mut doc = Map::new();
    doc.insert("$schema".into(), json!(VEGA_LITE_SCHEMA));
    doc.insert("title".into(), json!(spec.title));
    doc.insert("width".into(), json!(spec.width));
    doc.insert("height".into(), json!(spec.height));
    if let Some(bg) = &spec.background {
        doc.insert("background".into(), json!(bg));
    }
    let layers: Vec<Value> = spec
        .layers
        .iter()
        .map(|layer| match layer {
            Layer::Bar(bar) => bar_layer(spec, bar),
            Layer::Text(text) => text_layer(spec, text),
            Layer::Rule(rule) => rule_layer(rule),
        })
        .collect();
    doc.insert("layer".into(), Value::Array(layers));
    Value::Object(doc)
}

fn x_encoding(axis: &Axis) -> Value {
    json!({
        "field": axis.field,
        "type": axis.field_type,
        "title": axis.title,
        "scale": { "zero": axis.zero },
    })
}

fn y_encoding(axis: &Axis) -> Value {
    let mut enc = json!({
        "field": axis.field,
        "type": axis.field_type,
        "title": axis.title,
        // Wrapped labels carry '\n'; Vega draws an array as stacked lines.
        "axis": { "labelExpr": "split(datum.label, '\\n')" },
    });
    if let Some(order) = &axis.sort {
        enc["sort"] = json!(order);
    }
    enc
}

fn bar_layer(spec: &ChartSpec, bar: &BarLayer) -> Value {
    let tooltip: Vec<Value> = spec
        .tooltip
        .iter()
        .map(|t| json!({ "field": t.field, "type": t.field_type, "title": t.title }))
        .collect();
    json!({
        "data": { "values": bar.rows },
        "mark": { "type": "bar" },
        "encoding": {
            "x": x_encoding(&spec.x),
            "y": y_encoding(&spec.y),
            "color": {
                "field": spec.color.field,
                "type": "nominal",
                "title": spec.color.title,
                "scale": { "domain": spec.color.domain, "range": spec.color.range },
            },
            "opacity": {
                "condition": {
                    "test": format!("datum.{}", spec.opacity.field),
                    "value": spec.opacity.when_true,
                },
                "value": spec.opacity.otherwise,
            },
            "tooltip": tooltip,
        },
    })
}

fn text_layer(spec: &ChartSpec, text: &TextLayer) -> Value {
    json!({
        "data": { "values": text.callouts },
        "mark": {
            "type": "text",
            "align": text.style.align,
            "baseline": text.style.baseline,
            "dx": text.style.dx,
            "fontSize": text.style.font_size,
            "color": text.style.color,
        },
        "encoding": {
            "x": { "field": FIELD_LOG_MIC, "type": "quantitative" },
            "y": { "field": FIELD_LABEL, "type": "nominal", "sort": spec.y.sort },
            "text": { "field": FIELD_NOTE, "type": "nominal" },
        },
    })
}

fn rule_layer(rule: &RuleLayer) -> Value {
    json!({
        "data": { "values": [{ FIELD_LOG_MIC: rule.log_mic }] },
        "mark": {
            "type": "rule",
            "strokeDash": rule.stroke_dash,
            "color": rule.color,
        },
        "encoding": {
            "x": { "field": FIELD_LOG_MIC, "type": "quantitative" },
            "tooltip": { "value": rule.caption },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::builder::build_chart;
    use crate::chart::options::ChartOptions;
    use crate::data::dataset::DatasetBuilder;

    fn chart(options: ChartOptions) -> ChartSpec {
        let ms = DatasetBuilder::default().build().unwrap();
        build_chart(&ms, &options).unwrap()
    }

    #[test]
    fn one_vega_layer_per_spec_layer() {
        for options in [ChartOptions::default(), ChartOptions::minimal()] {
            let spec = chart(options);
            let doc = to_vega_lite(&spec);
            assert_eq!(doc["layer"].as_array().unwrap().len(), spec.layers.len());
        }
    }

    #[test]
    fn bar_layer_encodings() {
        let doc = to_vega_lite(&chart(ChartOptions::default()));
        let bar = &doc["layer"][0];
        assert_eq!(bar["mark"]["type"], "bar");
        assert_eq!(bar["data"]["values"].as_array().unwrap().len(), 48);
        assert_eq!(bar["encoding"]["x"]["type"], "quantitative");
        assert_eq!(bar["encoding"]["y"]["type"], "nominal");
        assert_eq!(bar["encoding"]["color"]["scale"]["range"][1], "#ff7f0e");
        assert_eq!(bar["encoding"]["opacity"]["condition"]["test"], "datum.resistant");
        assert_eq!(bar["data"]["values"][0]["antibiotic"], "Penicillin");
        assert!(doc.get("background").is_none());
    }

    #[test]
    fn text_and_rule_marks() {
        let doc = to_vega_lite(&chart(ChartOptions::default()));
        assert_eq!(doc["layer"][1]["mark"]["type"], "text");
        assert_eq!(doc["layer"][1]["data"]["values"][2]["note"], "Resistant to all");

        let doc = to_vega_lite(&chart(ChartOptions::minimal()));
        assert_eq!(doc["layer"][1]["mark"]["type"], "rule");
        assert_eq!(doc["layer"][1]["data"]["values"][0]["log_mic"], 1.0);
        assert_eq!(doc["background"], "#ffffff");
    }
}
