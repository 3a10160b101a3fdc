//! Basic usage of the marginalia API

use marginalia_api::{
    display_note, process_response, process_text, Annotation, AnnotationProcessor, Category,
    Config, PipelineConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = "Maria moved to Lisbon in 1992. She opened a bakery there! \
                Her bread was famous across the city.";

    // Method 1: annotations built in code
    println!("=== Method 1: Annotation Values ===");
    let annotations = vec![
        Annotation::new("v1", Category::Validation, 40..55, "opened a bakery")
            .with_note("A confident, concrete sentence."),
        Annotation::new("f1", Category::LogicFlag, 25..29, "1992"),
    ];
    let output = process_text(text, &annotations)?;
    for segment in &output.segments {
        let tags: Vec<String> = segment
            .covering
            .iter()
            .map(|c| format!("{}{}", c.category, if c.terminal { "*" } else { "" }))
            .collect();
        println!("  [{}] {:?}", tags.join(","), segment.text);
    }

    // Method 2: raw analysis reply
    println!("\n=== Method 2: Analysis Reply ===");
    let reply = r#"Here you go:
```json
{"annotations": [{"type": "squiggle-correction", "startIndex": 24, "endIndex": 28,
  "annotatedText": "1992", "comment": "Records say **1993**", "certainty": "uncertain"}]}
```"#;
    let output = process_response(text, reply)?;
    for annotation in &output.annotations {
        println!("  {} -> {}", annotation.anchor_text, display_note(annotation));
    }

    // Method 3: custom configuration
    println!("\n=== Method 3: Custom Configuration ===");
    let pipeline = PipelineConfig::builder().sentence_limits(80, 80).build()?;
    let config = Config::builder().max_chars(1_000).warn_chars(800).pipeline(pipeline).build()?;
    let processor = AnnotationProcessor::with_config(config)?;
    let output = processor.process_text(text, &annotations)?;
    println!(
        "  {} segments in {}ms",
        output.metadata.segment_count, output.metadata.processing_time_ms
    );

    Ok(())
}
