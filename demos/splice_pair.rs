use splice_detect::{
    SpliceAnalyzer, detection::SplicingConfig, error::Result, report::JsonReport,
    report::visualization::Visualizer,
};

fn main() -> Result<()> {
    let analyzer = SpliceAnalyzer::new("evidences/forged.jpg", "evidences/original.jpg")?
        .with_config(SplicingConfig::default().with_output_path("output/spliced_regions_output.jpg"));

    std::fs::create_dir_all("output")?;

    if let Some((forged, original)) = analyzer.paths() {
        println!("Forged: {}", forged.display());
        println!("Original: {}", original.display());
        println!();
    }

    for threshold in [15, 25, 40] {
        println!("Detecting with threshold {}... ", threshold);

        let result = SpliceAnalyzer::from_images(analyzer.forged().clone(), analyzer.original().clone())
            .with_config(SplicingConfig::default().with_difference_threshold(threshold))
            .detect()?;

        println!("  Changed pixels: {}", result.summary.changed_pixels);
        println!("  Changed ratio: {:.2}%", result.summary.changed_ratio * 100.0);
        println!("  Spliced pixels: {}", result.summary.spliced_pixels);
        println!();
    }

    let result = analyzer.detect_and_save()?;
    println!("{}", result.summary.describe());

    let visualizer = Visualizer::new();
    let outlined = visualizer.visualize_detection(&analyzer.forged().to_rgb8(), &result);
    outlined.save("output/outlined.png")?;

    let panel = visualizer.panel(&[
        &outlined,
        &result.highlighted_original,
        &result.spliced_only,
        &result.spliced_regions_output,
    ]);
    panel.save("output/panel.png")?;

    println!("{}", JsonReport::from(&result).to_json()?);

    Ok(())
}
