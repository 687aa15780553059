use std::env;

use medqa_core::config::Config;
use medqa_core::pipeline::Pipeline;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let mut pipeline_config = config.pipeline()?;

    // Optional positional overrides: <data_dir> [output_dir]
    let args: Vec<String> = env::args().skip(1).collect();
    if let Some(data_dir) = args.first() { pipeline_config.data_dir = data_dir.clone(); }
    if let Some(output_dir) = args.get(1) { pipeline_config.output_dir = output_dir.clone(); }

    println!("cMedQA2 preprocessing\n=====================");
    println!("Data directory: {}", pipeline_config.data_dir);
    println!("Output directory: {}", pipeline_config.output_dir);
    println!("Workers: {}", pipeline_config.workers);

    let report = Pipeline::new(pipeline_config)?.run()?;

    println!("\n✅ Data processing complete!");
    for s in &report.splits {
        println!("📊 {:<10} {:<10} {:>8} -> {:>8} rows  {}", s.policy.to_string(), s.split.to_string(), s.input_rows, s.output_rows, s.path.display());
    }
    Ok(())
}
