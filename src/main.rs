use clap::Parser;
use image_analyzer::config::PipelineConfig;
use image_analyzer::error::PipelineError;
use image_analyzer::image_utils::image_io::save_image;
use image_analyzer::object_detection::Yolov11;
use image_analyzer::pipeline::run_pipeline_with_limit;
use image_analyzer::rendering::AnnotationRenderer;
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Detect objects in an image and print a ranked summary of the classes found.
#[derive(Parser, Debug)]
#[command(name = "image-analyzer", version)]
struct Args {
    /// Image to analyze.
    image: PathBuf,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// ONNX model, overrides the configuration.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Class names file, overrides the configuration.
    #[arg(long)]
    classes: Option<PathBuf>,

    /// Minimum detection confidence, overrides the configuration.
    #[arg(long)]
    confidence: Option<f32>,

    /// Where to save the full resolution annotated image.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Where to save the annotated image resized for display.
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

fn load_config(args: &Args) -> Result<PipelineConfig, PipelineError> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_toml_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(model) = &args.model {
        config.model_path = model.clone();
    }
    if let Some(classes) = &args.classes {
        config.classes_path = classes.clone();
    }
    if let Some(confidence) = args.confidence {
        config.confidence_threshold = confidence;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = load_config(args)?;
    let mut model = Yolov11::from_config(&config)?;
    let renderer = AnnotationRenderer::from_config(&config)?;

    let output = run_pipeline_with_limit(&mut model, &args.image, &renderer, config.ranking_limit)?;

    if let Some(path) = &args.output {
        save_image(&output.annotated_image, path)?;
        info!("Annotated image written to {:?}", path);
    }
    if let Some(path) = &args.preview {
        save_image(&output.preview(config.display_max_dimension)?, path)?;
        info!("Preview written to {:?}", path);
    }

    let report = output.report();
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("image-analyzer: {}", err);
            ExitCode::FAILURE
        }
    }
}
