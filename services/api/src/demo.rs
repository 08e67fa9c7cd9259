use crate::infra::{
    image_data_url, parse_defect, parse_environment, ScriptedAssistant, ScriptedClassifier,
};
use clap::Args;
use coating_advisor::config::AppConfig;
use coating_advisor::error::AppError;
use coating_advisor::telemetry;
use coating_advisor::workflows::inspection::{
    estimate_environment, select_cycle, write_matrix_csv, AreaFamily, DefectType,
    EnvironmentCategory, FollowUpRequest, ImageRef, InspectionError, InspectionMeta,
    InspectionReport, InspectionService, OpenAiChatClient, BASELINE_ENVIRONMENT,
};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

const DEMO_CLASSIFICATION: &str = r#"Here is my assessment:
{"items":[
  {"defect":{"type":"pitting","severity":"severe","confidence":0.84,"notes":"pitting along the weld seam below the waterline mark"}},
  {"defect":{"type":"mechanical_damage","severity":"moderate","confidence":0.71,"notes":"fender scrape through to bare steel"}}
]}"#;

#[derive(Args, Debug)]
pub(crate) struct EnvironmentArgs {
    /// Free-text location, e.g. "Porto di Genova"
    #[arg(long)]
    pub(crate) location: String,
}

#[derive(Args, Debug)]
pub(crate) struct CycleArgs {
    /// Inspected area, e.g. "Ballast Tank"
    #[arg(long)]
    pub(crate) area: String,
    /// Defect type (general_corrosion, pitting, blistering, delamination, mechanical_damage, fouling)
    #[arg(long, value_parser = parse_defect)]
    pub(crate) defect: DefectType,
    /// Corrosivity category (defaults to C4)
    #[arg(long, value_parser = parse_environment)]
    pub(crate) environment: Option<EnvironmentCategory>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct MatrixArgs {
    /// Write the CSV to a file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Inspection photo; repeat for several images
    #[arg(long = "image", required = true)]
    pub(crate) images: Vec<PathBuf>,
    #[arg(long)]
    pub(crate) area: String,
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Corrosivity override (C3, C4, C5I, C5M, CX or Auto)
    #[arg(long)]
    pub(crate) environment: Option<String>,
    #[arg(long)]
    pub(crate) substrate: Option<String>,
    #[arg(long)]
    pub(crate) existing_system: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    #[arg(long, default_value = "Hull/Topside")]
    pub(crate) area: String,
    #[arg(long, default_value = "Porto di Genova")]
    pub(crate) location: String,
    /// Follow-up question put to the offline assistant
    #[arg(long, default_value = "What overcoating interval applies to the stripe coat?")]
    pub(crate) question: String,
}

pub(crate) fn run_environment(args: EnvironmentArgs) -> Result<(), AppError> {
    let category = estimate_environment(&args.location);
    println!("{}: {category}", args.location);
    Ok(())
}

pub(crate) fn run_cycle(args: CycleArgs) -> Result<(), AppError> {
    let environment = args.environment.unwrap_or(BASELINE_ENVIRONMENT);
    let family = AreaFamily::classify(&args.area);
    let cycle = select_cycle(&args.area, args.defect, environment);

    println!(
        "{} ({}) | {} | {environment}",
        args.area,
        family.label(),
        args.defect
    );
    println!("Surface prep: {}", cycle.surface_prep);
    for (index, product) in cycle.products.iter().enumerate() {
        println!(
            "  {}. {} - {} ({})",
            index + 1,
            product.name,
            product.dft,
            product.notes
        );
    }
    for alternative in &cycle.alternatives {
        let names: Vec<&str> = alternative.products.iter().map(|p| p.name).collect();
        match alternative.note {
            Some(note) => println!("  alt: {} [{note}]", names.join(" > ")),
            None => println!("  alt: {}", names.join(" > ")),
        }
    }
    Ok(())
}

pub(crate) fn run_matrix(args: MatrixArgs) -> Result<(), AppError> {
    let rows = match args.output {
        Some(path) => {
            let rows = write_matrix_csv(BufWriter::new(File::create(&path)?))?;
            eprintln!("wrote {rows} decision rows to {}", path.display());
            rows
        }
        None => write_matrix_csv(io::stdout().lock())?,
    };
    tracing::debug!(rows, "decision matrix exported");
    Ok(())
}

pub(crate) async fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    if config.classifier.api_key.is_none() {
        warn!("no classifier API key configured; set CLASSIFIER_API_KEY or OPENAI_API_KEY");
    }

    let images = args
        .images
        .iter()
        .map(|path| image_data_url(path))
        .collect::<Result<Vec<ImageRef>, AppError>>()?;

    let meta = InspectionMeta {
        area: args.area,
        environment: args.environment,
        substrate: args.substrate,
        existing_system: args.existing_system,
        location: args.location,
        ..InspectionMeta::default()
    };

    let client = Arc::new(
        OpenAiChatClient::from_config(&config.classifier).map_err(InspectionError::from)?,
    );
    let service = InspectionService::new(client.clone(), client);
    let report = service.run(&images, meta).await?;
    print_json(&report)
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = InspectionService::new(
        Arc::new(ScriptedClassifier::new(DEMO_CLASSIFICATION)),
        Arc::new(ScriptedAssistant),
    );

    let images = vec![
        ImageRef("data:image/jpeg;base64,ZGVtby13ZWxk".to_string()),
        ImageRef("data:image/jpeg;base64,ZGVtby1mZW5kZXI=".to_string()),
        ImageRef("data:image/jpeg;base64,ZGVtby1ib290dG9w".to_string()),
    ];
    let meta = InspectionMeta {
        area: args.area,
        location: Some(args.location),
        ..InspectionMeta::default()
    };

    println!("Coating inspection demo (offline classifier)");
    let report = service.run(&images, meta).await?;
    print_summary(&report);

    let report_json = serde_json::to_value(&report)
        .map_err(|err| AppError::Io(io::Error::other(err)))?;
    let answer = service
        .ask(FollowUpRequest {
            question: Some(args.question.clone()),
            meta: report_json["meta"].clone(),
            last_result: report_json,
        })
        .await?;

    println!("\nQ: {}", args.question);
    println!("A: {}", answer.answer);
    Ok(())
}

fn print_summary(report: &InspectionReport) {
    println!(
        "Area: {} | estimated {} | effective {}",
        report.meta.input.area, report.meta.estimated_env, report.meta.effective_env
    );
    for (index, item) in report.items.iter().enumerate() {
        println!(
            "\nPhoto {}: {} ({:?}, confidence {:.2}, {:?})",
            index + 1,
            item.defect.kind,
            item.defect.severity,
            item.defect.confidence,
            item.source
        );
        if !item.defect.notes.is_empty() {
            println!("  notes: {}", item.defect.notes);
        }
        println!("  prep: {}", item.recommendation.surface_prep);
        for product in &item.recommendation.products {
            println!("  - {} {}", product.name, product.dft);
        }
    }
    println!("\n{}", report.disclaimer);
}

fn print_json(report: &InspectionReport) -> Result<(), AppError> {
    let rendered =
        serde_json::to_string_pretty(report).map_err(|err| AppError::Io(io::Error::other(err)))?;
    println!("{rendered}");
    Ok(())
}
