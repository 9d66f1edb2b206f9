use std::process;

use stylist::api;
use stylist::cli::{Command, USAGE};
use stylist::pipeline::build_analysis_service;
use stylist::pipeline::services::styling::{CompletionRequest, StylingPrompt};
use stylist::{AppError, Settings, StylingRequest};
use tracing::info;

fn init_logging(settings: &Settings) {
    tracing_subscriber::fmt()
        .with_max_level(settings.tracing_level())
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("Error: {message}\n\n{USAGE}");
            process::exit(2);
        }
    };

    let settings = Settings::load()?;
    init_logging(&settings);

    match command {
        Command::Help => println!("{USAGE}"),
        Command::Analyze { image } => {
            info!("Analyzing {}", image.display());
            let bytes = tokio::fs::read(&image).await?;
            let mut service = build_analysis_service(&settings.service)?;

            let response = api::analyze(&mut service, Some(bytes)).await;
            if !response.is_success() {
                eprintln!("{}", response.body);
                process::exit(1);
            }
            println!("{}", response.body);
        }
        Command::Prompt {
            image,
            occasion,
            aesthetic,
            preferences,
        } => {
            let bytes = tokio::fs::read(&image).await?;
            let mut service = build_analysis_service(&settings.service)?;

            let result = match api::classify(&mut service, Some(bytes)).await {
                Ok(result) => result,
                Err(response) => {
                    eprintln!("{}", response.body);
                    process::exit(1);
                }
            };

            let mut request = StylingRequest::from_classification(&result);
            if let Some(occasion) = occasion {
                request = request.with_occasion(occasion);
            }
            if let Some(aesthetic) = aesthetic {
                request = request.with_aesthetic(aesthetic);
            }
            if let Some(preferences) = preferences {
                request = request.with_preferences(preferences);
            }

            let prompt = StylingPrompt::render(&request, settings.recommendation.outfit_count);
            let completion = CompletionRequest::styling(&settings.recommendation, prompt);
            println!("{}", completion.to_json()?);
        }
    }

    Ok(())
}
