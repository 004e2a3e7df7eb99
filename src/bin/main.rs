use tracing::info;
use tracing_subscriber::EnvFilter;
use wellness_navigator::{
    models::{CoachRequest, CoachState},
    workflow::{build_response, CoachWorkflow},
};

const USAGE: &str = "usage: coach <message> [goal] [activity_level] [primary_metric]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(message) = args.next() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    let request = CoachRequest {
        user_name: std::env::var("USER").unwrap_or_else(|_| "cli".to_string()),
        message,
        goal: args.next(),
        activity_level: args.next(),
        primary_metric: args.next(),
        focus_area: None,
    };

    // Dry run: nothing is persisted from the command line.
    let workflow = CoachWorkflow::without_store();

    info!(message = %request.message, "Running coaching workflow");

    let mut state = CoachState::from(request);
    let path = workflow.run(&mut state).await;
    let response = build_response(&state);

    println!("\n=== COACH RESPONSE ===");
    println!("{}", serde_json::to_string_pretty(&response)?);
    println!("\nPath:");
    for (i, node) in path.iter().enumerate() {
        println!("  {}: {}", i + 1, node);
    }

    Ok(())
}
