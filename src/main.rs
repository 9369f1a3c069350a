use brainboost_client::domain;
use brainboost_client::store::{CourseStore, HttpCourseStore, StoreConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "brainboost_client=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url = std::env::var("BRAINBOOST_API_URL")
        .unwrap_or_else(|_| "http://localhost:8080/api".to_string());
    info!("connecting to course store at {}", base_url);

    let store = HttpCourseStore::new(StoreConfig::new(base_url))?;
    let courses = store.list_courses().await?;

    info!("fetched {} courses", courses.len());
    for course in &courses {
        info!(
            "{} - {} [{}{}]",
            course.id,
            course.name,
            domain::progress_label(course),
            if course.enrolled { ", enrolled" } else { "" },
        );
    }

    let summary = domain::enrollment_summary(&courses);
    info!(
        "enrolled in {} ({} completed, mean progress {}%)",
        summary.enrolled, summary.completed, summary.mean_progress
    );

    Ok(())
}
