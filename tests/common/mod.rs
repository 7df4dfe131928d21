use campdir::*;
use chrono::{TimeZone, Utc};

#[allow(dead_code)]
pub fn setup() -> Result<CampdirMemoryStore, Box<dyn std::error::Error + Send + Sync>> {
    // Logging with debug enabled; later tests in the same process reuse the
    // first subscriber.
    let filter = tracing_subscriber::EnvFilter::builder().parse("info,campdir=debug")?;

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(CampdirMemoryStore::new())
}

#[allow(dead_code)]
pub fn test_bootcamp(name: &str, day: u32) -> Bootcamp {
    Bootcamp {
        created_at: Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap(),
        careers: vec![Career::WebDevelopment],
        ..Bootcamp::new(name.to_string(), format!("{} description", name))
    }
}

#[allow(dead_code)]
pub fn test_course(title: &str, tuition: f64, bootcamp_id: &str, day: u32) -> Course {
    Course {
        created_at: Utc.with_ymd_and_hms(2024, 4, day, 9, 0, 0).unwrap(),
        ..Course::new(
            title.to_string(),
            format!("{} description", title),
            "8".to_string(),
            tuition,
            bootcamp_id.to_string(),
        )
    }
}

#[allow(dead_code)]
pub fn test_review(title: &str, rating: f64, bootcamp_id: &str, user: &str) -> Review {
    Review::new(
        title.to_string(),
        format!("{} text", title),
        rating,
        bootcamp_id.to_string(),
        user.to_string(),
    )
}

#[allow(dead_code)]
pub async fn bootcamp_aggregate(
    db: &CampdirMemoryStore,
    bootcamp_id: &str,
    field: &str,
) -> Option<f64> {
    db.get_doc_by_id("bootcamps", bootcamp_id)
        .await
        .expect("bootcamp lookup must not fail")
        .and_then(|doc| doc.field(field).and_then(|v| v.as_number()))
}
