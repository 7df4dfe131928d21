use crate::common::{setup, test_bootcamp, test_course};
use futures::stream::BoxStream;
use futures::StreamExt;

mod common;
use campdir::*;

#[tokio::test]
async fn default_listing_is_newest_first() -> Result<(), Box<dyn std::error::Error + Send + Sync>>
{
    let db = setup()?;

    for (name, day) in [("Devworks", 1), ("ModernTech", 15), ("Codemasters", 8)] {
        db.create_obj::<_, Bootcamp, &str>("bootcamps", None, &test_bootcamp(name, day))
            .await?;
    }

    let listing = run_list_view(&db, "bootcamps", &CampdirRawQuery::new()).await?;

    assert!(listing.success);
    assert_eq!(listing.count, 3);
    assert_eq!(listing.pagination, CampdirPagination::default());

    let names: Vec<&str> = listing
        .data
        .iter()
        .map(|doc| doc.field("name").and_then(|v| v.as_str()).unwrap())
        .collect();
    assert_eq!(names, vec!["ModernTech", "Codemasters", "Devworks"]);

    Ok(())
}

#[tokio::test]
async fn operator_filters_narrow_the_listing(
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let db = setup()?;

    for (title, tuition, day) in [
        ("Front End", 8000.0, 1),
        ("Back End", 10000.0, 2),
        ("Data Science", 14000.0, 3),
        ("Intro", 400.0, 4),
    ] {
        db.create_obj::<_, Course, &str>(
            "courses",
            None,
            &test_course(title, tuition, "bootcamp-1", day),
        )
        .await?;
    }

    let raw: CampdirRawQuery = [
        ("tuition[gte]", "1000"),
        ("tuition[lte]", "12000"),
        ("sort", "tuition"),
    ]
    .into_iter()
    .collect();

    let listing = run_list_view_obj::<_, Course>(&db, "courses", &raw).await?;

    let titles: Vec<&str> = listing.data.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Front End", "Back End"]);

    Ok(())
}

#[tokio::test]
async fn selection_projects_fields() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let db = setup()?;

    db.create_obj::<_, Course, &str>(
        "courses",
        None,
        &test_course("Front End", 8000.0, "bootcamp-1", 1),
    )
    .await?;

    let raw: CampdirRawQuery = [("select", "title,tuition")].into_iter().collect();
    let listing = run_list_view(&db, "courses", &raw).await?;

    assert_eq!(listing.count, 1);
    let doc = &listing.data[0];
    assert!(doc.field("title").is_some());
    assert!(doc.field("tuition").is_some());
    assert!(doc.field("description").is_none());
    assert!(doc.field("weeks").is_none());

    Ok(())
}

#[tokio::test]
async fn pagination_walks_the_collection() -> Result<(), Box<dyn std::error::Error + Send + Sync>>
{
    let db = setup()?;

    for day in 1..=5 {
        db.create_obj::<_, Course, &str>(
            "courses",
            None,
            &test_course(&format!("Course {}", day), 1000.0 * day as f64, "bootcamp-1", day),
        )
        .await?;
    }

    let raw: CampdirRawQuery = [("sort", "tuition"), ("page", "2"), ("limit", "2")]
        .into_iter()
        .collect();
    let listing = run_list_view_obj::<_, Course>(&db, "courses", &raw).await?;

    assert_eq!(listing.count, 2);
    let tuitions: Vec<f64> = listing.data.iter().map(|c| c.tuition).collect();
    assert_eq!(tuitions, vec![3000.0, 4000.0]);
    assert_eq!(listing.pagination.next, Some(CampdirPageRef::new(3, 2)));
    assert_eq!(listing.pagination.prev, Some(CampdirPageRef::new(1, 2)));

    Ok(())
}

#[tokio::test]
async fn streaming_and_typed_reads_match_the_doc_reads(
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let db = setup()?;

    for (title, tuition, day) in [("Front End", 8000.0, 1), ("Back End", 10000.0, 2)] {
        db.create_obj::<_, Course, &str>(
            "courses",
            None,
            &test_course(title, tuition, "bootcamp-1", day),
        )
        .await?;
    }

    let params = CampdirQueryParams::new("courses".to_string()).with_order_by(vec![
        CampdirQueryOrder::new("tuition".to_string(), CampdirQueryDirection::Descending),
    ]);

    let doc_stream: BoxStream<CampdirDocument> = db.stream_query_doc(params.clone()).await?;
    let streamed: Vec<CampdirDocument> = doc_stream.collect().await;
    assert_eq!(streamed, db.query_doc(params.clone()).await?);

    let typed: Vec<Course> = db.query_obj(params).await?;
    let titles: Vec<&str> = typed.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Back End", "Front End"]);

    Ok(())
}

#[tokio::test]
async fn control_keys_never_filter() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let db = setup()?;

    db.create_obj::<_, Bootcamp, &str>("bootcamps", None, &test_bootcamp("Devworks", 1))
        .await?;

    // None of these documents carry `select`/`sort`/`page`/`limit` fields;
    // if the control keys leaked into the filter nothing would match.
    let raw: CampdirRawQuery = [
        ("select", "name"),
        ("sort", "-name"),
        ("page", "1"),
        ("limit", "10"),
    ]
    .into_iter()
    .collect();

    let listing = run_list_view(&db, "bootcamps", &raw).await?;
    assert_eq!(listing.count, 1);

    Ok(())
}

#[tokio::test]
async fn totals_are_fetched_fresh_per_request(
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let db = setup()?;

    let raw: CampdirRawQuery = [("limit", "1")].into_iter().collect();

    db.create_obj::<_, Bootcamp, &str>("bootcamps", None, &test_bootcamp("Devworks", 1))
        .await?;
    let listing = run_list_view(&db, "bootcamps", &raw).await?;
    assert_eq!(listing.pagination.next, None);

    db.create_obj::<_, Bootcamp, &str>("bootcamps", None, &test_bootcamp("ModernTech", 2))
        .await?;
    let listing = run_list_view(&db, "bootcamps", &raw).await?;
    assert_eq!(listing.pagination.next, Some(CampdirPageRef::new(2, 1)));

    Ok(())
}

#[tokio::test]
async fn listing_envelope_serializes_to_the_wire_shape(
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let db = setup()?;

    db.create_obj::<_, Bootcamp, &str>("bootcamps", None, &test_bootcamp("Devworks", 1))
        .await?;

    let listing = run_list_view(&db, "bootcamps", &CampdirRawQuery::new()).await?;
    let json = serde_json::to_value(&listing)?;

    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 1);
    assert_eq!(json["pagination"], serde_json::json!({}));
    assert_eq!(json["data"][0]["name"], "Devworks");
    assert!(json["data"][0]["id"].is_string());

    Ok(())
}

#[tokio::test]
async fn item_envelope_wraps_single_documents(
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let db = setup()?;

    let created = db
        .create_obj::<_, Bootcamp, &str>("bootcamps", None, &test_bootcamp("Devworks", 1))
        .await?;
    let id = created.id.expect("store assigns an id");

    let fetched: Bootcamp = db
        .get_obj_by_id("bootcamps", id.as_str())
        .await?
        .expect("bootcamp must exist");

    let json = serde_json::to_value(CampdirItemResponse::new(fetched))?;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["name"], "Devworks");

    Ok(())
}
