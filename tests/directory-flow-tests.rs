use crate::common::{bootcamp_aggregate, setup, test_bootcamp, test_course};

mod common;
use campdir::*;

// The full lifecycle a directory backend runs per request cycle: create a
// bootcamp, attach courses (aggregate follows), delete one (aggregate
// settles), then read the collection back through the translated query.
#[tokio::test]
async fn bootcamp_course_lifecycle() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let db = setup()?;
    let rule = CampdirAggregateRule::average_cost();

    let bootcamp = db
        .create_obj::<_, Bootcamp, &str>("bootcamps", None, &test_bootcamp("Devworks", 1))
        .await?;
    let bootcamp_id = bootcamp.id.expect("store assigns an id");

    create_child_obj(
        &db,
        &rule,
        None,
        &test_course("Front End", 1000.0, &bootcamp_id, 1),
    )
    .await?;
    let pricey = create_child_obj(
        &db,
        &rule,
        None,
        &test_course("Data Science", 2000.0, &bootcamp_id, 2),
    )
    .await?;

    assert_eq!(
        bootcamp_aggregate(&db, &bootcamp_id, "averageCost").await,
        Some(1500.0)
    );

    // While both courses qualify, the tuition-descending single-row window
    // returns the pricey one and advertises a next page.
    let raw: CampdirRawQuery = [
        ("tuition[gte]", "500"),
        ("sort", "-tuition"),
        ("page", "1"),
        ("limit", "1"),
    ]
    .into_iter()
    .collect();

    let listing = run_list_view_obj::<_, Course>(&db, "courses", &raw).await?;
    assert_eq!(listing.count, 1);
    assert_eq!(listing.data[0].title, "Data Science");
    assert_eq!(listing.pagination.next, Some(CampdirPageRef::new(2, 1)));
    assert_eq!(listing.pagination.prev, None);

    delete_child(&db, &rule, pricey.id.as_deref().unwrap()).await?;
    assert_eq!(
        bootcamp_aggregate(&db, &bootcamp_id, "averageCost").await,
        Some(1000.0)
    );

    let listing = run_list_view_obj::<_, Course>(&db, "courses", &raw).await?;
    assert_eq!(listing.count, 1);
    assert_eq!(listing.data[0].title, "Front End");
    assert_eq!(listing.pagination.next, None);

    Ok(())
}

#[tokio::test]
async fn removing_a_bootcamp_cascades_to_courses(
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let db = setup()?;
    let rule = CampdirAggregateRule::average_cost();

    let keep = db
        .create_obj::<_, Bootcamp, &str>("bootcamps", None, &test_bootcamp("Devworks", 1))
        .await?
        .id
        .expect("store assigns an id");
    let doomed = db
        .create_obj::<_, Bootcamp, &str>("bootcamps", None, &test_bootcamp("ModernTech", 2))
        .await?
        .id
        .expect("store assigns an id");

    create_child_obj(&db, &rule, None, &test_course("A", 1000.0, &keep, 1)).await?;
    create_child_obj(&db, &rule, None, &test_course("B", 2000.0, &doomed, 2)).await?;
    create_child_obj(&db, &rule, None, &test_course("C", 3000.0, &doomed, 3)).await?;

    db.delete_by_id("bootcamps", doomed.as_str()).await?;
    let removed = db
        .delete_children_of("courses", "bootcamp", doomed.as_str())
        .await?;

    assert_eq!(removed, 2);
    assert_eq!(db.count_docs("courses").await?, 1);
    assert_eq!(db.count_docs("bootcamps").await?, 1);

    Ok(())
}

#[tokio::test]
async fn equality_filters_match_career_membership(
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let db = setup()?;

    let mut web = test_bootcamp("Devworks", 1);
    web.careers = vec![Career::WebDevelopment, Career::UiUx];
    let mut biz = test_bootcamp("Bizcamp", 2);
    biz.careers = vec![Career::Business];

    db.create_obj::<_, Bootcamp, &str>("bootcamps", None, &web).await?;
    db.create_obj::<_, Bootcamp, &str>("bootcamps", None, &biz).await?;

    // Equality against an array-valued field matches membership.
    let raw: CampdirRawQuery = [("careers", "UI/UX")].into_iter().collect();
    let listing = run_list_view_obj::<_, Bootcamp>(&db, "bootcamps", &raw).await?;
    assert_eq!(listing.count, 1);
    assert_eq!(listing.data[0].name, "Devworks");

    // `in` with repeated values intersects.
    let mut raw = CampdirRawQuery::new();
    raw.push_many("careers[in]", ["Business", "Data Science"]);
    let listing = run_list_view_obj::<_, Bootcamp>(&db, "bootcamps", &raw).await?;
    assert_eq!(listing.count, 1);
    assert_eq!(listing.data[0].name, "Bizcamp");

    Ok(())
}
