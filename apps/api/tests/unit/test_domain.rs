use chrono::{Duration, TimeZone, Utc};
use vibe_index_api::domain::{
    project::{
        entity::Project,
        listing::{DEFAULT_LIMIT, ListingQuery, MAX_LIMIT, SortOption, TimeRange},
        value_objects::{Category, NewProject},
    },
    shared::pagination::PaginatedResponse,
};

fn submission(title: &str, category: &str) -> NewProject {
    NewProject::new(
        title,
        "Glowing things for the web",
        category,
        "https://github.com/example/project",
        None,
    )
    .expect("valid submission")
}

#[test]
fn categories_round_trip_through_display_names() {
    for category in Category::ALL {
        let parsed: Category = category.as_str().parse().expect("display name parses");
        assert_eq!(parsed, category);
    }
    assert!("Games".parse::<Category>().is_err());
}

#[test]
fn submission_rejects_non_http_urls() {
    assert!(NewProject::new("A", "B", "Other", "ftp://example.com", None).is_err());
    assert!(NewProject::new("A", "B", "Other", "javascript:alert(1)", None).is_err());
    assert!(NewProject::new("A", "B", "Other", "https://example.com", Some("not a url")).is_err());
}

#[test]
fn submission_enforces_length_bounds() {
    assert!(NewProject::new(&"t".repeat(100), "d", "Other", "https://a.dev", None).is_ok());
    assert!(NewProject::new(&"t".repeat(101), "d", "Other", "https://a.dev", None).is_err());
    assert!(NewProject::new("t", &"d".repeat(1001), "Other", "https://a.dev", None).is_err());
}

#[test]
fn new_projects_start_with_zero_counters() {
    let now = Utc::now();
    let project = Project::from_submission(submission("GlowKit", "UI Effects"), now);
    assert_eq!(project.views, 0);
    assert_eq!(project.likes_count, 0);
    assert_eq!(project.category, "UI Effects");
    assert_eq!(project.created_at, now);
}

#[test]
fn listing_defaults_are_safe_and_stable() {
    let query = ListingQuery::default();
    assert_eq!(query.limit, DEFAULT_LIMIT);
    assert_eq!(query.offset, 0);
    assert_eq!(query.sort, SortOption::MostLiked);
    assert_eq!(query.time_range, TimeRange::AllTime);

    let clamped = ListingQuery::new(None, None, SortOption::Newest, TimeRange::AllTime, Some(10_000), Some(-4));
    assert_eq!(clamped.limit, MAX_LIMIT);
    assert_eq!(clamped.offset, 0);
}

#[test]
fn time_ranges_bound_creation_date() {
    let now = Utc.with_ymd_and_hms(2025, 3, 15, 18, 30, 0).unwrap();
    assert_eq!(TimeRange::AllTime.cutoff(now), None);
    assert_eq!(
        TimeRange::Today.cutoff(now),
        Some(Utc.with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap())
    );
    assert_eq!(TimeRange::ThisWeek.cutoff(now), Some(now - Duration::days(7)));
    assert_eq!(TimeRange::ThisMonth.cutoff(now), Some(now - Duration::days(30)));
}

#[test]
fn search_is_case_insensitive_across_fields() {
    let now = Utc::now();
    let project = Project::from_submission(submission("NeonShadow", "UI Effects"), now);

    for needle in ["neon", "GLOWING", "ui eff"] {
        let query = ListingQuery::new(Some(needle), None, SortOption::default(), TimeRange::AllTime, None, None);
        assert!(query.matches(&project, now), "expected {needle} to match");
    }
    let miss = ListingQuery::new(Some("audio"), None, SortOption::default(), TimeRange::AllTime, None, None);
    assert!(!miss.matches(&project, now));
}

#[test]
fn apply_reports_total_before_pagination() {
    let now = Utc::now();
    let projects: Vec<Project> = (0..5)
        .map(|i| {
            let mut p = Project::from_submission(submission(&format!("P{i}"), "Other"), now - Duration::hours(i));
            p.views = i * 10;
            p
        })
        .collect();

    let query = ListingQuery::new(None, None, SortOption::MostViewed, TimeRange::AllTime, Some(2), Some(1));
    let (page, total) = query.apply(projects, now);
    assert_eq!(total, 5);
    let views: Vec<i64> = page.iter().map(|p| p.views).collect();
    assert_eq!(views, vec![30, 20]);
}

#[test]
fn paginated_response_serializes_flat_fields() {
    let page: PaginatedResponse<u8> = PaginatedResponse {
        items: vec![1, 2],
        total: 2,
        limit: 50,
        offset: 0,
    };
    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["items"], serde_json::json!([1, 2]));
    assert_eq!(json["total"], 2);
}
