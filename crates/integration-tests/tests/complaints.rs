//! Integration tests for the complaint repository.
//!
//! These tests require:
//! - A running `PostgreSQL` database reachable via `COMPLAINTS_TEST_DATABASE_URL`
//!
//! Run with: cargo test -p complaint-desk-integration-tests -- --ignored

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::NaiveDate;
use complaint_desk_core::requests::{
    AddComplaint, AddResponse, ComplaintsByDateRange, ComplaintsByUser, DeleteComplaint,
    SearchByStatus,
};
use complaint_desk_core::{
    Complaint, ComplaintId, ComplaintStatus, ComplaintText, DateRange, UserId,
};
use complaint_desk_integration_tests::{TestContext, unique};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn add(ctx: &TestContext, user_id: UserId, description: &str) -> Complaint {
    ctx.repo
        .add_complaint(&AddComplaint {
            user_id,
            description: ComplaintText::parse(description).unwrap(),
        })
        .await
        .expect("add_complaint");

    ctx.repo
        .list_complaints()
        .await
        .expect("list_complaints")
        .into_iter()
        .find(|c| c.description == description)
        .expect("new complaint is listed")
}

async fn respond(ctx: &TestContext, complaint_id: ComplaintId, text: &str) {
    let admin_id = ctx.seed_admin().await;
    ctx.repo
        .add_response(&AddResponse {
            complaint_id,
            admin_id,
            response_text: ComplaintText::parse(text).unwrap(),
        })
        .await
        .expect("add_response");
}

// ============================================================================
// Mutations
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_add_complaint_is_listed_as_pending_today() {
    let ctx = TestContext::new().await;
    let (user_id, user_name) = ctx.seed_user("resident").await;
    let description = unique("Noisy neighbor");

    let complaint = add(&ctx, user_id, &description).await;

    assert_eq!(complaint.user_name, user_name);
    assert_eq!(complaint.status, ComplaintStatus::Pending);
    assert_eq!(complaint.submit_date, ctx.today().await);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_add_complaint_accepts_long_description() {
    let ctx = TestContext::new().await;
    let (user_id, _) = ctx.seed_user("resident").await;
    let description = format!("{} {}", unique("Long"), "word ".repeat(1_000).trim_end());

    let complaint = add(&ctx, user_id, &description).await;

    assert_eq!(complaint.description.chars().count(), description.chars().count());
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_add_complaint_unknown_user_fails() {
    let ctx = TestContext::new().await;

    let err = ctx
        .repo
        .add_complaint(&AddComplaint::parse("2147483647", "Ghost complaint").unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.operation(), "add_complaint");
    assert!(err.message().contains("not found"), "{err}");
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_add_response_resolves_complaint() {
    let ctx = TestContext::new().await;
    let (user_id, _) = ctx.seed_user("resident").await;
    let complaint = add(&ctx, user_id, &unique("Broken heater")).await;

    respond(&ctx, complaint.id, "Technician booked").await;

    let after = ctx.repo.list_complaints().await.unwrap();
    let updated = after.iter().find(|c| c.id == complaint.id).unwrap();
    assert_eq!(updated.status, ComplaintStatus::Resolved);
    assert_eq!(updated.submit_date, complaint.submit_date);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_second_response_keeps_resolved() {
    let ctx = TestContext::new().await;
    let (user_id, _) = ctx.seed_user("resident").await;
    let complaint = add(&ctx, user_id, &unique("Leaking tap")).await;

    respond(&ctx, complaint.id, "Plumber booked").await;
    respond(&ctx, complaint.id, "Plumber visited").await;

    let resolved = ctx
        .repo
        .search_by_status(&SearchByStatus {
            status: ComplaintStatus::Resolved,
        })
        .await
        .unwrap();
    assert!(resolved.iter().any(|c| c.id == complaint.id));
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_add_response_unknown_complaint_fails() {
    let ctx = TestContext::new().await;
    let admin_id = ctx.seed_admin().await;

    let err = ctx
        .repo
        .add_response(&AddResponse {
            complaint_id: ComplaintId::new(i32::MAX).unwrap(),
            admin_id,
            response_text: ComplaintText::parse("Hello?").unwrap(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.operation(), "add_response");
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_add_response_unknown_admin_fails() {
    let ctx = TestContext::new().await;
    let (user_id, _) = ctx.seed_user("resident").await;
    let complaint = add(&ctx, user_id, &unique("Unanswered")).await;

    let err = ctx
        .repo
        .add_response(&AddResponse::parse(&complaint.id.to_string(), "2147483647", "Hi").unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.operation(), "add_response");
    assert!(err.message().contains("not found"), "{err}");

    let after = ctx.repo.list_complaints().await.unwrap();
    let unchanged = after.iter().find(|c| c.id == complaint.id).unwrap();
    assert_eq!(unchanged.status, ComplaintStatus::Pending);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_submit_date_cannot_be_changed() {
    let ctx = TestContext::new().await;
    let (user_id, _) = ctx.seed_user("resident").await;
    let day = date(2002, 3, 4);
    let id = ctx.seed_complaint_on(user_id, &unique("Dated"), day).await;

    let err = ctx
        .update_submit_date(id, date(2002, 3, 5))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("cannot be changed"), "{err}");

    let found = ctx
        .repo
        .complaints_by_date_range(&ComplaintsByDateRange {
            range: DateRange::single_day(day),
        })
        .await
        .unwrap();
    assert!(found.iter().any(|c| c.id == id));
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_delete_removes_complaint_and_responses() {
    let ctx = TestContext::new().await;
    let (user_id, _) = ctx.seed_user("resident").await;
    let complaint = add(&ctx, user_id, &unique("Overflowing bins")).await;
    respond(&ctx, complaint.id, "Collection rescheduled").await;

    ctx.repo
        .delete_complaint(&DeleteComplaint {
            complaint_id: complaint.id,
        })
        .await
        .expect("delete_complaint");

    let after = ctx.repo.list_complaints().await.unwrap();
    assert!(after.iter().all(|c| c.id != complaint.id));
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_delete_unknown_complaint_fails() {
    let ctx = TestContext::new().await;

    let err = ctx
        .repo
        .delete_complaint(&DeleteComplaint::parse("9999999").unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.operation(), "delete_complaint");
    assert!(err.to_string().starts_with("delete_complaint failed: "));
}

// ============================================================================
// Queries
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_list_is_newest_first() {
    let ctx = TestContext::new().await;
    let (user_id, _) = ctx.seed_user("resident").await;
    ctx.seed_complaint_on(user_id, &unique("old"), date(2001, 1, 1))
        .await;
    ctx.seed_complaint_on(user_id, &unique("new"), date(2001, 1, 2))
        .await;

    let all = ctx.repo.list_complaints().await.unwrap();
    assert!(
        all.windows(2)
            .all(|w| (w[0].submit_date, w[0].id.as_i32()) >= (w[1].submit_date, w[1].id.as_i32()))
    );
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_status_searches_partition_the_list() {
    let ctx = TestContext::new().await;
    let (user_id, _) = ctx.seed_user("resident").await;
    let resolved = add(&ctx, user_id, &unique("Resolved one")).await;
    add(&ctx, user_id, &unique("Pending one")).await;
    respond(&ctx, resolved.id, "Done").await;

    let pending = ctx
        .repo
        .search_by_status(&SearchByStatus::parse("Pending").unwrap())
        .await
        .unwrap();
    let resolved = ctx
        .repo
        .search_by_status(&SearchByStatus::parse("Resolved").unwrap())
        .await
        .unwrap();
    let all = ctx.repo.list_complaints().await.unwrap();

    assert!(pending.iter().all(|c| c.status == ComplaintStatus::Pending));
    assert!(resolved.iter().all(|c| c.status == ComplaintStatus::Resolved));

    let mut union: Vec<i32> = pending
        .iter()
        .chain(&resolved)
        .map(|c| c.id.as_i32())
        .collect();
    let mut listed: Vec<i32> = all.iter().map(|c| c.id.as_i32()).collect();
    union.sort_unstable();
    listed.sort_unstable();
    assert_eq!(union, listed);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_complaints_by_user() {
    let ctx = TestContext::new().await;
    let (user_id, user_name) = ctx.seed_user("resident").await;
    let (other_id, _) = ctx.seed_user("neighbor").await;
    add(&ctx, user_id, &unique("Mine")).await;
    add(&ctx, other_id, &unique("Theirs")).await;

    let mine = ctx
        .repo
        .complaints_by_user(&ComplaintsByUser::from(user_id))
        .await
        .unwrap();

    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].user_name, user_name);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_complaints_by_user_without_complaints_is_empty() {
    let ctx = TestContext::new().await;
    let (user_id, _) = ctx.seed_user("quiet").await;

    let none = ctx
        .repo
        .complaints_by_user(&ComplaintsByUser::from(user_id))
        .await
        .unwrap();

    assert!(none.is_empty());
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_complaints_by_user_for_id_matching_no_user_is_empty() {
    let ctx = TestContext::new().await;
    let (user_id, _) = ctx.seed_user("resident").await;
    add(&ctx, user_id, &unique("Someone's complaint")).await;

    for raw in ["0", "-5", "3000000000"] {
        let request = ComplaintsByUser::parse(raw).unwrap();
        let found = ctx.repo.complaints_by_user(&request).await.unwrap();
        assert!(found.is_empty(), "user id {raw} matched {found:?}");
    }
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_date_range_is_inclusive() {
    let ctx = TestContext::new().await;
    let (user_id, _) = ctx.seed_user("resident").await;
    let before = ctx
        .seed_complaint_on(user_id, &unique("before"), date(1999, 12, 31))
        .await;
    let first = ctx
        .seed_complaint_on(user_id, &unique("first"), date(2000, 1, 1))
        .await;
    let last = ctx
        .seed_complaint_on(user_id, &unique("last"), date(2000, 1, 31))
        .await;
    let after = ctx
        .seed_complaint_on(user_id, &unique("after"), date(2000, 2, 1))
        .await;

    let range = DateRange::new(date(2000, 1, 1), date(2000, 1, 31)).unwrap();
    let found = ctx
        .repo
        .complaints_by_date_range(&ComplaintsByDateRange { range })
        .await
        .unwrap();
    let ids: Vec<ComplaintId> = found.iter().map(|c| c.id).collect();

    assert!(found.iter().all(|c| range.contains(c.submit_date)));
    assert!(ids.contains(&first));
    assert!(ids.contains(&last));
    assert!(!ids.contains(&before));
    assert!(!ids.contains(&after));
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_single_day_range() {
    let ctx = TestContext::new().await;
    let (user_id, _) = ctx.seed_user("resident").await;
    let day = date(2000, 6, 15);
    let same_day = ctx.seed_complaint_on(user_id, &unique("same"), day).await;
    ctx.seed_complaint_on(user_id, &unique("next"), date(2000, 6, 16))
        .await;

    let found = ctx
        .repo
        .complaints_by_date_range(&ComplaintsByDateRange {
            range: DateRange::single_day(day),
        })
        .await
        .unwrap();

    assert!(found.iter().all(|c| c.submit_date == day));
    assert!(found.iter().any(|c| c.id == same_day));
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_counts_sum_to_listing() {
    let ctx = TestContext::new().await;
    let (user_id, _) = ctx.seed_user("resident").await;
    let complaint = add(&ctx, user_id, &unique("Counted")).await;
    respond(&ctx, complaint.id, "Counted and resolved").await;
    add(&ctx, user_id, &unique("Still pending")).await;

    let counts = ctx.repo.count_by_status().await.unwrap();
    let all = ctx.repo.list_complaints().await.unwrap();

    assert_eq!(counts.total(), all.len() as u64);
    assert!(counts.get(ComplaintStatus::Pending) >= 1);
    assert!(counts.get(ComplaintStatus::Resolved) >= 1);
}
