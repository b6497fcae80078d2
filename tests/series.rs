mod common;

use chrono::{Duration, Utc};

use common::{class_request, days_ago, next_monday_evening, studio};
use rust_studio_schedule::config::BatchConfig;
use rust_studio_schedule::models::classes::requests::{MutationScope, UpdateClassRequest};
use rust_studio_schedule::schedule::series_horizon;
use rust_studio_schedule::services::{ClassSeriesService, EnrollmentService};

#[tokio::test]
async fn test_recurring_class_expands_to_weekly_series() {
    let studio = studio(BatchConfig::default(), 0).await;
    let service = ClassSeriesService::new(studio.storage.clone());
    let start = next_monday_evening();

    let created = service
        .create_class(class_request(&studio, start, true))
        .await
        .unwrap();

    assert!(created.len() >= 52);
    assert_eq!(created[0].starts_at, start);
    assert!(created[0].series_id.is_none());

    let series_id = created[1].series_id.clone().expect("later occurrences are linked");
    for pair in created.windows(2) {
        assert_eq!(pair[1].starts_at - pair[0].starts_at, Duration::days(7));
    }
    for class in &created[1..] {
        assert!(class.belongs_to_series(&series_id));
        assert!(class.starts_at < series_horizon(start));
        assert_eq!(class.title, "Monday Vinyasa");
        assert_eq!(class.max_students, 12);
    }

    let series = service.list_series(&series_id).await.unwrap();
    assert_eq!(series.len(), created.len() - 1);

    let upcoming = service.list_upcoming_classes(studio.school_id).await.unwrap();
    assert_eq!(upcoming.len(), created.len());
}

#[tokio::test]
async fn test_single_class_has_no_series() {
    let studio = studio(BatchConfig::default(), 0).await;
    let service = ClassSeriesService::new(studio.storage.clone());

    let created = service
        .create_class(class_request(&studio, next_monday_evening(), false))
        .await
        .unwrap();

    assert_eq!(created.len(), 1);
    assert!(created[0].series_id.is_none());
    assert!(!created[0].is_recurring);
}

#[tokio::test]
async fn test_invalid_request_stores_nothing() {
    let studio = studio(BatchConfig::default(), 0).await;
    let service = ClassSeriesService::new(studio.storage.clone());

    let mut request = class_request(&studio, next_monday_evening(), true);
    request.max_students = 0;

    let err = service.create_class(request).await.unwrap_err();
    assert_eq!(err.code(), "E004");
    assert!(
        service
            .list_upcoming_classes(studio.school_id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_enroll_from_third_occurrence_follows_series() {
    let studio = studio(BatchConfig::default(), 1).await;
    let classes = ClassSeriesService::new(studio.storage.clone());
    let enrollments = EnrollmentService::new(studio.storage.clone());
    let student = studio.student_ids[0];

    let created = classes
        .create_class(class_request(&studio, next_monday_evening(), true))
        .await
        .unwrap();

    let affected = enrollments
        .enroll(created[2].id, student, MutationScope::ThisAndFollowing)
        .await
        .unwrap();
    assert_eq!(affected.len(), created.len() - 2);

    let all = classes.list_upcoming_classes(studio.school_id).await.unwrap();
    assert!(!all[0].is_enrolled(student));
    assert!(!all[1].is_enrolled(student));
    assert!(all[2..].iter().all(|class| class.is_enrolled(student)));

    // 从第五节起取消
    enrollments
        .unenroll(created[4].id, student, MutationScope::ThisAndFollowing)
        .await
        .unwrap();

    let all = classes.list_upcoming_classes(studio.school_id).await.unwrap();
    assert!(all[2].is_enrolled(student));
    assert!(all[3].is_enrolled(student));
    assert!(all[4..].iter().all(|class| !class.is_enrolled(student)));
}

#[tokio::test]
async fn test_series_scope_on_first_occurrence_only_touches_it() {
    let studio = studio(BatchConfig::default(), 1).await;
    let classes = ClassSeriesService::new(studio.storage.clone());
    let enrollments = EnrollmentService::new(studio.storage.clone());
    let student = studio.student_ids[0];

    let created = classes
        .create_class(class_request(&studio, next_monday_evening(), true))
        .await
        .unwrap();
    let first = created[0].id;

    let updated = classes
        .update_class(
            first,
            UpdateClassRequest {
                title: Some("Opening Flow".to_string()),
                ..Default::default()
            },
            MutationScope::ThisAndFollowing,
        )
        .await
        .unwrap();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].title, "Opening Flow");

    let enrolled = enrollments
        .enroll(first, student, MutationScope::ThisAndFollowing)
        .await
        .unwrap();
    assert_eq!(enrolled.len(), 1);

    let all = classes.list_upcoming_classes(studio.school_id).await.unwrap();
    assert!(all[1..].iter().all(|c| c.title == "Monday Vinyasa"));
    assert!(all[1..].iter().all(|c| !c.is_enrolled(student)));

    let removed = classes
        .delete_class(first, MutationScope::ThisAndFollowing)
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(
        classes
            .list_upcoming_classes(studio.school_id)
            .await
            .unwrap()
            .len(),
        created.len() - 1
    );
}

#[tokio::test]
async fn test_update_and_delete_cut_off_at_now() {
    let studio = studio(BatchConfig::default(), 0).await;
    let classes = ClassSeriesService::new(studio.storage.clone());

    // 三周前开始：#1..#4 已经过去
    let created = classes
        .create_class(class_request(&studio, days_ago(21), true))
        .await
        .unwrap();
    let now = Utc::now();
    let future = created.iter().filter(|c| c.starts_at >= now).count();
    assert_eq!(future, created.len() - 4);

    let updated = classes
        .update_class(
            created[1].id,
            UpdateClassRequest {
                level: Some(rust_studio_schedule::models::classes::entities::ClassLevel::Advanced),
                ..Default::default()
            },
            MutationScope::ThisAndFollowing,
        )
        .await
        .unwrap();
    assert_eq!(updated.len(), future);
    assert!(updated.iter().all(|c| c.starts_at >= now));

    // 过去的课次保持不变
    let target = classes.get_class(created[1].id).await.unwrap();
    assert_eq!(target.level, created[1].level);

    let removed = classes
        .delete_class(created[1].id, MutationScope::ThisAndFollowing)
        .await
        .unwrap();
    assert_eq!(removed as usize, future);
    assert!(classes.get_class(created[1].id).await.is_ok());
    assert!(
        classes
            .list_upcoming_classes(studio.school_id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_enroll_cuts_off_at_target_occurrence() {
    let studio = studio(BatchConfig::default(), 1).await;
    let classes = ClassSeriesService::new(studio.storage.clone());
    let enrollments = EnrollmentService::new(studio.storage.clone());
    let student = studio.student_ids[0];

    let created = classes
        .create_class(class_request(&studio, days_ago(21), true))
        .await
        .unwrap();

    // 过去的第二节也包含在内
    let affected = enrollments
        .enroll(created[1].id, student, MutationScope::ThisAndFollowing)
        .await
        .unwrap();
    assert_eq!(affected.len(), created.len() - 1);
    assert!(affected.iter().all(|c| c.is_enrolled(student)));

    let first = classes.get_class(created[0].id).await.unwrap();
    assert!(!first.is_enrolled(student));
}

#[tokio::test]
async fn test_enrollment_is_idempotent() {
    let studio = studio(BatchConfig::default(), 2).await;
    let classes = ClassSeriesService::new(studio.storage.clone());
    let enrollments = EnrollmentService::new(studio.storage.clone());
    let (a, b) = (studio.student_ids[0], studio.student_ids[1]);

    let created = classes
        .create_class(class_request(&studio, next_monday_evening(), false))
        .await
        .unwrap();
    let id = created[0].id;

    enrollments
        .enroll(id, a, MutationScope::ThisOccurrence)
        .await
        .unwrap();
    let again = enrollments
        .enroll(id, a, MutationScope::ThisOccurrence)
        .await
        .unwrap();
    assert_eq!(again[0].enrolled_students.len(), 1);

    // 移除不在名单中的学员不报错
    let after = enrollments
        .unenroll(id, b, MutationScope::ThisOccurrence)
        .await
        .unwrap();
    assert_eq!(after[0].enrolled_students.len(), 1);
    assert!(after[0].is_enrolled(a));

    let cleared = enrollments
        .unenroll(id, a, MutationScope::ThisOccurrence)
        .await
        .unwrap();
    assert!(cleared[0].enrolled_students.is_empty());
}

#[tokio::test]
async fn test_patch_keeps_unnamed_fields() {
    let studio = studio(BatchConfig::default(), 0).await;
    let classes = ClassSeriesService::new(studio.storage.clone());

    let created = classes
        .create_class(class_request(&studio, next_monday_evening(), false))
        .await
        .unwrap();

    let updated = classes
        .update_class(
            created[0].id,
            UpdateClassRequest {
                max_students: Some(20),
                ..Default::default()
            },
            MutationScope::ThisOccurrence,
        )
        .await
        .unwrap();

    assert_eq!(updated[0].max_students, 20);
    assert_eq!(updated[0].title, created[0].title);
    assert_eq!(updated[0].description, created[0].description);
    assert_eq!(updated[0].starts_at, created[0].starts_at);

    let err = classes
        .update_class(
            created[0].id,
            UpdateClassRequest::default(),
            MutationScope::ThisOccurrence,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E004");
}

#[tokio::test]
async fn test_deleted_class_leaves_upcoming_list() {
    let studio = studio(BatchConfig::default(), 1).await;
    let classes = ClassSeriesService::new(studio.storage.clone());
    let enrollments = EnrollmentService::new(studio.storage.clone());

    let created = classes
        .create_class(class_request(&studio, next_monday_evening(), true))
        .await
        .unwrap();
    let doomed = created[3].id;
    enrollments
        .enroll(doomed, studio.student_ids[0], MutationScope::ThisOccurrence)
        .await
        .unwrap();

    let removed = classes
        .delete_class(doomed, MutationScope::ThisOccurrence)
        .await
        .unwrap();
    assert_eq!(removed, 1);

    let upcoming = classes.list_upcoming_classes(studio.school_id).await.unwrap();
    assert_eq!(upcoming.len(), created.len() - 1);
    assert!(upcoming.iter().all(|c| c.id != doomed));
}

#[tokio::test]
async fn test_missing_class_is_not_found() {
    let studio = studio(BatchConfig::default(), 1).await;
    let classes = ClassSeriesService::new(studio.storage.clone());
    let enrollments = EnrollmentService::new(studio.storage.clone());

    assert_eq!(classes.get_class(9999).await.unwrap_err().code(), "E005");
    assert_eq!(
        classes
            .delete_class(9999, MutationScope::ThisOccurrence)
            .await
            .unwrap_err()
            .code(),
        "E005"
    );
    assert_eq!(
        enrollments
            .enroll(9999, studio.student_ids[0], MutationScope::ThisAndFollowing)
            .await
            .unwrap_err()
            .code(),
        "E005"
    );
}

#[tokio::test]
async fn test_fractional_start_keeps_occurrences_in_range() {
    let studio = studio(BatchConfig::default(), 0).await;
    let classes = ClassSeriesService::new(studio.storage.clone());
    let start = next_monday_evening() + Duration::milliseconds(500);

    let created = classes
        .create_class(class_request(&studio, start, true))
        .await
        .unwrap();

    let horizon = series_horizon(start);
    assert!(created.len() >= 52);
    assert!(created.iter().all(|c| c.starts_at >= start && c.starts_at < horizon));
    assert_eq!(created[0].starts_at, next_monday_evening() + Duration::seconds(1));

    let single = classes
        .create_class(class_request(&studio, start, false))
        .await
        .unwrap();
    assert!(single[0].starts_at >= start);
}

#[tokio::test]
async fn test_description_can_be_cleared() {
    let studio = studio(BatchConfig::default(), 0).await;
    let classes = ClassSeriesService::new(studio.storage.clone());

    let created = classes
        .create_class(class_request(&studio, next_monday_evening(), true))
        .await
        .unwrap();

    let updated = classes
        .update_class(
            created[1].id,
            UpdateClassRequest {
                description: Some(None),
                ..Default::default()
            },
            MutationScope::ThisAndFollowing,
        )
        .await
        .unwrap();
    assert_eq!(updated.len(), created.len() - 1);
    assert!(updated.iter().all(|c| c.description.is_none()));

    let first = classes.get_class(created[0].id).await.unwrap();
    assert_eq!(first.description.as_deref(), Some("Strong flow"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_series_enrollments_converge() {
    let studio = studio(BatchConfig::default(), 4).await;
    let classes = ClassSeriesService::new(studio.storage.clone());
    let enrollments = EnrollmentService::new(studio.storage.clone());

    let created = classes
        .create_class(class_request(&studio, next_monday_evening(), true))
        .await
        .unwrap();
    let target = created[1].id;

    let handles: Vec<_> = studio
        .student_ids
        .iter()
        .map(|&student| {
            let enrollments = enrollments.clone();
            tokio::spawn(async move {
                enrollments
                    .enroll(target, student, MutationScope::ThisAndFollowing)
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let all = classes.list_upcoming_classes(studio.school_id).await.unwrap();
    assert!(all[0].enrolled_students.is_empty());
    for class in &all[1..] {
        assert_eq!(class.enrolled_students.len(), studio.student_ids.len());
        assert!(studio.student_ids.iter().all(|&s| class.is_enrolled(s)));
    }
}
