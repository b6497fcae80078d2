mod common;

use common::memory_storage;
use rust_studio_schedule::config::BatchConfig;
use rust_studio_schedule::models::schools::requests::CreateSchoolRequest;
use rust_studio_schedule::models::users::{
    entities::UserRole,
    requests::{ChangePasswordRequest, RegisterUserRequest},
};
use rust_studio_schedule::services::AccountService;

fn registration(email: &str, role: UserRole) -> RegisterUserRequest {
    RegisterUserRequest {
        email: email.to_string(),
        name: "Ana Flores".to_string(),
        password: "Sunrise2Salute".to_string(),
        role,
    }
}

fn school_request() -> CreateSchoolRequest {
    CreateSchoolRequest {
        name: "Cedar Yoga".to_string(),
        address: "4 Mill Lane".to_string(),
        email: "desk@cedar.example".to_string(),
        logo: None,
        instagram: None,
    }
}

#[tokio::test]
async fn test_register_and_sign_in() {
    let accounts = AccountService::new(memory_storage(BatchConfig::default()).await);

    let user = accounts
        .register_user(registration("ana@cedar.example", UserRole::Student))
        .await
        .unwrap();
    assert_ne!(user.password_hash, "Sunrise2Salute");
    assert!(user.school_id.is_none());

    let session = accounts
        .sign_in("ana@cedar.example", "Sunrise2Salute")
        .await
        .unwrap();
    assert_eq!(session.user_id, user.id);

    let err = accounts
        .sign_in("ana@cedar.example", "wrong-password")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E006");

    let err = accounts
        .sign_in("nobody@cedar.example", "Sunrise2Salute")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E006");
}

#[tokio::test]
async fn test_registration_rules() {
    let accounts = AccountService::new(memory_storage(BatchConfig::default()).await);

    accounts
        .register_user(registration("ana@cedar.example", UserRole::Student))
        .await
        .unwrap();

    let duplicate = accounts
        .register_user(registration("ana@cedar.example", UserRole::Teacher))
        .await
        .unwrap_err();
    assert_eq!(duplicate.code(), "E004");

    let mut weak = registration("weak@cedar.example", UserRole::Student);
    weak.password = "short".to_string();
    assert_eq!(accounts.register_user(weak).await.unwrap_err().code(), "E004");

    let bad_email = registration("not-an-email", UserRole::Student);
    assert_eq!(
        accounts.register_user(bad_email).await.unwrap_err().code(),
        "E004"
    );
}

#[tokio::test]
async fn test_school_membership() {
    let accounts = AccountService::new(memory_storage(BatchConfig::default()).await);

    let teacher = accounts
        .register_user(registration("mira@cedar.example", UserRole::Teacher))
        .await
        .unwrap();
    let student = accounts
        .register_user(registration("ana@cedar.example", UserRole::Student))
        .await
        .unwrap();
    let teacher_session = accounts
        .sign_in("mira@cedar.example", "Sunrise2Salute")
        .await
        .unwrap();
    let student_session = accounts
        .sign_in("ana@cedar.example", "Sunrise2Salute")
        .await
        .unwrap();

    // 学员不能创建学校
    let err = accounts
        .create_school(Some(&student_session), school_request())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E004");

    let err = accounts
        .create_school(None, school_request())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E006");

    let school = accounts
        .create_school(Some(&teacher_session), school_request())
        .await
        .unwrap();
    assert!(school.teacher_ids.contains(&teacher.id));

    let joined = accounts
        .join_school(Some(&student_session), school.id)
        .await
        .unwrap();
    assert_eq!(joined.school_id, Some(school.id));

    let second = accounts
        .register_user(registration("sam@cedar.example", UserRole::Teacher))
        .await
        .unwrap();
    let school = accounts
        .assign_teacher(Some(&teacher_session), school.id, second.id)
        .await
        .unwrap();
    assert_eq!(school.teacher_ids.len(), 2);

    let err = accounts
        .assign_teacher(Some(&teacher_session), school.id, student.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E004");

    // 只有本校教师可以添加教师
    let err = accounts
        .assign_teacher(Some(&student_session), school.id, second.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E006");

    accounts
        .register_user(registration("lee@elm.example", UserRole::Teacher))
        .await
        .unwrap();
    let outsider_session = accounts
        .sign_in("lee@elm.example", "Sunrise2Salute")
        .await
        .unwrap();
    let other = accounts
        .create_school(
            Some(&outsider_session),
            CreateSchoolRequest {
                name: "Elm Pilates".to_string(),
                ..school_request()
            },
        )
        .await
        .unwrap();
    assert_ne!(other.id, school.id);

    let err = accounts
        .assign_teacher(Some(&outsider_session), school.id, second.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E006");

    let err = accounts
        .assign_teacher(None, school.id, second.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E006");

    let err = accounts
        .join_school(Some(&student_session), 9999)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E005");
}

#[tokio::test]
async fn test_credential_changes_require_current_password() {
    let accounts = AccountService::new(memory_storage(BatchConfig::default()).await);

    accounts
        .register_user(registration("ana@cedar.example", UserRole::Student))
        .await
        .unwrap();
    let session = accounts
        .sign_in("ana@cedar.example", "Sunrise2Salute")
        .await
        .unwrap();

    let err = accounts
        .change_email(Some(&session), "wrong-password", "ana@new.example")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E006");

    let user = accounts
        .change_email(Some(&session), "Sunrise2Salute", "ana@new.example")
        .await
        .unwrap();
    assert_eq!(user.email, "ana@new.example");

    let mismatch = ChangePasswordRequest {
        current_password: "Sunrise2Salute".to_string(),
        new_password: "Moonlight4Flow".to_string(),
        confirm_password: "Moonlight5Flow".to_string(),
    };
    assert_eq!(
        accounts
            .change_password(Some(&session), mismatch)
            .await
            .unwrap_err()
            .code(),
        "E004"
    );

    let wrong_current = ChangePasswordRequest {
        current_password: "Sunset2Salute".to_string(),
        new_password: "Moonlight4Flow".to_string(),
        confirm_password: "Moonlight4Flow".to_string(),
    };
    assert_eq!(
        accounts
            .change_password(Some(&session), wrong_current)
            .await
            .unwrap_err()
            .code(),
        "E006"
    );

    accounts
        .change_password(
            Some(&session),
            ChangePasswordRequest {
                current_password: "Sunrise2Salute".to_string(),
                new_password: "Moonlight4Flow".to_string(),
                confirm_password: "Moonlight4Flow".to_string(),
            },
        )
        .await
        .unwrap();

    assert!(
        accounts
            .sign_in("ana@new.example", "Moonlight4Flow")
            .await
            .is_ok()
    );

    let renamed = accounts
        .update_profile(Some(&session), "Ana F.")
        .await
        .unwrap();
    assert_eq!(renamed.name, "Ana F.");

    assert_eq!(
        accounts
            .update_profile(None, "Nobody")
            .await
            .unwrap_err()
            .code(),
        "E006"
    );
}
