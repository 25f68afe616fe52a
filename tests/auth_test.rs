mod common;

use common::setup;
use reclamo_backend::errors::InternalError;
use reclamo_backend::services::TokenService;
use reclamo_backend::types::internal::complaint::Role;

#[tokio::test]
async fn register_and_verify_round_trip() {
    let env = setup().await;

    let user_id = env
        .credentials
        .add_user("vecina".to_string(), "correct horse".to_string(), Role::Citizen)
        .await
        .expect("registration succeeds");

    let (verified_id, role) = env
        .credentials
        .verify_credentials("vecina", "correct horse")
        .await
        .expect("credentials verify");
    assert_eq!(verified_id, user_id);
    assert_eq!(role, Role::Citizen);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let env = setup().await;
    env.credentials
        .add_user("vecina".to_string(), "correct horse".to_string(), Role::Citizen)
        .await
        .unwrap();

    let err = env
        .credentials
        .verify_credentials("vecina", "wrong horse")
        .await
        .unwrap_err();
    assert!(matches!(err, InternalError::InvalidCredentials));

    // Unknown usernames are indistinguishable from bad passwords
    let err = env
        .credentials
        .verify_credentials("nobody", "correct horse")
        .await
        .unwrap_err();
    assert!(matches!(err, InternalError::InvalidCredentials));
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let env = setup().await;
    env.credentials
        .add_user("vecina".to_string(), "pw-one".to_string(), Role::Citizen)
        .await
        .unwrap();

    let err = env
        .credentials
        .add_user("vecina".to_string(), "pw-two".to_string(), Role::Citizen)
        .await
        .unwrap_err();
    assert!(matches!(err, InternalError::DuplicateUsername(_)));
}

#[tokio::test]
async fn provisioned_roles_survive_the_token_round_trip() {
    let env = setup().await;
    let token_service = TokenService::new("test-secret-key-minimum-32-characters-long".to_string());

    let user_id = env
        .credentials
        .add_user("inspector".to_string(), "safe password".to_string(), Role::Authority)
        .await
        .unwrap();
    let (verified_id, role) = env
        .credentials
        .verify_credentials("inspector", "safe password")
        .await
        .unwrap();
    assert_eq!(verified_id, user_id);

    let token = token_service.generate_jwt(&verified_id, role).unwrap();
    let claims = token_service.validate_jwt(&token).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.role, "authority");
}
