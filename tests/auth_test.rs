//! 인증 테스트
//!
//! 테스트 대상:
//! - LoginRequest 유효성 검증
//! - JWT 발급/검증과 토큰 타입 구분
//! - 비밀번호 솔트 해시 검증

use reservation_server::domain::auth::dto::LoginRequest;
use reservation_server::utils::jwt::{decode_access_token, encode_refresh_token, encode_token};
use reservation_server::utils::password::{generate_salt, hash_password, verify_password};
use validator::Validate;

// ============== 유효성 검증 테스트 ==============

#[test]
fn should_validate_login_request_with_credentials() {
    // Arrange
    let req = LoginRequest {
        login_id: "chulsoo".to_string(),
        password: "secret1234".to_string(),
    };

    // Act & Assert
    assert!(req.validate().is_ok());
}

#[test]
fn should_fail_validation_with_empty_login_id() {
    // Arrange
    let req = LoginRequest {
        login_id: "".to_string(),
        password: "secret1234".to_string(),
    };

    // Act & Assert
    assert!(req.validate().is_err());
}

#[test]
fn should_deserialize_login_request_from_camel_case() {
    // Arrange
    let json = r#"{"loginId": "chulsoo", "password": "secret1234"}"#;

    // Act
    let req: LoginRequest = serde_json::from_str(json).unwrap();

    // Assert
    assert_eq!(req.login_id, "chulsoo");
}

// ============== JWT 테스트 ==============

#[test]
fn should_round_trip_access_token() {
    // Arrange
    let secret = "test_secret";

    // Act
    let token = encode_token("42".to_string(), secret, 3600).unwrap();
    let claims = decode_access_token(&token, secret).unwrap();

    // Assert
    assert_eq!(claims.sub, "42");
}

#[test]
fn should_reject_refresh_token_on_api_access() {
    // Arrange
    let secret = "test_secret";
    let token = encode_refresh_token("42".to_string(), secret, 3600).unwrap();

    // Act
    let result = decode_access_token(&token, secret);

    // Assert
    assert!(result.is_err());
}

#[test]
fn should_reject_token_signed_with_other_secret() {
    // Arrange
    let token = encode_token("42".to_string(), "secret_a", 3600).unwrap();

    // Act
    let result = decode_access_token(&token, "secret_b");

    // Assert
    assert!(result.is_err());
}

// ============== 비밀번호 테스트 ==============

#[test]
fn should_verify_password_with_stored_salt() {
    // Arrange
    let salt = generate_salt();
    let hash = hash_password("secret1234", &salt);

    // Act & Assert
    assert!(verify_password("secret1234", &salt, &hash));
    assert!(!verify_password("wrong-password", &salt, &hash));
}

#[test]
fn should_produce_different_hashes_for_different_salts() {
    // Arrange & Act
    let hash_a = hash_password("secret1234", "salt-a");
    let hash_b = hash_password("secret1234", "salt-b");

    // Assert
    assert_ne!(hash_a, hash_b);
}
