//! 비밀번호 저장 모듈
//!
//! 회원별 랜덤 솔트를 붙인 SHA-256 다이제스트를 저장합니다.
//! 검증은 저장된 솔트로 재계산한 다이제스트 비교로 수행합니다.

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

/// 솔트 길이 (문자)
const SALT_LENGTH: usize = 16;

/// 랜덤 솔트 생성
pub fn generate_salt() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LENGTH)
        .map(char::from)
        .collect()
}

/// 비밀번호 다이제스트 계산 (hex 인코딩)
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// 비밀번호 검증
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    hash_password(password, salt) == expected_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let salt = generate_salt();
        let hash = hash_password("secret1234", &salt);

        assert!(verify_password("secret1234", &salt, &hash));
        assert!(!verify_password("wrong-password", &salt, &hash));
    }

    #[test]
    fn test_same_password_different_salt() {
        let hash_a = hash_password("secret1234", "salt-a");
        let hash_b = hash_password("secret1234", "salt-b");

        assert_ne!(hash_a, hash_b);
    }

    #[test]
    fn test_salt_length() {
        let salt = generate_salt();
        assert_eq!(salt.len(), SALT_LENGTH);
    }
}
