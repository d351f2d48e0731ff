//! 密码哈希与校验。
//!
//! 存储值以 `$argon2` 开头时按 argon2 校验；否则视为历史明文，
//! 常量时间比较通过后返回新的 argon2 哈希供调用方回写。

use crate::AuthError;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand_core::OsRng;
use subtle::ConstantTimeEq;

/// 新账户密码最短长度。
pub const MIN_PASSWORD_LEN: usize = 6;

pub struct PasswordCheck {
    pub verified: bool,
    /// 明文命中时需要回写的新哈希。
    pub upgrade_hash: Option<String>,
}

impl PasswordCheck {
    fn rejected() -> Self {
        Self {
            verified: false,
            upgrade_hash: None,
        }
    }
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthError::Internal(err.to_string()))
}

/// 注册时的密码规则。
pub fn validate_new_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::InvalidInput(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn verify_password_and_maybe_upgrade(
    stored_password: &str,
    password: &str,
) -> Result<PasswordCheck, AuthError> {
    if stored_password.starts_with("$argon2") {
        let parsed =
            PasswordHash::new(stored_password).map_err(|err| AuthError::Internal(err.to_string()))?;
        let verified = Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();
        return Ok(PasswordCheck {
            verified,
            upgrade_hash: None,
        });
    }

    let matches: bool = stored_password.as_bytes().ct_eq(password.as_bytes()).into();
    if !matches {
        return Ok(PasswordCheck::rejected());
    }
    Ok(PasswordCheck {
        verified: true,
        upgrade_hash: Some(hash_password(password)?),
    })
}
