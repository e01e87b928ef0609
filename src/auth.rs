// src/auth.rs
//
// In-memory authentication boundary. Accounts live for the process lifetime;
// passwords are stored as salted SHA-256 digests, never as plaintext.

use crate::errors::{GitoError, GitoResult};
use crate::models::{Role, User};
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use uuid::Uuid;

const SALT_LEN: usize = 16;

#[derive(Debug, Clone)]
struct Account {
    name: String,
    role: Role,
    salt: [u8; SALT_LEN],
    digest: [u8; 32],
}

#[derive(Debug, Default)]
pub struct Authenticator {
    // Keyed by lowercased email.
    accounts: HashMap<String, Account>,
}

impl Authenticator {
    pub fn new() -> Self {
        Authenticator {
            accounts: HashMap::new(),
        }
    }

    /// Builds an authenticator with the admin account taken from
    /// configuration. With no admin credentials configured there is simply
    /// no admin account; students can still register and log in.
    pub fn with_admin(admin_email: &str, admin_password: &str) -> Self {
        let mut auth = Authenticator::new();
        if !admin_email.trim().is_empty() && !admin_password.is_empty() {
            if let Err(e) =
                auth.create_account("Administrador", admin_email, admin_password, Role::Admin)
            {
                log::warn!("could not bootstrap admin account: {}", e);
            }
        }
        auth
    }

    fn create_account(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> GitoResult<()> {
        let key = email.trim().to_lowercase();
        if !key.contains('@') {
            return Err(GitoError::auth_error(
                "Credenciais inválidas. Por favor, tente novamente.",
            ));
        }
        if self.accounts.contains_key(&key) {
            return Err(GitoError::auth_error("Este email já está registado."));
        }

        let mut salt = [0u8; SALT_LEN];
        rand::rng().fill_bytes(&mut salt);

        self.accounts.insert(
            key,
            Account {
                name: name.to_string(),
                role,
                salt,
                digest: hash_password(password, &salt),
            },
        );
        Ok(())
    }

    /// Registers a new student account and returns the logged-in identity.
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> GitoResult<User> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(GitoError::auth_error(
                "Por favor, preencha todos os campos.",
            ));
        }
        self.create_account(name.trim(), email, password, Role::Student)?;
        self.login(email, password)
    }

    pub fn login(&self, email: &str, password: &str) -> GitoResult<User> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(GitoError::auth_error(
                "Por favor, preencha todos os campos.",
            ));
        }

        let key = email.trim().to_lowercase();
        let account = self.accounts.get(&key).ok_or_else(|| {
            GitoError::auth_error("Credenciais inválidas. Por favor, tente novamente.")
        })?;

        let candidate = hash_password(password, &account.salt);
        if !constant_time_eq(&candidate, &account.digest) {
            return Err(GitoError::auth_error(
                "Credenciais inválidas. Por favor, tente novamente.",
            ));
        }

        let name = if account.name.is_empty() {
            display_name_from_email(&key)
        } else {
            account.name.clone()
        };

        Ok(User {
            id: Uuid::new_v4().to_string(),
            name,
            email: key,
            role: account.role,
        })
    }
}

fn hash_password(password: &str, salt: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Derives a presentable name from the email local part: dots and
/// underscores become spaces, words are capitalized, first two kept.
pub fn display_name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    local
        .replace(['.', '_'], " ")
        .split_whitespace()
        .take(2)
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_login_roundtrip() {
        let mut auth = Authenticator::new();
        let user = auth
            .register("Maria Jose", "maria.jose@ucm.ac.mz", "segredo")
            .unwrap();
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.name, "Maria Jose");

        let again = auth.login("maria.jose@ucm.ac.mz", "segredo").unwrap();
        assert_eq!(again.email, "maria.jose@ucm.ac.mz");
    }

    #[test]
    fn test_login_rejects_wrong_password() {
        let mut auth = Authenticator::new();
        auth.register("Maria", "maria@ucm.ac.mz", "segredo").unwrap();
        assert!(auth.login("maria@ucm.ac.mz", "errado").is_err());
    }

    #[test]
    fn test_login_unknown_email_fails() {
        let auth = Authenticator::new();
        assert!(auth.login("ninguem@ucm.ac.mz", "x").is_err());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut auth = Authenticator::new();
        auth.register("A", "dup@ucm.ac.mz", "um").unwrap();
        assert!(auth.register("B", "DUP@ucm.ac.mz", "dois").is_err());
    }

    #[test]
    fn test_admin_bootstrap_from_config() {
        let auth = Authenticator::with_admin("reitor@ucm.ac.mz", "muitosecreto");
        let user = auth.login("reitor@ucm.ac.mz", "muitosecreto").unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_no_admin_without_credentials() {
        let auth = Authenticator::with_admin("", "");
        assert!(auth.login("", "").is_err());
        assert!(auth.accounts.is_empty());
    }

    #[test]
    fn test_register_requires_all_fields() {
        let mut auth = Authenticator::new();
        assert!(auth.register("", "a@b.c", "x").is_err());
        assert!(auth.register("Nome", "", "x").is_err());
        assert!(auth.register("Nome", "a@b.c", "").is_err());
    }

    #[test]
    fn test_email_without_at_rejected() {
        let mut auth = Authenticator::new();
        assert!(auth.register("Nome", "sem-arroba", "x").is_err());
    }

    #[test]
    fn test_display_name_from_email() {
        assert_eq!(display_name_from_email("ana.paula.sitoe@gmail.com"), "Ana Paula");
        assert_eq!(display_name_from_email("joao_m@ucm.ac.mz"), "Joao M");
        assert_eq!(display_name_from_email("carla@ucm.ac.mz"), "Carla");
    }
}
