//! Identity Registry
//!
//! Accounts are stored once, keyed by numeric id. Every login identifier
//! (normalized phone or email) is an index entry pointing at that id, so an
//! account reachable through two identifiers is still a single record.

use rand::Rng;
use regex::Regex;
use reserve_common::{Account, Error, Result};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;
use tracing::{debug, info};
use validator::ValidateEmail;

static PHONE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-()]").expect("phone separator pattern"));

static NATIONAL_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+7\d{10}$").expect("national phone pattern"));

pub const MIN_PASSWORD_LEN: usize = 8;

/// Account plus its credential digest
#[derive(Debug, Clone)]
struct AccountRecord {
    account: Account,
    password_hash: String,
}

/// Result of a successful registration
#[derive(Debug, Clone)]
pub struct Registration {
    pub account: Account,

    /// Pending email verification code, present when an email was given
    pub verification_code: Option<String>,
}

/// Registry of accounts indexed by login identifier
#[derive(Debug)]
pub struct IdentityRegistry {
    accounts: BTreeMap<u64, AccountRecord>,
    identifiers: HashMap<String, u64>,
    verification_codes: HashMap<String, String>,
    next_id: u64,
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
            identifiers: HashMap::new(),
            verification_codes: HashMap::new(),
            next_id: 1,
        }
    }

    /// Register a new account under its phone and/or email
    pub fn register(
        &mut self,
        name: &str,
        phone: Option<&str>,
        email: Option<&str>,
        password: &str,
    ) -> Result<Registration> {
        let phone = non_blank(phone).map(validate_phone).transpose()?;
        let email = non_blank(email).map(validate_email).transpose()?;

        if phone.is_none() && email.is_none() {
            return Err(Error::InvalidInput(
                "either phone or email is required".to_string(),
            ));
        }
        validate_password(password)?;

        if let Some(email) = &email {
            if self.identifiers.contains_key(email) {
                debug!("Email already registered: {}", email);
                return Err(Error::DuplicateIdentifier(email.clone()));
            }
        }
        if let Some(phone) = &phone {
            if self.identifiers.contains_key(phone) {
                debug!("Phone already registered: {}", phone);
                return Err(Error::DuplicateIdentifier(phone.clone()));
            }
        }

        let id = self.next_id;
        self.next_id += 1;

        let account = Account::new(id, name.to_string(), phone.clone(), email.clone());
        self.accounts.insert(
            id,
            AccountRecord {
                account: account.clone(),
                password_hash: hash_password(password),
            },
        );
        for identifier in phone.iter().chain(email.iter()) {
            self.identifiers.insert(identifier.clone(), id);
        }

        let verification_code = email.map(|email| {
            let code = generate_code();
            self.verification_codes.insert(email, code.clone());
            code
        });

        info!("Registered account {}", id);
        Ok(Registration {
            account,
            verification_code,
        })
    }

    /// Resolve an identifier and check the password against its digest
    pub fn authenticate(&self, identifier: &str, password: &str) -> Result<Account> {
        let identifier = identifier.trim();
        let key = if looks_like_phone(identifier) {
            normalize_phone(identifier)
        } else {
            identifier.to_string()
        };

        let record = self
            .identifiers
            .get(&key)
            .and_then(|id| self.accounts.get(id))
            .ok_or_else(|| Error::NotFound("User".to_string()))?;

        if record.password_hash != hash_password(password) {
            debug!("Password mismatch for account {}", record.account.id);
            return Err(Error::InvalidCredential);
        }

        Ok(record.account.clone())
    }

    /// Check a pending email verification code, consuming it on success
    pub fn verify_email(&mut self, email: &str, code: &str) -> Result<()> {
        let email = email.trim();
        let expected = self
            .verification_codes
            .get(email)
            .ok_or_else(|| Error::NotFound("Verification code".to_string()))?;

        if expected != code.trim() {
            return Err(Error::InvalidCredential);
        }

        self.verification_codes.remove(email);
        info!("Verified email {}", email);
        Ok(())
    }

    /// Pending verification code for an email, if any
    pub fn pending_code(&self, email: &str) -> Option<&str> {
        self.verification_codes.get(email).map(String::as_str)
    }

    pub fn account(&self, account_id: u64) -> Option<&Account> {
        self.accounts.get(&account_id).map(|r| &r.account)
    }

    /// Account reachable through a login identifier
    pub fn lookup(&self, identifier: &str) -> Option<&Account> {
        self.identifiers
            .get(identifier)
            .and_then(|id| self.account(*id))
    }

    pub(crate) fn account_mut(&mut self, account_id: u64) -> Option<&mut Account> {
        self.accounts.get_mut(&account_id).map(|r| &mut r.account)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn looks_like_phone(identifier: &str) -> bool {
    identifier.starts_with('+') || identifier.starts_with('7') || identifier.starts_with('8')
}

/// Strip separators and coerce the `8` trunk prefix to `+7`
pub fn normalize_phone(raw: &str) -> String {
    let mut phone = PHONE_SEPARATORS.replace_all(raw, "").into_owned();
    if !phone.starts_with('+') {
        phone.insert(0, '+');
    }
    if let Some(rest) = phone.strip_prefix("+8") {
        phone = format!("+7{}", rest);
    }
    phone
}

/// Normalize a phone and require the `+7XXXXXXXXXX` form
pub fn validate_phone(raw: &str) -> Result<String> {
    let phone = normalize_phone(raw);
    if NATIONAL_PHONE.is_match(&phone) {
        Ok(phone)
    } else {
        Err(Error::InvalidInput(
            "phone must be in the format +7 XXX XXX XX XX".to_string(),
        ))
    }
}

fn validate_email(raw: &str) -> Result<String> {
    if raw.validate_email() {
        Ok(raw.to_string())
    } else {
        Err(Error::InvalidInput(format!("invalid email address: {}", raw)))
    }
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::InvalidInput(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if password.chars().any(char::is_whitespace) {
        return Err(Error::InvalidInput(
            "password must not contain whitespace".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(Error::InvalidInput(
            "password must contain at least one letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidInput(
            "password must contain at least one digit".to_string(),
        ));
    }
    Ok(())
}

fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

fn generate_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}
