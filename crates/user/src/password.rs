use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Argon2id password hasher.
///
/// Defaults follow the OWASP recommendation: 64 MiB memory, 3 iterations,
/// parallelism 4.
#[derive(Clone)]
pub struct Hasher {
    params: Params,
}

impl Default for Hasher {
    fn default() -> Self {
        Self {
            params: Params::new(65536, 3, 4, None).unwrap_or_default(),
        }
    }
}

impl Hasher {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> yummio_shared::Result<Self> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| yummio_shared::Error::Server(format!("argon2 params: {e}")))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash(&self, password: &str) -> yummio_shared::Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        Ok(self
            .argon2()
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    }

    /// Parameters are read back from the PHC string, so hashes produced with
    /// older settings still verify.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        self.argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
