use async_trait::async_trait;

/// Username/password pair submitted to the login form
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Decides whether submitted credentials identify the site admin
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> bool;
}

/// The single admin pair configured through the environment
pub struct StaticCredentialProvider {
    username: String,
    password: String,
}

impl StaticCredentialProvider {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticCredentialProvider {
    async fn authenticate(&self, credentials: &Credentials) -> bool {
        // Evaluate both comparisons so timing does not reveal which one failed
        let username_ok = constant_time_eq(credentials.username.as_bytes(), self.username.as_bytes());
        let password_ok = constant_time_eq(credentials.password.as_bytes(), self.password.as_bytes());
        username_ok & password_ok
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
