use subtle::ConstantTimeEq;

/// Non-authoritative demo gate for the admin panel.
///
/// This is NOT a security boundary: the secret ships in client-visible
/// configuration and a real deployment needs a server-side credential
/// check. The gate exists so casual visitors don't edit the portfolio, and
/// it stays out of any trust boundary. Known limitation, not a bug.
///
/// The compare itself is constant-time over equal-length inputs; length is
/// not hidden, which is acceptable for a gate of this kind.
#[derive(Debug, Clone)]
pub struct AdminGate {
    secret: String,
}

impl AdminGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn verify(&self, candidate: &str) -> bool {
        let secret = self.secret.as_bytes();
        let candidate = candidate.as_bytes();
        if secret.len() != candidate.len() {
            return false;
        }
        secret.ct_eq(candidate).into()
    }
}
