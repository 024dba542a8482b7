#[derive(Debug)]
pub struct UrlInvalidError {
    pub url: String,
    pub expected_prefix: String,
}

impl std::fmt::Display for UrlInvalidError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "index URL {} does not start with {}",
            self.url, self.expected_prefix
        )
    }
}

impl std::error::Error for UrlInvalidError {}
