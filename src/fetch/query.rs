use super::HttpClient;
use async_trait::async_trait;

/// An [`HttpClient`] wrapper that appends fixed query parameters to every
/// request URL, in the order given.
pub struct QueryParams<C> {
    inner: C,
    pairs: Vec<(String, String)>,
}

impl<C> QueryParams<C> {
    pub fn new(inner: C, pairs: Vec<(String, String)>) -> Self {
        Self { inner, pairs }
    }

    /// Builds the wrapper from `key=value` strings, splitting on the first
    /// `=`. Items without `=` are ignored.
    pub fn from_args<S: AsRef<str>>(inner: C, args: &[S]) -> Self {
        let pairs = args
            .iter()
            .filter_map(|kv| kv.as_ref().split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self::new(inner, pairs)
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for QueryParams<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        if !self.pairs.is_empty() {
            let mut query = req.url_mut().query_pairs_mut();
            for (k, v) in &self.pairs {
                query.append_pair(k, v);
            }
        }
        self.inner.execute(req).await
    }
}
