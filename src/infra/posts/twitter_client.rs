use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::core::posts::{FeedError, Post, PostFeed, WatchedAccount};

/// How many recent posts to ask for. Only the newest one is used.
const TIMELINE_PAGE_SIZE: &str = "5";

/// Read-only Twitter v2 client authenticated with an app bearer token.
pub struct TwitterClient {
    client: Client,
    base_url: String,
}

impl TwitterClient {
    pub fn new(bearer_token: &str) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {}", bearer_token))
                .map_err(|e| FeedError::Api(e.to_string()))?,
        );
        headers.insert("User-Agent", HeaderValue::from_static("SignalRelayBot/0.1"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(20))
            .build()
            .map_err(|e| FeedError::Api(e.to_string()))?;

        Ok(Self {
            client,
            base_url: "https://api.twitter.com".to_string(),
        })
    }
}

#[async_trait]
impl PostFeed for TwitterClient {
    async fn recent_posts(&self, account: &WatchedAccount) -> Result<Vec<Post>, FeedError> {
        let url = format!("{}/2/users/{}/tweets", self.base_url, account.account_id);
        let resp = self
            .client
            .get(url)
            .query(&[("exclude", "replies"), ("max_results", TIMELINE_PAGE_SIZE)])
            .send()
            .await
            .map_err(|e| FeedError::Api(e.to_string()))?;

        match resp.status() {
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(FeedError::Api("Twitter rate limit hit".to_string()));
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(FeedError::Api(format!(
                    "Twitter rejected the bearer token ({})",
                    resp.status()
                )));
            }
            status if !status.is_success() => {
                return Err(FeedError::Api(format!(
                    "Twitter returned {} for @{}",
                    status, account.name
                )));
            }
            _ => {}
        }

        let timeline: ApiTimeline = resp
            .json()
            .await
            .map_err(|e| FeedError::Api(e.to_string()))?;

        Ok(timeline.into_posts())
    }
}

/// `GET /2/users/:id/tweets` body. `data` is omitted entirely when there are no tweets.
#[derive(Debug, Deserialize)]
struct ApiTimeline {
    #[serde(default)]
    data: Option<Vec<ApiTweet>>,
}

impl ApiTimeline {
    fn into_posts(self) -> Vec<Post> {
        self.data
            .unwrap_or_default()
            .into_iter()
            .map(|tweet| Post {
                id: tweet.id,
                text: tweet.text.unwrap_or_default(),
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ApiTweet {
    id: String,
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_keeps_feed_order() {
        let body = r#"{
            "data": [
                {"id": "1790000000000000002", "text": "BREAKING: second"},
                {"id": "1790000000000000001", "text": "first"}
            ],
            "meta": {"result_count": 2, "newest_id": "1790000000000000002"}
        }"#;

        let timeline: ApiTimeline = serde_json::from_str(body).unwrap();
        let posts = timeline.into_posts();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "1790000000000000002");
        assert_eq!(posts[0].text, "BREAKING: second");
    }

    #[test]
    fn test_timeline_without_data_is_empty() {
        let body = r#"{"meta": {"result_count": 0}}"#;
        let timeline: ApiTimeline = serde_json::from_str(body).unwrap();
        assert!(timeline.into_posts().is_empty());
    }
}
