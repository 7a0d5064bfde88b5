use std::str::FromStr;

/// A social-media account whose newest post gets relayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedAccount {
    /// Handle used in announcements and permalinks.
    pub name: String,
    /// Numeric account id as understood by the feed API.
    pub account_id: String,
}

impl WatchedAccount {
    pub fn new(name: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            account_id: account_id.into(),
        }
    }
}

/// Accounts watched when none are configured.
pub fn default_accounts() -> Vec<WatchedAccount> {
    vec![
        WatchedAccount::new("WatcherGuru", "1244160501793519616"),
        WatchedAccount::new("DegenerateNews", "1397256779620175872"),
        WatchedAccount::new("realDonaldTrump", "25073877"),
        WatchedAccount::new("arkham", "1433001060820645895"),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub text: String,
}

/// A post that should be relayed to the announcement channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostAnnouncement {
    pub account_name: String,
    pub post: Post,
}

impl PostAnnouncement {
    pub fn permalink(&self) -> String {
        format!(
            "https://twitter.com/{}/status/{}",
            self.account_name, self.post.id
        )
    }
}

/// What to do the first time an account is polled and no watermark exists yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColdStartPolicy {
    /// Relay the newest existing post.
    #[default]
    AnnounceLatest,
    /// Remember the newest post as baseline and wait for a genuinely new one.
    Silent,
}

impl FromStr for ColdStartPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "announce" | "announce_latest" => Ok(ColdStartPolicy::AnnounceLatest),
            "silent" => Ok(ColdStartPolicy::Silent),
            other => Err(format!(
                "unknown cold start policy '{}', expected 'announce' or 'silent'",
                other
            )),
        }
    }
}
