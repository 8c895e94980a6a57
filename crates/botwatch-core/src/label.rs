//! Authorship label taxonomy
//!
//! The classifier's output ordinals map onto this closed set. The mapping is
//! a compile-time constant: every conversion below is an exhaustive `match`,
//! and the `ALL` table is checked against the ordinals when the crate builds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of authorship categories the classifier distinguishes
pub const NUM_CLASSES: usize = 5;

/// Authorship category of a text sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Label {
    /// Genuine human writing
    Human = 0,
    /// Automated news feeds and content aggregators
    ContentBot = 1,
    /// Social media growth automation
    FollowerBot = 2,
    /// Promotional and scam content
    SpamBot = 3,
    /// Automated support and helpdesk replies
    CustomerServiceBot = 4,
}

impl Label {
    /// All labels in ordinal order
    pub const ALL: [Label; NUM_CLASSES] = [
        Label::Human,
        Label::ContentBot,
        Label::FollowerBot,
        Label::SpamBot,
        Label::CustomerServiceBot,
    ];

    /// Classifier output ordinal
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Stable machine name (`spam_bot`, ...)
    pub const fn as_str(self) -> &'static str {
        match self {
            Label::Human => "human",
            Label::ContentBot => "content_bot",
            Label::FollowerBot => "follower_bot",
            Label::SpamBot => "spam_bot",
            Label::CustomerServiceBot => "customer_service_bot",
        }
    }

    /// Short human-readable name for reports
    pub const fn display_name(self) -> &'static str {
        match self {
            Label::Human => "Human",
            Label::ContentBot => "Content Bot",
            Label::FollowerBot => "Follower Bot",
            Label::SpamBot => "Spam Bot",
            Label::CustomerServiceBot => "Service Bot",
        }
    }

    /// Typical traits of text in this category
    pub const fn insights(self) -> &'static [&'static str] {
        match self {
            Label::Human => &[
                "Natural language with emotional expression",
                "Personal experiences and storytelling",
                "Varied sentence structure",
                "Emojis and expressive punctuation",
            ],
            Label::ContentBot => &[
                "Automated news or information feed",
                "Formal, information-dense content",
                "Underscore-joined topic terms",
                "Repetitive structural patterns",
            ],
            Label::FollowerBot => &[
                "Social media growth automation",
                "Keywords such as follow, boost, growth, likes",
                "Promotional, engagement-focused tone",
            ],
            Label::SpamBot => &[
                "Promotional or scam content",
                "Urgent or exaggerated language",
                "Free offers, prize claims, financial opportunities",
            ],
            Label::CustomerServiceBot => &[
                "Automated support and helpdesk responses",
                "Transaction-related or structured replies",
                "Polite, standardized phrasing",
            ],
        }
    }
}

const _: () = {
    let mut i = 0;
    while i < NUM_CLASSES {
        assert!(Label::ALL[i].ordinal() == i);
        i += 1;
    }
};

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Label::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("unknown label: {s}"))
    }
}
