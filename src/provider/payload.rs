//! Notification payloads accepted by the send endpoint and forwarded upstream.

// crates.io
use rand::seq::IndexedRandom;
// self
use crate::_prelude::*;

const DEFAULT_TITLE: &str = "Notification";
const SAMPLE_ACTION_URL: &str = "https://www.magicbell.com/";
const SAMPLE_TITLES: &[&str] = &[
	"Welcome aboard!",
	"You've got mail",
	"New update available",
	"Don't forget!",
	"Quick heads up",
	"Something new for you",
];
const SAMPLE_CONTENTS: &[&str] = &[
	"This is your first push notification. Neat, right?",
	"Your inbox is all set up and ready to go.",
	"Notifications are working like a charm.",
	"Everything is connected. You're good to go!",
	"Push notifications are live. Try sending another!",
	"Hello from MagicBell!",
];

/// Notification submitted by the holder of a write token. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
	/// Headline; empty or missing becomes `"Notification"`.
	#[serde(default)]
	pub title: Option<String>,
	/// Body text.
	#[serde(default)]
	pub content: Option<String>,
	/// URL opened when the notification is clicked.
	#[serde(default)]
	pub action_url: Option<String>,
}
impl NotificationPayload {
	/// Decodes a JSON request body, reporting the failing field path on error.
	pub fn from_json(bytes: &[u8]) -> Result<Self> {
		let de = &mut serde_json::Deserializer::from_slice(bytes);

		serde_path_to_error::deserialize(de).map_err(|source| Error::InvalidPayload { source })
	}

	/// Picks a random demo notification.
	pub fn sample() -> Self {
		let mut rng = rand::rng();

		Self {
			title: SAMPLE_TITLES.choose(&mut rng).map(|s| (*s).to_owned()),
			content: SAMPLE_CONTENTS.choose(&mut rng).map(|s| (*s).to_owned()),
			action_url: Some(SAMPLE_ACTION_URL.into()),
		}
	}

	/// Fills defaults so the provider always receives all three fields.
	pub fn normalize(self) -> NormalizedPayload {
		NormalizedPayload {
			title: self.title.filter(|t| !t.is_empty()).unwrap_or_else(|| DEFAULT_TITLE.into()),
			content: self.content.unwrap_or_default(),
			action_url: self.action_url.unwrap_or_default(),
		}
	}
}

/// Payload body sent to the provider's echo endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NormalizedPayload {
	/// Headline.
	pub title: String,
	/// Body text, possibly empty.
	pub content: String,
	/// Click-through URL, possibly empty.
	pub action_url: String,
}

/// Renders a copy-paste `curl` command that posts a test notification to `send_url`.
pub fn curl_snippet(send_url: &Url) -> String {
	[
		format!("curl -X POST '{send_url}' \\"),
		"  -H 'Content-Type: application/json' \\".into(),
		"  -d '{".into(),
		"    \"title\": \"Test Notification\",".into(),
		"    \"content\": \"Hello from curl!\",".into(),
		format!("    \"action_url\": \"{SAMPLE_ACTION_URL}\""),
		"  }'".into(),
	]
	.join("\n")
}
